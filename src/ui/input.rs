use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::event::events::Event;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<Event> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Event::Quit),
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(Event::Quit),
            (KeyCode::Char(' '), _) => Some(Event::PlayPause),
            (KeyCode::Char('n'), _) | (KeyCode::Right, KeyModifiers::SHIFT) => Some(Event::Next),
            (KeyCode::Char('p'), _) | (KeyCode::Left, KeyModifiers::SHIFT) => {
                Some(Event::Previous)
            }
            (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) | (KeyCode::Up, _) => {
                Some(Event::VolumeUp)
            }
            (KeyCode::Char('-'), _) | (KeyCode::Down, _) => Some(Event::VolumeDown),
            (KeyCode::Char('m'), _) => Some(Event::ToggleMute),
            (KeyCode::Char('H'), _) | (KeyCode::Left, _) => Some(Event::SeekBackward),
            (KeyCode::Char('L'), _) | (KeyCode::Right, _) => Some(Event::SeekForward),
            (KeyCode::Char('k'), _) => Some(Event::CursorUp),
            (KeyCode::Char('j'), _) => Some(Event::CursorDown),
            (KeyCode::Enter, _) => Some(Event::PlaySelected),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Option<Event> {
        InputHandler::handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_playback_keys() {
        assert_eq!(press(KeyCode::Char(' ')), Some(Event::PlayPause));
        assert_eq!(press(KeyCode::Char('n')), Some(Event::Next));
        assert_eq!(press(KeyCode::Char('m')), Some(Event::ToggleMute));
        assert_eq!(press(KeyCode::Left), Some(Event::SeekBackward));
    }

    #[test]
    fn test_shifted_arrows_navigate_tracks() {
        let prev = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(InputHandler::handle_key(prev), Some(Event::Previous));
    }

    #[test]
    fn test_queue_cursor_keys() {
        assert_eq!(press(KeyCode::Char('j')), Some(Event::CursorDown));
        assert_eq!(press(KeyCode::Char('k')), Some(Event::CursorUp));
        assert_eq!(press(KeyCode::Enter), Some(Event::PlaySelected));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::handle_key(ctrl_c), Some(Event::Quit));
        assert_eq!(press(KeyCode::Char('c')), None);
    }
}
