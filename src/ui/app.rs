use flume::Receiver;
use ratatui::{
    Frame,
    crossterm::event::{MouseButton, MouseEvent, MouseEventKind},
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::info;

use crate::{
    audio::{
        config::PlayerConfig, simulated::SimulatedSource, system::PlayerSystem, track::Track,
    },
    event::events::Event,
    util::colors,
};

use super::{
    components::player_bar::{PLAYER_BAR_HEIGHT, PlayerBarWidget},
    input::InputHandler,
    tui::{self, TerminalEvent},
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub player: PlayerSystem<SimulatedSource>,
    pub should_quit: bool,
    queue_state: ListState,
    player_bar_area: Option<Rect>,
    dragging: bool,
}

impl App {
    pub fn new(config: PlayerConfig, tracks: Vec<Track>) -> Self {
        let (event_tx, event_rx) = flume::unbounded();
        let source = SimulatedSource::new(event_tx.clone(), &config);
        let player = PlayerSystem::new(source, config);

        if !tracks.is_empty() {
            info!("Queueing {} tracks", tracks.len());
            let _ = event_tx.send(Event::LoadPlaylist(tracks, 0));
        }

        Self {
            event_rx,
            player,
            should_quit: false,
            queue_state: ListState::default(),
            player_bar_area: None,
            dragging: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?.mouse(true);
        tui.enter()?;

        let event_rx = self.event_rx.clone();
        while !self.should_quit {
            tui.draw(|f| self.ui(f))?;

            tokio::select! {
                Some(evt) = tui.next() => self.handle_terminal_event(evt),
                Ok(evt) = event_rx.recv_async() => self.handle_event(evt),
                else => self.should_quit = true,
            }

            while let Ok(evt) = event_rx.try_recv() {
                self.handle_event(evt);
            }
        }

        tui.exit()?;
        Ok(())
    }

    pub fn handle_event(&mut self, evt: Event) {
        match evt {
            Event::Quit => self.should_quit = true,
            Event::CursorUp => {
                let i = self.cursor();
                self.queue_state.select(Some(i.saturating_sub(1)));
            }
            Event::CursorDown => {
                let last = self.player.store().state().queue.len().saturating_sub(1);
                let i = self.cursor();
                self.queue_state.select(Some((i + 1).min(last)));
            }
            Event::PlaySelected => {
                let queue = &self.player.store().state().queue;
                if let Some(track) = queue.tracks.get(self.cursor()) {
                    let id = track.id.clone();
                    self.player.handle_event(Event::SelectTrack(id));
                }
            }
            evt => self.player.handle_event(evt),
        }
    }

    /// Queue row under the cursor, starting on the current track.
    fn cursor(&self) -> usize {
        self.queue_state
            .selected()
            .unwrap_or(self.player.store().state().queue.current_track_index)
    }

    fn handle_terminal_event(&mut self, evt: TerminalEvent) {
        match evt {
            TerminalEvent::Key(key) => {
                if let Some(evt) = InputHandler::handle_key(key) {
                    self.handle_event(evt);
                }
            }
            TerminalEvent::Mouse(mouse) => self.handle_mouse_event(mouse),
            TerminalEvent::Tick | TerminalEvent::Resize(..) => {}
        }
    }

    /// Clicking or dragging on the position slider seeks; releasing commits.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(position) = self.slider_position(mouse.column, mouse.row) {
                    self.dragging = true;
                    self.handle_event(Event::Seek(position));
                }
            }
            MouseEventKind::Up(MouseButton::Left) if self.dragging => {
                self.dragging = false;
                self.handle_event(Event::SeekCommit);
            }
            _ => {}
        }
    }

    fn slider_position(&self, column: u16, row: u16) -> Option<f64> {
        let view = self.player.view()?;
        let slider = PlayerBarWidget::progress_area(self.player_bar_area?);
        if !self.dragging && !slider.contains(Position::new(column, row)) {
            return None;
        }
        if slider.width == 0 {
            return None;
        }

        let offset = column.saturating_sub(slider.x).min(slider.width);
        Some(f64::from(offset) / f64::from(slider.width) * view.progress_max())
    }

    fn ui(&mut self, frame: &mut Frame) {
        let view = self.player.view();
        let bar_height = if view.is_some() { PLAYER_BAR_HEIGHT } else { 0 };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(bar_height)])
            .split(frame.area());

        self.render_queue(frame, layout[0]);

        match view {
            Some(view) => {
                frame.render_widget(PlayerBarWidget::new(&view), layout[1]);
                self.player_bar_area = Some(layout[1]);
            }
            None => self.player_bar_area = None,
        }
    }

    fn render_queue(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title_top(" Queue ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::NEUTRAL));

        let queue = &self.player.store().state().queue;
        if queue.is_empty() {
            let hint = Paragraph::new(Line::from("Pass audio files as arguments to queue them."))
                .block(block)
                .centered();
            frame.render_widget(hint, area);
            return;
        }

        let current = self.player.store().playback().current_track_id();
        let items: Vec<ListItem> = queue
            .tracks
            .iter()
            .map(|track| {
                let line = format!("{} by {}", track.title, track.artist);
                if Some(&track.id) == current {
                    ListItem::new(line).fg(colors::HIGHLIGHT).bold()
                } else if !track.is_playable() {
                    ListItem::new(line).fg(colors::NEUTRAL)
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        if self.queue_state.selected().is_none() {
            self.queue_state.select(Some(queue.current_track_index));
        }

        frame.render_stateful_widget(list, area, &mut self.queue_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_app() -> App {
        let tracks = (0..3)
            .map(|i| Track::from_uri(i, &format!("/music/song{i}.mp3")))
            .collect();
        let mut app = App::new(PlayerConfig::default(), tracks);
        while let Ok(evt) = app.event_rx.try_recv() {
            app.handle_event(evt);
        }
        app
    }

    fn current_title(app: &App) -> String {
        let playback = app.player.store().playback();
        playback.current_track.as_ref().unwrap().title.clone()
    }

    #[tokio::test]
    async fn test_enter_plays_track_under_cursor() {
        let mut app = create_test_app();
        assert_eq!(current_title(&app), "song0");

        app.handle_event(Event::CursorDown);
        app.handle_event(Event::CursorDown);
        app.handle_event(Event::PlaySelected);

        assert_eq!(current_title(&app), "song2");
        assert!(app.player.is_playing());
    }

    #[tokio::test]
    async fn test_cursor_stays_inside_queue() {
        let mut app = create_test_app();

        app.handle_event(Event::CursorUp);
        assert_eq!(app.cursor(), 0);

        for _ in 0..5 {
            app.handle_event(Event::CursorDown);
        }
        assert_eq!(app.cursor(), 2);

        app.handle_event(Event::CursorUp);
        app.handle_event(Event::PlaySelected);
        assert_eq!(current_title(&app), "song1");
    }
}
