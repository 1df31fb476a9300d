use crate::audio::track::{Track, TrackId};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Media source
    CanPlayThrough(TrackId),
    TimeUpdate(TrackId, f64),
    Ended(TrackId),

    // Commands
    LoadPlaylist(Vec<Track>, usize),
    SelectTrack(TrackId),
    PlayPause,
    Next,
    Previous,
    Volume(f64),
    VolumeUp,
    VolumeDown,
    ToggleMute,
    Seek(f64),
    SeekCommit,
    SeekForward,
    SeekBackward,

    // Queue cursor
    CursorUp,
    CursorDown,
    PlaySelected,

    Quit,
}

impl Event {
    /// Track the event was emitted for, when it comes from a media source.
    pub fn source_track(&self) -> Option<&TrackId> {
        match self {
            Event::CanPlayThrough(id) | Event::TimeUpdate(id, _) | Event::Ended(id) => Some(id),
            _ => None,
        }
    }
}
