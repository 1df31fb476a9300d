use crate::audio::track::{Track, TrackId};

/// Named request to change the player state. Intents are the only way the
/// store's state is written.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    PauseTrack,
    ResumeTrack,
    SetProgress(f64),
    SetVolume(f64),
    PlayNextTrack,
    PlayPrevTrack,
    LoadPlaylist { tracks: Vec<Track>, start: usize },
    SelectTrack(TrackId),
}
