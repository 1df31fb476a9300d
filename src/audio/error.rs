use thiserror::Error;

use crate::audio::track::TrackId;

/// Failure reported by a media source while trying to start playback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlayError {
    #[error("Playback blocked by policy: {0}")]
    Blocked(String),

    #[error("No media loaded")]
    NothingLoaded,

    #[error("Media error: {0}")]
    Media(String),
}

/// Conditions the synchronizer absorbs locally. None of them are fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("Play rejected for {track}: {source}")]
    PlayRejected { track: TrackId, source: PlayError },

    #[error("Stale event for {0}")]
    StaleEvent(TrackId),

    #[error("Source not ready for {0}")]
    NotReady(TrackId),

    #[error("No playable source loaded")]
    NoSource,
}
