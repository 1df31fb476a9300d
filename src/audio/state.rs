use crate::audio::{
    commands::Intent,
    queue::Queue,
    track::{Track, TrackId},
};

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub volume: f64,
    pub progress: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track: None,
            is_playing: false,
            volume: 1.0,
            progress: 0.0,
        }
    }
}

impl PlaybackState {
    pub fn with_volume(volume: f64) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    pub fn current_track_id(&self) -> Option<&TrackId> {
        self.current_track.as_ref().map(|t| &t.id)
    }

    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }
}

/// Whether the media source has buffered enough of the current track to
/// start playing. Recomputed on every track load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Readiness {
    #[default]
    NotReady,
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerState {
    pub playback: PlaybackState,
    pub queue: Queue,
}

impl PlayerState {
    pub fn new(playback: PlaybackState) -> Self {
        Self {
            playback,
            queue: Queue::new(),
        }
    }

    pub fn reduce(mut self, intent: Intent) -> Self {
        let previous_id = self.playback.current_track_id().cloned();

        match intent {
            Intent::PauseTrack => self.playback.is_playing = false,
            Intent::ResumeTrack => {
                if self.playback.current_track.is_some() {
                    self.playback.is_playing = true;
                }
            }
            Intent::SetProgress(time) => {
                if time.is_finite() {
                    self.playback.progress = time.max(0.0);
                }
            }
            Intent::SetVolume(volume) => {
                if volume.is_finite() {
                    self.playback.volume = volume.clamp(0.0, 1.0);
                }
            }
            Intent::PlayNextTrack => {
                if let Some(track) = self.queue.next() {
                    self.start(track);
                }
            }
            Intent::PlayPrevTrack => {
                if let Some(track) = self.queue.previous() {
                    self.start(track);
                }
            }
            Intent::LoadPlaylist { tracks, start } => {
                if let Some(track) = self.queue.load(tracks, start) {
                    self.start(track);
                }
            }
            Intent::SelectTrack(id) => {
                if let Some(track) = self.queue.select(&id) {
                    self.start(track);
                }
            }
        }

        if self.playback.current_track_id() != previous_id.as_ref() {
            self.playback.progress = 0.0;
        }

        self
    }

    fn start(&mut self, track: Track) {
        self.playback.current_track = Some(track);
        self.playback.is_playing = true;
    }
}
