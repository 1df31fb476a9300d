use flume::Receiver;
use tokio::runtime::Handle;
use tracing::{debug, info, trace, warn};

use crate::{
    audio::{
        commands::Intent,
        config::ResumePolicy,
        error::PlaybackError,
        state::Readiness,
        store::{StateChange, Store},
        traits::MediaSource,
        track::{Track, TrackId},
    },
    event::events::Event,
};

#[derive(Debug, Clone, Copy)]
struct SeekDrag {
    was_playing: bool,
}

/// Keeps a [`MediaSource`] in line with the store's intended playback state
/// and folds the source's own events back into the store.
///
/// The synchronizer is the only writer of the source. State changes are
/// picked up through a store subscription and applied by [`Self::reconcile`].
pub struct PlaybackSynchronizer<S: MediaSource> {
    source: S,
    changes: Receiver<StateChange>,
    readiness: Readiness,
    loaded: Option<TrackId>,
    seek: Option<SeekDrag>,
}

impl<S: MediaSource> PlaybackSynchronizer<S> {
    pub fn new(mut source: S, store: &mut Store) -> Self {
        let changes = store.subscribe();
        source.set_volume(store.playback().volume);

        let mut sync = Self {
            source,
            changes,
            readiness: Readiness::NotReady,
            loaded: None,
            seek: None,
        };

        if let Some(track) = store.playback().current_track.clone() {
            sync.load(&track);
        }

        sync
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn loaded_track(&self) -> Option<&TrackId> {
        self.loaded.as_ref()
    }

    pub fn duration(&self) -> Option<f64> {
        self.loaded.as_ref().and_then(|_| self.source.duration())
    }

    /// Applies every pending state change to the source, oldest first.
    pub fn reconcile(&mut self) {
        while let Ok(change) = self.changes.try_recv() {
            self.apply(&change);
        }
    }

    fn apply(&mut self, change: &StateChange) {
        if change.track_changed() {
            self.switch_track(change.current.current_track.as_ref());
        }

        if change.volume_changed() {
            trace!(volume = change.current.volume, "volume");
            self.source.set_volume(change.current.volume);
        }

        if change.stopped() {
            debug!("pausing source");
            self.source.pause();
        } else if change.started()
            && let Err(e) = self.play()
        {
            debug!("Deferring play: {e}");
        }
    }

    fn switch_track(&mut self, track: Option<&Track>) {
        self.source.pause();
        if self.loaded.is_some() {
            self.source.set_current_time(0.0);
        }

        self.readiness = Readiness::NotReady;
        self.seek = None;
        self.loaded = None;

        match track {
            Some(track) => self.load(track),
            None => debug!("no current track"),
        }
    }

    fn load(&mut self, track: &Track) {
        let Some(uri) = &track.audio_file else {
            debug!(track = %track.id, "track has no audio file, nothing to load");
            return;
        };

        info!(track = %track.id, "loading {} - {}", track.artist, track.title);
        self.source.load(&track.id, uri);
        self.loaded = Some(track.id.clone());
    }

    /// Starts the source. A rejection is reported asynchronously and only
    /// observed when a Tokio runtime is available to await it.
    fn play(&mut self) -> Result<(), PlaybackError> {
        let track = self.loaded.clone().ok_or(PlaybackError::NoSource)?;
        if self.readiness != Readiness::Ready {
            return Err(PlaybackError::NotReady(track));
        }

        let outcome = self.source.play();
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(source) = outcome.await {
                        let err = PlaybackError::PlayRejected { track, source };
                        warn!("{err}");
                    }
                });
            }
            Err(e) => warn!(track = %track, "Play outcome not awaited: {e}"),
        }

        Ok(())
    }

    /// Handles readiness, time-update and end-of-media notifications.
    /// Events for any track other than the current one are rejected as stale.
    pub fn handle_media_event(
        &mut self,
        store: &mut Store,
        event: &Event,
    ) -> Result<(), PlaybackError> {
        let Some(track) = event.source_track() else {
            return Ok(());
        };

        if store.playback().current_track_id() != Some(track) || self.loaded.as_ref() != Some(track)
        {
            return Err(PlaybackError::StaleEvent(track.clone()));
        }

        match event {
            Event::CanPlayThrough(_) => {
                if self.readiness == Readiness::Ready {
                    return Ok(());
                }

                debug!(track = %track, "source ready");
                self.readiness = Readiness::Ready;

                if store.playback().is_playing {
                    self.source.set_volume(store.playback().volume);
                    self.play()?;
                }
            }
            Event::TimeUpdate(_, reported) => {
                if self.seek.is_some() {
                    return Err(PlaybackError::StaleEvent(track.clone()));
                }

                let time = self.source.current_time();
                trace!(reported, time, "time update");
                store.dispatch(Intent::SetProgress(time));
            }
            Event::Ended(_) => {
                if store.is_last_track() {
                    info!(track = %track, "end of queue");
                    store.dispatch(Intent::PauseTrack);
                } else {
                    store.dispatch(Intent::PlayNextTrack);
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Moves the playhead while the user drags the position slider.
    /// Playback stays suspended until [`Self::commit_seek`].
    pub fn begin_seek(&mut self, store: &mut Store, position: f64) -> Result<(), PlaybackError> {
        if self.loaded.is_none() {
            return Err(PlaybackError::NoSource);
        }

        let mut position = if position.is_finite() {
            position.max(0.0)
        } else {
            0.0
        };
        if let Some(duration) = self.source.duration() {
            position = position.min(duration);
        }

        if self.seek.is_none() {
            self.seek = Some(SeekDrag {
                was_playing: store.playback().is_playing,
            });
        }

        store.dispatch(Intent::PauseTrack);
        self.reconcile();

        self.source.set_current_time(position);
        store.dispatch(Intent::SetProgress(position));

        Ok(())
    }

    /// Ends a drag. Returns whether playback was asked to resume.
    pub fn commit_seek(&mut self, store: &mut Store, policy: ResumePolicy) -> bool {
        let Some(drag) = self.seek.take() else {
            return false;
        };

        let resume = match policy {
            ResumePolicy::Always => true,
            ResumePolicy::IfWasPlaying => drag.was_playing,
        };

        if resume {
            store.dispatch(Intent::ResumeTrack);
        }

        resume
    }
}
