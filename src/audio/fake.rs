use std::sync::{Arc, Mutex};

use futures::{FutureExt, future};

use crate::audio::{
    error::PlayError,
    traits::{MediaSource, PlayOutcome},
    track::TrackId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SourceCall {
    Load(TrackId, String),
    Play,
    Pause,
    Seek(f64),
    Volume(f64),
}

#[derive(Default)]
struct Inner {
    calls: Vec<SourceCall>,
    time: f64,
    duration: Option<f64>,
    reject: Option<PlayError>,
}

/// Recording media source. Clones share the same recording so a test can
/// keep one while the synchronizer owns the other.
#[derive(Clone, Default)]
pub struct FakeSource {
    inner: Arc<Mutex<Inner>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<SourceCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn play_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == SourceCall::Play)
            .count()
    }

    pub fn last_volume(&self) -> Option<f64> {
        self.calls().iter().rev().find_map(|c| match c {
            SourceCall::Volume(v) => Some(*v),
            _ => None,
        })
    }

    pub fn set_duration(&self, duration: f64) {
        self.inner.lock().unwrap().duration = Some(duration);
    }

    /// Moves the playhead without recording a seek, as natural playback would.
    pub fn advance_to(&self, time: f64) {
        self.inner.lock().unwrap().time = time;
    }

    pub fn reject_play(&self, err: PlayError) {
        self.inner.lock().unwrap().reject = Some(err);
    }
}

impl MediaSource for FakeSource {
    fn load(&mut self, track: &TrackId, uri: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(SourceCall::Load(track.clone(), uri.to_string()));
        inner.time = 0.0;
        inner.duration = None;
    }

    fn play(&mut self) -> PlayOutcome {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(SourceCall::Play);
        match inner.reject.clone() {
            Some(err) => future::ready(Err(err)).boxed(),
            None => future::ready(Ok(())).boxed(),
        }
    }

    fn pause(&mut self) {
        self.inner.lock().unwrap().calls.push(SourceCall::Pause);
    }

    fn current_time(&self) -> f64 {
        self.inner.lock().unwrap().time
    }

    fn set_current_time(&mut self, time: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(SourceCall::Seek(time));
        inner.time = time;
    }

    fn duration(&self) -> Option<f64> {
        self.inner.lock().unwrap().duration
    }

    fn set_volume(&mut self, volume: f64) {
        self.inner
            .lock()
            .unwrap()
            .calls
            .push(SourceCall::Volume(volume));
    }
}
