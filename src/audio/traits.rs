use futures::future::BoxFuture;

use crate::audio::{error::PlayError, track::TrackId};

/// Deferred result of a play request. Resolves once the source has actually
/// started or refused to start.
pub type PlayOutcome = BoxFuture<'static, Result<(), PlayError>>;

/// A controllable audio element. Implementations report readiness, time
/// updates and end-of-media as [`crate::event::events::Event`]s tagged with
/// the track passed to [`MediaSource::load`].
pub trait MediaSource: Send {
    fn load(&mut self, track: &TrackId, uri: &str);
    fn play(&mut self) -> PlayOutcome;
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, time: f64);
    /// Unknown until the source is ready.
    fn duration(&self) -> Option<f64>;
    fn set_volume(&mut self, volume: f64);
}
