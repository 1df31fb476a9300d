use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use flume::Sender;
use futures::{FutureExt, future};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{
    audio::{
        config::PlayerConfig,
        error::PlayError,
        traits::{MediaSource, PlayOutcome},
        track::TrackId,
    },
    event::events::Event,
};

#[derive(Debug, Default)]
struct Clock {
    track: Option<TrackId>,
    position: f64,
    duration: Option<f64>,
    playing: bool,
    volume: f64,
}

/// Media source that plays silence on a virtual clock. Buffering takes
/// `buffer_delay`, after which the track advances one `tick_interval` per
/// tick while playing.
pub struct SimulatedSource {
    clock: Arc<Mutex<Clock>>,
    event_tx: Sender<Event>,
    buffer_delay: Duration,
    tick_interval: Duration,
    track_duration: f64,
    task: Option<JoinHandle<()>>,
}

impl SimulatedSource {
    pub fn new(event_tx: Sender<Event>, config: &PlayerConfig) -> Self {
        Self {
            clock: Arc::new(Mutex::new(Clock::default())),
            event_tx,
            buffer_delay: config.buffer_delay,
            tick_interval: config.tick_interval,
            track_duration: config.default_duration_secs,
            task: None,
        }
    }

    #[cfg(test)]
    pub fn volume(&self) -> f64 {
        self.clock.lock().map(|c| c.volume).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.clock.lock().map(|c| c.playing).unwrap_or_default()
    }

    fn stop_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl MediaSource for SimulatedSource {
    fn load(&mut self, track: &TrackId, uri: &str) {
        self.stop_task();

        if let Ok(mut clock) = self.clock.lock() {
            clock.track = Some(track.clone());
            clock.position = 0.0;
            clock.duration = None;
            clock.playing = false;
        }

        let clock = self.clock.clone();
        let event_tx = self.event_tx.clone();
        let track = track.clone();
        let uri = uri.to_string();
        let buffer_delay = self.buffer_delay;
        let tick_interval = self.tick_interval;
        let track_duration = self.track_duration;

        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(buffer_delay).await;

            if let Ok(mut clock) = clock.lock() {
                clock.duration = Some(track_duration);
                debug!(track = %track, uri = %uri, volume = clock.volume, "buffered");
            }

            if event_tx
                .send_async(Event::CanPlayThrough(track.clone()))
                .await
                .is_err()
            {
                return;
            }

            let mut interval = tokio::time::interval(tick_interval);
            interval.tick().await;

            loop {
                interval.tick().await;

                let tick = {
                    let Ok(mut clock) = clock.lock() else {
                        return;
                    };
                    if !clock.playing {
                        continue;
                    }

                    let duration = clock.duration.unwrap_or(track_duration);
                    clock.position = (clock.position + tick_interval.as_secs_f64()).min(duration);
                    let ended = clock.position >= duration;
                    if ended {
                        clock.playing = false;
                    }
                    (clock.position, ended)
                };

                let (position, ended) = tick;
                if event_tx
                    .send_async(Event::TimeUpdate(track.clone(), position))
                    .await
                    .is_err()
                {
                    return;
                }

                if ended
                    && event_tx
                        .send_async(Event::Ended(track.clone()))
                        .await
                        .is_err()
                {
                    return;
                }
            }
        }));
    }

    fn play(&mut self) -> PlayOutcome {
        let result = match self.clock.lock() {
            Ok(mut clock) => {
                if clock.track.is_none() {
                    Err(PlayError::NothingLoaded)
                } else if clock.duration.is_none() {
                    Err(PlayError::Media("still buffering".to_string()))
                } else {
                    // An ended track starts over.
                    if clock.duration.is_some_and(|d| clock.position >= d) {
                        clock.position = 0.0;
                    }
                    clock.playing = true;
                    Ok(())
                }
            }
            Err(_) => Err(PlayError::Media("clock unavailable".to_string())),
        };

        future::ready(result).boxed()
    }

    fn pause(&mut self) {
        if let Ok(mut clock) = self.clock.lock() {
            clock.playing = false;
        }
    }

    fn current_time(&self) -> f64 {
        self.clock.lock().map(|c| c.position).unwrap_or_default()
    }

    fn set_current_time(&mut self, time: f64) {
        if let Ok(mut clock) = self.clock.lock() {
            let upper = clock.duration.unwrap_or(f64::MAX);
            clock.position = time.clamp(0.0, upper);
        }
    }

    fn duration(&self) -> Option<f64> {
        self.clock.lock().ok().and_then(|c| c.duration)
    }

    fn set_volume(&mut self, volume: f64) {
        if let Ok(mut clock) = self.clock.lock() {
            clock.volume = volume;
        }
    }
}

impl Drop for SimulatedSource {
    fn drop(&mut self) {
        self.stop_task();
    }
}
