use std::{str::FromStr, time::Duration};

use tracing::warn;

/// What a committed seek does to playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumePolicy {
    /// Resume on every commit, even if playback was paused before the drag.
    #[default]
    Always,
    IfWasPlaying,
}

impl FromStr for ResumePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "if-was-playing" | "if_was_playing" => Ok(Self::IfWasPlaying),
            other => Err(format!("unknown resume policy `{other}`")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub volume: f64,
    pub volume_step: f64,
    pub seek_step_secs: f64,
    pub resume_policy: ResumePolicy,
    pub buffer_delay: Duration,
    pub tick_interval: Duration,
    pub default_duration_secs: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            volume_step: 0.05,
            seek_step_secs: 5.0,
            resume_policy: ResumePolicy::Always,
            buffer_delay: Duration::from_millis(300),
            tick_interval: Duration::from_millis(250),
            default_duration_secs: 180.0,
        }
    }
}

impl PlayerConfig {
    /// Reads `PLAYSYNC_*` variables, keeping the default for anything unset
    /// or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            volume: read(&lookup, "PLAYSYNC_VOLUME", defaults.volume).clamp(0.0, 1.0),
            volume_step: read(&lookup, "PLAYSYNC_VOLUME_STEP", defaults.volume_step),
            seek_step_secs: read(&lookup, "PLAYSYNC_SEEK_STEP", defaults.seek_step_secs),
            resume_policy: read(&lookup, "PLAYSYNC_RESUME_POLICY", defaults.resume_policy),
            buffer_delay: Duration::from_millis(read(
                &lookup,
                "PLAYSYNC_BUFFER_DELAY_MS",
                defaults.buffer_delay.as_millis() as u64,
            )),
            tick_interval: Duration::from_millis(
                read(
                    &lookup,
                    "PLAYSYNC_TICK_MS",
                    defaults.tick_interval.as_millis() as u64,
                )
                .max(1),
            ),
            default_duration_secs: read(
                &lookup,
                "PLAYSYNC_TRACK_SECS",
                defaults.default_duration_secs,
            ),
        }
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Ignoring {key}={raw}: {e}");
            default
        }),
        None => default,
    }
}
