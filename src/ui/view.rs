use crate::{audio::track::TrackId, util::time::format_time};

/// Fallback slider range while the source has not reported a duration.
pub const DEFAULT_PROGRESS_MAX: f64 = 100.0;

/// Everything the player bar needs to draw itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub track_id: TrackId,
    pub title: String,
    pub artist: String,
    pub cover_image: Option<String>,
    pub is_playing: bool,
    pub volume: f64,
    pub is_muted: bool,
    pub progress: f64,
    pub duration: Option<f64>,
    pub can_go_previous: bool,
    pub can_go_next: bool,
}

impl PlayerView {
    pub fn progress_max(&self) -> f64 {
        self.duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(DEFAULT_PROGRESS_MAX)
    }

    pub fn progress_ratio(&self) -> f64 {
        (self.progress / self.progress_max()).clamp(0.0, 1.0)
    }

    pub fn elapsed_label(&self) -> String {
        format_time(Some(self.progress))
    }

    pub fn duration_label(&self) -> String {
        format_time(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_view(progress: f64, duration: Option<f64>) -> PlayerView {
        PlayerView {
            track_id: "a".into(),
            title: "Song".to_string(),
            artist: "Band".to_string(),
            cover_image: None,
            is_playing: true,
            volume: 0.5,
            is_muted: false,
            progress,
            duration,
            can_go_previous: false,
            can_go_next: true,
        }
    }

    #[test]
    fn test_progress_max_falls_back_without_duration() {
        let view = create_test_view(25.0, None);
        assert_eq!(view.progress_max(), DEFAULT_PROGRESS_MAX);
        assert_eq!(view.progress_ratio(), 0.25);
        assert_eq!(view.duration_label(), "00:00");
    }

    #[test]
    fn test_ratio_is_clamped() {
        let view = create_test_view(500.0, Some(200.0));
        assert_eq!(view.progress_ratio(), 1.0);
        assert_eq!(view.elapsed_label(), "08:20");
        assert_eq!(view.duration_label(), "03:20");
    }
}
