/// Remembers the last audible volume so mute can be toggled off again.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MuteMemory {
    remembered: Option<f64>,
}

impl MuteMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the volume to apply after toggling mute from `current`.
    pub fn toggle(&mut self, current: f64) -> f64 {
        if current != 0.0 {
            self.remembered = Some(current);
            0.0
        } else {
            self.remembered.unwrap_or(0.0)
        }
    }

    /// Records a direct volume change so that dragging the slider to zero
    /// still leaves something to restore.
    pub fn observe(&mut self, previous: f64, next: f64) {
        if next == 0.0 && previous != 0.0 {
            self.remembered = Some(previous);
        }
    }

    pub fn remembered(&self) -> Option<f64> {
        self.remembered
    }
}
