//! Zoom buttons
//!
//! The control owns the UI clamp policy. The layout engine itself accepts any
//! positive multiplier.

/// Step-wise zoom level in `[min, max]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomControl {
    level: f64,
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomControl {
    fn default() -> Self {
        Self {
            level: 1.0,
            step: 0.2,
            min: 0.5,
            max: 3.0,
        }
    }
}

impl ZoomControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set(self.level + self.step)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set(self.level - self.step)
    }

    pub fn reset(&mut self) -> f64 {
        self.set(1.0)
    }

    /// Store a level chosen outside the buttons, unclamped
    pub fn jump_to(&mut self, level: f64) {
        self.level = level;
    }

    /// Clamp and store a level, returning the value actually applied
    pub fn set(&mut self, level: f64) -> f64 {
        // Hundredths keep repeated steps from drifting (1.0 + 0.2 + 0.2 == 1.4)
        let rounded = (level * 100.0).round() / 100.0;
        self.level = rounded.clamp(self.min, self.max);
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_do_not_drift() {
        let mut zoom = ZoomControl::new();
        zoom.zoom_in();
        zoom.zoom_in();
        assert_eq!(zoom.level(), 1.4);
        zoom.zoom_out();
        assert_eq!(zoom.level(), 1.2);
    }

    #[test]
    fn clamped_to_bounds() {
        let mut zoom = ZoomControl::new();
        for _ in 0..20 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.level(), 3.0);
        for _ in 0..20 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.level(), 0.5);
        assert_eq!(zoom.reset(), 1.0);
    }

    #[test]
    fn buttons_pull_an_external_level_back_in_range() {
        let mut zoom = ZoomControl::new();
        zoom.jump_to(5.0);
        assert_eq!(zoom.level(), 5.0);
        assert_eq!(zoom.zoom_out(), 3.0);
    }
}
