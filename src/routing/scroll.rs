//! Scroll-to-top animation played after every navigation
//!
//! Purely cosmetic: the only guarantee is that the offset reaches 0 once the
//! duration has elapsed.

use serde::Serialize;
use std::time::Duration;

/// Default length of the scroll reset.
pub const DEFAULT_SCROLL_DURATION: Duration = Duration::from_millis(1500);

/// Cubic ease-in-out over `t` in `[0, 1]` (clamped)
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollAnimation {
    pub start_offset: f64,
    pub duration: Duration,
}

impl ScrollAnimation {
    pub fn new(start_offset: f64) -> Self {
        Self::with_duration(start_offset, DEFAULT_SCROLL_DURATION)
    }

    pub fn with_duration(start_offset: f64, duration: Duration) -> Self {
        Self {
            start_offset: start_offset.max(0.0),
            duration,
        }
    }

    /// Vertical offset `elapsed` into the animation
    pub fn offset_at(&self, elapsed: Duration) -> f64 {
        self.start_offset * (1.0 - ease_in_out_cubic(self.progress(elapsed)))
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Offsets sampled every `step`, always ending with the final 0
    pub fn frames(&self, step: Duration) -> Vec<f64> {
        let mut frames = Vec::new();
        if !step.is_zero() {
            let mut elapsed = Duration::ZERO;
            while elapsed < self.duration {
                frames.push(self.offset_at(elapsed));
                elapsed += step;
            }
        }
        frames.push(self.offset_at(self.duration));
        frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_out_cubic(7.0), 1.0);
    }

    #[test]
    fn test_easing_is_monotonic() {
        let samples: Vec<f64> = (0..=100).map(|i| ease_in_out_cubic(i as f64 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_animation_reaches_top() {
        let animation = ScrollAnimation::new(1200.0);

        assert_eq!(animation.offset_at(Duration::ZERO), 1200.0);
        assert_eq!(animation.offset_at(Duration::from_millis(750)), 600.0);
        assert_eq!(animation.offset_at(DEFAULT_SCROLL_DURATION), 0.0);
        assert_eq!(animation.offset_at(Duration::from_secs(10)), 0.0);
        assert!(!animation.is_finished(Duration::from_millis(1499)));
        assert!(animation.is_finished(DEFAULT_SCROLL_DURATION));
    }

    #[test]
    fn test_frames_end_at_zero() {
        let animation = ScrollAnimation::with_duration(500.0, Duration::from_millis(100));
        let frames = animation.frames(Duration::from_millis(10));

        assert_eq!(frames.len(), 11);
        assert_eq!(frames.first(), Some(&500.0));
        assert_eq!(frames.last(), Some(&0.0));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let animation = ScrollAnimation::with_duration(300.0, Duration::ZERO);
        assert_eq!(animation.offset_at(Duration::ZERO), 0.0);
        assert_eq!(animation.frames(Duration::from_millis(16)), vec![0.0]);
    }
}
