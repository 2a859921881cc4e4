//! Frame clock: turns animation-frame timestamps into normalized dt

use crate::consts::{FRAME_MS, MAX_DT};

/// Normalizes wall-clock frame gaps so 1.0 is one 60 Hz frame
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// dt for the frame at `now_ms`, clamped to [0, MAX_DT].
    ///
    /// The first frame counts as one normal frame.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / FRAME_MS as f64) as f32,
            None => 1.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, MAX_DT)
        } else {
            0.0
        }
    }

    /// Forget the last timestamp (after a long suspension)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_first_frame_is_one() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(12345.0), 1.0);
    }

    #[test]
    fn test_normal_frame() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let dt = clock.advance(FRAME_MS as f64);
        assert!((dt - 1.0).abs() < 1e-5);
        let dt = clock.advance(FRAME_MS as f64 * 1.5);
        assert!((dt - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_long_stall_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(60_000.0), MAX_DT);
    }

    #[test]
    fn test_reset_restarts_at_one() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(90_000.0), 1.0);
    }

    proptest! {
        #[test]
        fn prop_dt_in_range(stamps in proptest::collection::vec(-1.0e6f64..1.0e6, 1..50)) {
            let mut clock = FrameClock::new();
            for t in stamps {
                let dt = clock.advance(t);
                prop_assert!((0.0..=MAX_DT).contains(&dt));
            }
        }
    }
}
