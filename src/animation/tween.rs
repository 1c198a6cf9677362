//! A single eased scalar interpolation.

use web_time::{Duration, Instant};

use crate::util::easing::EasingFunction;

/// Interpolates one scalar from `from` to `to` over `duration`.
///
/// Sampling before the start returns `from`; sampling at or after the end
/// returns exactly `to`, so a finished tween never leaves rounding error
/// behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: EasingFunction,
}

/// Value of a tween at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    /// Interpolated value.
    pub value: f32,
    /// Whether the tween has reached its target.
    pub finished: bool,
}

impl Tween {
    /// A tween starting at `start`.
    #[must_use]
    pub fn new(
        from: f32,
        to: f32,
        start: Instant,
        duration: Duration,
        easing: EasingFunction,
    ) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            easing,
        }
    }

    /// Normalized progress in `[0, 1]` at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Sample the tween at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> TweenSample {
        let t = self.progress(now);
        if t >= 1.0 {
            return TweenSample {
                value: self.to,
                finished: true,
            };
        }
        let eased = self.easing.evaluate(t);
        TweenSample {
            value: self.from + (self.to - self.from) * eased,
            finished: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    const SECOND: Duration = Duration::from_millis(1000);

    #[test]
    fn settles_exactly_on_target() {
        let start = Instant::now();
        let tween = Tween::new(0.3, PI, start, SECOND, EasingFunction::QuadraticOut);
        let end = tween.sample(start + SECOND);
        assert!(end.finished);
        assert_eq!(end.value, PI);
        assert_eq!(tween.sample(start + Duration::from_secs(5)).value, PI);
    }

    #[test]
    fn starts_at_origin() {
        let start = Instant::now();
        let tween = Tween::new(1.0, 2.0, start, SECOND, EasingFunction::Linear);
        let s = tween.sample(start);
        assert_eq!(s.value, 1.0);
        assert!(!s.finished);
    }

    #[test]
    fn quadratic_out_never_overshoots() {
        let start = Instant::now();
        let tween = Tween::new(PI, 0.0, start, SECOND, EasingFunction::QuadraticOut);
        let mut prev = PI;
        for ms in (0..=1000).step_by(20) {
            let v = tween.sample(start + Duration::from_millis(ms)).value;
            assert!(v <= prev, "not monotonic at {ms}ms");
            assert!(v >= 0.0, "overshot at {ms}ms: {v}");
            prev = v;
        }
        assert_eq!(prev, 0.0);
    }

    #[test]
    fn halfway_follows_easing() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 4.0, start, SECOND, EasingFunction::QuadraticOut);
        let half = tween.sample(start + Duration::from_millis(500)).value;
        assert!((half - 3.0).abs() < 1e-4, "{half}");
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let start = Instant::now();
        let tween = Tween::new(0.0, 1.0, start, Duration::ZERO, EasingFunction::Linear);
        assert_eq!(
            tween.sample(start),
            TweenSample {
                value: 1.0,
                finished: true
            }
        );
    }
}
