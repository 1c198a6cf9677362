//! Owns the in-flight tweens and advances them once per frame.

use web_time::Instant;

use super::tween::Tween;

/// A scalar the scheduler can animate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweenProperty {
    /// Model rotation about Y.
    ModelYaw,
}

/// In-flight tweens, at most one per property.
///
/// Starting a tween on a property that is already animating replaces the
/// old tween, so two requests never fight over the same value.
#[derive(Debug, Default)]
pub struct TweenScheduler {
    active: Vec<(TweenProperty, Tween)>,
}

impl TweenScheduler {
    /// An empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tween` on `property`, cancelling any tween already driving
    /// it. Returns `true` if a tween was replaced.
    pub fn start(&mut self, property: TweenProperty, tween: Tween) -> bool {
        if let Some(slot) = self.active.iter_mut().find(|(p, _)| *p == property)
        {
            slot.1 = tween;
            return true;
        }
        self.active.push((property, tween));
        false
    }

    /// Whether nothing is animating.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Sample every tween at `now`, hand each value to `apply`, and drop
    /// the tweens that have finished.
    pub fn update(
        &mut self,
        now: Instant,
        mut apply: impl FnMut(TweenProperty, f32),
    ) {
        self.active.retain(|(property, tween)| {
            let sample = tween.sample(now);
            apply(*property, sample.value);
            !sample.finished
        });
    }
}
