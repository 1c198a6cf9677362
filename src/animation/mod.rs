//! Time-based property animation.
//!
//! A [`Tween`] eases one scalar from a start value to a target over a fixed
//! duration. The [`TweenScheduler`] keeps at most one tween per
//! [`TweenProperty`] and is advanced once per frame by the frame loop.

pub mod scheduler;
pub mod tween;

pub use scheduler::{TweenProperty, TweenScheduler};
pub use tween::{Tween, TweenSample};
