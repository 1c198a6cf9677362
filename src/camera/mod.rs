//! Camera system for 3D scene viewing.
//!
//! A perspective [`Camera`](core::Camera) positioned each frame by
//! [`OrbitControls`](orbit::OrbitControls).

/// Core camera struct and GPU uniform types.
pub mod core;
/// Damped orbit/pan/zoom around a pivot.
pub mod orbit;
