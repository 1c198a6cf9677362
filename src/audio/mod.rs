//! Background music: playback state and the output backend.
//!
//! [`AudioController`] holds the play/pause flag and the volume and drives
//! an [`AudioOutput`]. The `rodio` backend is compiled with the `audio`
//! feature; without it the controller still works but no output is ever
//! attached, so the music controls stay hidden.

pub mod controller;
#[cfg(feature = "audio")]
pub mod rodio_output;

pub use controller::{AudioController, AudioOutput};
#[cfg(feature = "audio")]
pub use rodio_output::RodioOutput;
