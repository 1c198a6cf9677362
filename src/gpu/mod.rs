//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization and the small amount of
//! shared pipeline boilerplate used by the scene passes.

/// Uniform bindings, depth targets and pipeline state helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
