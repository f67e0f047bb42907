//! CPU frame rendering.
//!
//! [`renderer::FrameRenderer`] turns a [`crate::RenderConfig`] and a timestamp into an RGB frame.

/// RGB frame buffers.
pub mod frame;
/// Frame renderer and one-shot helpers.
pub mod renderer;
pub(crate) mod segments;
/// Font resolution and readout layout.
pub mod text;
