//! CPU rasterization of countdown frames.
//!
//! [`composer::FrameComposer`] owns the `vello_cpu` context and the text layout engines; the
//! remaining modules are small pure helpers for geometry and frame buffers.

/// Frame composition on the `vello_cpu` raster surface.
pub mod composer;
/// Owned RGBA frame buffers.
pub mod frame;
/// Cell placement on the canvas.
pub mod layout;
/// Vector paths for cell backdrops.
pub mod shapes;
