//! Coordinate and size types shared by the runtime and the renderer.
//!
//! Sizes are physical pixels of the drawable surface, which may differ from
//! the logical window size on high-density displays.

mod color;
mod framebuffer;

pub use color::ColorRgba;
pub use framebuffer::FramebufferSize;
