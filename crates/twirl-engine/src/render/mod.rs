//! GPU rendering subsystem.
//!
//! One renderer, one pipeline: the colored triangle. Geometry is in clip
//! space already; the vertex shader applies the per-frame transform uniform.

mod error;
pub mod mesh;
pub mod transform;
mod triangle;

pub use error::ShaderCompileError;
pub use triangle::TriangleRenderer;
