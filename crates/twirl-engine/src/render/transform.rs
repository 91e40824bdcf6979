//! Per-frame transform math.
//!
//! Pure functions of `(elapsed seconds, aspect ratio)`: no clock reads, no GPU
//! state. The result is `projection * rotation` in wgpu clip space.

use glam::{Mat4, Vec3};

/// The triangle spins about the negative X axis.
pub const ROTATION_AXIS: Vec3 = Vec3::NEG_X;

pub const NEAR: f32 = 1.0;
pub const FAR: f32 = -1.0;

/// Orthographic view volume for a given aspect ratio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl OrthoBounds {
    /// `(-aspect, aspect, -1, 1)` with the fixed near/far planes.
    pub fn for_aspect(aspect: f32) -> Self {
        Self {
            left: -aspect,
            right: aspect,
            bottom: -1.0,
            top: 1.0,
            near: NEAR,
            far: FAR,
        }
    }

    /// Projection matrix mapping the volume to clip space.
    ///
    /// Depth lands in `[0, 1]`, so the rotated triangle (|z| <= 0.6) is never
    /// clipped by the near/far planes.
    pub fn projection(&self) -> Mat4 {
        Mat4::orthographic_rh(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }
}

/// Rotation of `angle` radians about [`ROTATION_AXIS`].
pub fn rotation(angle: f32) -> Mat4 {
    Mat4::from_axis_angle(ROTATION_AXIS, angle)
}

/// Transform for one frame. The angle in radians is the elapsed time in seconds.
pub fn frame_transform(seconds: f32, aspect: f32) -> Mat4 {
    OrthoBounds::for_aspect(aspect).projection() * rotation(seconds)
}
