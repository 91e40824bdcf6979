use winit::dpi::PhysicalSize;

/// Drawable surface size in physical pixels.
///
/// Re-read from the window every frame; nothing caches it across frames.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FramebufferSize {
    pub width: u32,
    pub height: u32,
}

impl FramebufferSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero (minimized window, mid-resize).
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width over height, or `None` for an empty surface.
    pub fn aspect_ratio(self) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        Some(self.width as f32 / self.height as f32)
    }
}

impl From<PhysicalSize<u32>> for FramebufferSize {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

impl From<FramebufferSize> for PhysicalSize<u32> {
    fn from(size: FramebufferSize) -> Self {
        PhysicalSize::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_of_default_window() {
        let aspect = FramebufferSize::new(640, 480).aspect_ratio();
        let aspect = aspect.expect("non-empty surface has an aspect ratio");
        assert!((aspect - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_has_no_aspect_ratio() {
        assert!(FramebufferSize::new(640, 0).is_empty());
        assert_eq!(FramebufferSize::new(640, 0).aspect_ratio(), None);
    }

    #[test]
    fn zero_width_has_no_aspect_ratio() {
        assert_eq!(FramebufferSize::new(0, 480).aspect_ratio(), None);
    }

    #[test]
    fn converts_from_winit_size() {
        let size: FramebufferSize = PhysicalSize::new(1280u32, 720u32).into();
        assert_eq!(size, FramebufferSize::new(1280, 720));
    }
}
