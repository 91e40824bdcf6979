use winit::dpi::PhysicalSize;

/// Why no surface image could be acquired for this frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AcquireFailure {
    /// The swapchain was lost or outdated and has been configured again.
    Reconfigured,
    /// Timeout or an unspecified surface hiccup.
    Transient,
    /// The surface cannot allocate images any more.
    OutOfMemory,
}

/// wgpu rejects a 0x0 surface configuration.
pub(crate) fn is_configurable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if formats.is_empty() {
        return None;
    }

    if prefer_srgb {
        let preferred = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in preferred {
            if formats.contains(&f) {
                return Some(f);
            }
        }
    }

    Some(formats[0])
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// FIFO is guaranteed by every backend, so it is the fallback.
pub(crate) fn choose_present_mode(
    supported: &[wgpu::PresentMode],
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if supported.contains(&requested) {
        requested
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Tracks `new_size`; an empty size defers configuration to the next resize.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if !is_configurable(new_size) {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;

    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> AcquireFailure {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
            if is_configurable(size) {
                surface.configure(device, config);
            }
            AcquireFailure::Reconfigured
        }
        wgpu::SurfaceError::OutOfMemory => AcquireFailure::OutOfMemory,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => AcquireFailure::Transient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, PresentMode, TextureFormat};

    #[test]
    fn empty_sizes_are_not_configurable() {
        assert!(is_configurable(PhysicalSize::new(640, 480)));
        assert!(!is_configurable(PhysicalSize::new(640, 0)));
        assert!(!is_configurable(PhysicalSize::new(0, 480)));
        assert!(!is_configurable(PhysicalSize::new(0, 0)));
    }

    #[test]
    fn srgb_format_preferred_when_available() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, true),
            Some(TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn first_format_used_without_srgb_preference() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats, false),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn no_formats_means_no_surface() {
        assert_eq!(choose_surface_format(&[], true), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back_to_first_supported() {
        let supported = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let supported = [PresentMode::Fifo];
        assert_eq!(
            choose_present_mode(&supported, PresentMode::Mailbox),
            PresentMode::Fifo
        );
    }

    #[test]
    fn supported_present_mode_is_kept() {
        let supported = [PresentMode::Fifo, PresentMode::Immediate];
        assert_eq!(
            choose_present_mode(&supported, PresentMode::Immediate),
            PresentMode::Immediate
        );
    }
}
