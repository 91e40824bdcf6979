use std::sync::Arc;

use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::{self, AcquireFailure};
use super::{GpuInit, HostError, HostErrorQueue};

/// Swapchain image acquired for one frame plus the encoder recording into it.
///
/// Holding it blocks the next acquire; hand it back through [`Gpu::present`].
pub struct SurfaceFrame {
    pub image: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

/// Owns wgpu core objects and the surface configuration.
///
/// This type is the low-level rendering context:
/// - creates and stores Instance/Adapter/Device/Queue
/// - creates and configures the Surface (swapchain)
/// - acquires frames and presents them after submission
pub struct Gpu<'w> {
    /// wgpu instance used to create the adapter and surface.
    _instance: wgpu::Instance,

    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the runtime keeps the window
    /// alive for as long as the `Gpu` exists.
    surface: wgpu::Surface<'w>,

    /// Selected adapter.
    _adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Errors the device reports outside a call's return value are pushed to
    /// `host_errors`. A window that starts out empty (minimized) leaves the
    /// surface unconfigured until its first non-empty resize.
    pub async fn new(window: &'w Window, init: GpuInit, host_errors: HostErrorQueue) -> Result<Self> {
        let size = window.inner_size();

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            required_limits,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let info = adapter.get_info();
        log::info!("adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("twirl device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            host_errors.push(HostError::from(&err));
        }));

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, alpha_mode);
        let present_mode = surface::choose_present_mode(&caps.present_modes, present_mode);

        log::info!(
            "surface: {}x{} {:?}, present mode {:?}",
            size.width,
            size.height,
            format,
            present_mode
        );

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        if surface::is_configurable(size) {
            surface.configure(&device, &config);
        } else {
            log::debug!("window is empty; surface configuration deferred");
        }

        Ok(Self {
            _instance: instance,
            surface,
            _adapter: adapter,
            device,
            queue,
            config,
            size,
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the size the surface was last configured for (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Runs `build` inside a validation error scope on the device.
    ///
    /// Returns the first validation error raised by `build` itself; errors
    /// from earlier calls stay with the uncaptured-error handler.
    pub fn with_validation<T>(&self, build: impl FnOnce(&wgpu::Device) -> T) -> (T, Option<HostError>) {
        let scope = self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = build(&self.device);
        let error = pollster::block_on(scope.pop());
        (value, error.as_ref().map(HostError::from))
    }

    /// Reconfigures the surface for a new framebuffer size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    /// Acquires the next swapchain image and opens an encoder for it.
    ///
    /// A lost or outdated surface is configured again before the failure is
    /// returned, so the following frame can acquire normally.
    pub fn begin_frame(&mut self) -> std::result::Result<SurfaceFrame, AcquireFailure> {
        let image = match self.surface.get_current_texture() {
            Ok(image) => image,
            Err(err) => {
                return Err(surface::map_surface_error(
                    &self.surface,
                    &self.device,
                    &self.config,
                    self.size,
                    err,
                ));
            }
        };

        let view = image
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("twirl frame encoder"),
            });

        Ok(SurfaceFrame { image, view, encoder })
    }

    /// Submits everything recorded for `frame`, then shows its image.
    pub fn present(&self, frame: SurfaceFrame) {
        let SurfaceFrame { image, view, encoder } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        image.present();
    }
}
