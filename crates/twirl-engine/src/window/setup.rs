use std::time::Instant;

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{Gpu, GpuInit, HostError, HostErrorQueue};
use crate::input::{CloseFlag, KeyEvent};
use crate::render::TriangleRenderer;
use crate::time::{AnimationClock, FrameTime};

use super::RuntimeConfig;

/// Window and the GPU context bound to it.
///
/// The surface borrows the window, so both live in one self-referencing cell;
/// the GPU side is dropped before the window.
#[self_referencing]
pub(super) struct WindowSurface {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

/// Everything the setup stage produces for the frame loop.
///
/// Field order is drop order: GPU resources go before the window.
pub(super) struct Stage {
    pub(super) triangle: TriangleRenderer,
    pub(super) surface: WindowSurface,
    pub(super) clock: AnimationClock,
    pub(super) close: CloseFlag,
}

impl Stage {
    pub(super) fn window_id(&self) -> WindowId {
        self.surface.borrow_window().id()
    }

    pub(super) fn request_redraw(&self) {
        self.surface.borrow_window().request_redraw();
    }

    pub(super) fn dispatch_key<A: App>(&mut self, app: &mut A, event: &KeyEvent) {
        app.on_key(event, &mut self.close);
    }

    /// Ticks the clock and hands one frame to the app.
    pub(super) fn frame<A: App>(&mut self, app: &mut A) -> (FrameTime, Result<AppControl>) {
        let Stage {
            triangle,
            surface,
            clock,
            close,
        } = self;

        let time = clock.tick();
        let result = surface.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: fields.window,
                gpu: fields.gpu,
                triangle,
                time,
                close,
            };
            app.on_frame(&mut ctx)
        });

        (time, result)
    }
}

/// One-time acquisition of the window, GPU context and triangle program.
///
/// Any failure here is fatal for the process; nothing is retried.
pub(super) fn initialize(
    event_loop: &ActiveEventLoop,
    config: &RuntimeConfig,
    gpu_init: GpuInit,
    host_errors: &HostErrorQueue,
    started: Instant,
) -> Result<Stage> {
    let attrs = Window::default_attributes()
        .with_title(config.title.clone())
        .with_inner_size(config.initial_size);

    let window = event_loop
        .create_window(attrs)
        .context("failed to create window")?;

    let errors = host_errors.clone();
    let surface = WindowSurfaceTryBuilder {
        window,
        gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init, errors)),
    }
    .try_build()
    .context("failed to initialize GPU for window")?;

    let (triangle, link_error) = surface.with_gpu(|gpu| {
        let format = gpu.surface_format();
        gpu.with_validation(|device| TriangleRenderer::new(device, format))
    });
    let triangle = triangle.context("failed to build triangle program")?;
    check_link(link_error)?;

    Ok(Stage {
        triangle,
        surface,
        clock: AnimationClock::starting_at(started),
        close: CloseFlag::new(),
    })
}

/// Fails setup if building the pipeline raised a validation error.
fn check_link(error: Option<HostError>) -> Result<()> {
    match error {
        Some(err) => anyhow::bail!("triangle program failed to link: {err}"),
        None => Ok(()),
    }
}
