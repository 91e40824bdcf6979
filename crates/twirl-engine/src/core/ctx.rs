use anyhow::{anyhow, Result};
use glam::Mat4;
use winit::window::Window;

use crate::coords::{ColorRgba, FramebufferSize};
use crate::device::{AcquireFailure, Gpu, SurfaceFrame};
use crate::input::CloseFlag;
use crate::render::TriangleRenderer;
use crate::time::FrameTime;

use super::frame::{run_frame, FrameOutcome, FrameTarget};

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window:   &'a Window,
    pub gpu:      &'a mut Gpu<'w>,
    pub triangle: &'a TriangleRenderer,
    pub time:     FrameTime,
    pub close:    &'a mut CloseFlag,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Runs the frame procedure against the window surface.
    ///
    /// Clears with `clear`, draws the triangle at the current animation time
    /// and presents. Fails only when the surface is unusable.
    pub fn render(&mut self, clear: ColorRgba) -> Result<FrameOutcome> {
        let mut target = SurfaceTarget {
            window: self.window,
            gpu: &mut *self.gpu,
            triangle: self.triangle,
            frame: None,
        };

        match run_frame(&mut target, self.time.seconds(), clear) {
            FrameOutcome::Fatal => Err(anyhow!("surface is unusable (out of memory)")),
            outcome => Ok(outcome),
        }
    }
}

/// `FrameTarget` over the wgpu surface of one window.
struct SurfaceTarget<'a, 'w> {
    window:   &'a Window,
    gpu:      &'a mut Gpu<'w>,
    triangle: &'a TriangleRenderer,
    frame:    Option<SurfaceFrame>,
}

impl FrameTarget for SurfaceTarget<'_, '_> {
    fn framebuffer_size(&self) -> FramebufferSize {
        self.window.inner_size().into()
    }

    fn acquire(&mut self, size: FramebufferSize) -> Result<(), AcquireFailure> {
        if FramebufferSize::from(self.gpu.size()) != size {
            log::debug!("framebuffer resized to {}x{}", size.width, size.height);
            self.gpu.resize(size.into());
        }

        let frame = self.gpu.begin_frame().inspect_err(|failure| {
            log::warn!("failed to acquire surface texture: {failure:?}");
        })?;
        self.frame = Some(frame);
        Ok(())
    }

    fn clear(&mut self, color: ColorRgba) {
        let Some(frame) = self.frame.as_mut() else { return };

        // The pass only clears; it ends when dropped.
        let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label:             Some("twirl clear"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view:           &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load:  wgpu::LoadOp::Clear(color.into()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes:         None,
            occlusion_query_set:      None,
            multiview_mask:           None,
        });
    }

    fn draw(&mut self, transform: &Mat4, size: FramebufferSize) {
        let Some(frame) = self.frame.as_mut() else { return };

        self.triangle.draw(
            self.gpu.queue(),
            &mut frame.encoder,
            &frame.view,
            transform,
            size,
        );
    }

    fn present(&mut self) {
        let Some(frame) = self.frame.take() else { return };

        self.window.pre_present_notify();
        self.gpu.present(frame);
    }
}
