use glam::Mat4;

use crate::coords::{ColorRgba, FramebufferSize};
use crate::device::AcquireFailure;
use crate::render::transform;

/// Graphics operations the frame procedure issues, in order.
///
/// Implemented over wgpu by the runtime and by recording fakes in tests.
pub trait FrameTarget {
    /// Current drawable size in physical pixels. Queried once per frame.
    fn framebuffer_size(&self) -> FramebufferSize;

    /// Prepares a surface image of `size` to render into.
    fn acquire(&mut self, size: FramebufferSize) -> Result<(), AcquireFailure>;

    /// Clears the color buffer.
    fn clear(&mut self, color: ColorRgba);

    /// Draws the triangle with `transform` over a `size` viewport.
    fn draw(&mut self, transform: &Mat4, size: FramebufferSize);

    /// Presents the finished image.
    fn present(&mut self);
}

/// Result of one pass through the frame procedure.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The frame was drawn and presented.
    Presented,
    /// Nothing was drawn: empty framebuffer or a transient surface problem.
    Skipped,
    /// The surface is unusable.
    Fatal,
}

/// Renders one frame: size → acquire → clear → transform → draw → present.
///
/// `seconds` is the elapsed animation time; it is the rotation angle in
/// radians. A zero-sized framebuffer skips the frame instead of dividing by
/// zero.
pub fn run_frame<T>(target: &mut T, seconds: f32, clear: ColorRgba) -> FrameOutcome
where
    T: FrameTarget + ?Sized,
{
    let size = target.framebuffer_size();
    let Some(aspect) = size.aspect_ratio() else {
        log::trace!("framebuffer is {}x{}; frame skipped", size.width, size.height);
        return FrameOutcome::Skipped;
    };

    match target.acquire(size) {
        Ok(()) => {}
        Err(AcquireFailure::OutOfMemory) => return FrameOutcome::Fatal,
        Err(failure) => {
            log::debug!("surface not ready ({failure:?}); frame skipped");
            return FrameOutcome::Skipped;
        }
    }

    target.clear(clear);

    let mvp = transform::frame_transform(seconds, aspect);
    target.draw(&mvp, size);

    target.present();

    FrameOutcome::Presented
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Size,
        Acquire(FramebufferSize),
        Clear,
        Draw(Mat4),
        Present,
    }

    struct Recorder {
        size: FramebufferSize,
        acquire: Result<(), AcquireFailure>,
        calls: RefCell<Vec<Call>>,
    }

    impl Recorder {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: FramebufferSize::new(width, height),
                acquire: Ok(()),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn positions(&self, wanted: fn(&Call) -> bool) -> Vec<usize> {
            self.calls
                .borrow()
                .iter()
                .enumerate()
                .filter(|(_, c)| wanted(c))
                .map(|(i, _)| i)
                .collect()
        }
    }

    impl FrameTarget for Recorder {
        fn framebuffer_size(&self) -> FramebufferSize {
            self.calls.borrow_mut().push(Call::Size);
            self.size
        }

        fn acquire(&mut self, size: FramebufferSize) -> Result<(), AcquireFailure> {
            self.calls.get_mut().push(Call::Acquire(size));
            self.acquire
        }

        fn clear(&mut self, _color: ColorRgba) {
            self.calls.get_mut().push(Call::Clear);
        }

        fn draw(&mut self, transform: &Mat4, _size: FramebufferSize) {
            self.calls.get_mut().push(Call::Draw(*transform));
        }

        fn present(&mut self) {
            self.calls.get_mut().push(Call::Present);
        }
    }

    fn frame(rec: &mut Recorder, seconds: f32) -> FrameOutcome {
        run_frame(rec, seconds, ColorRgba::black())
    }

    // ── ordering ──────────────────────────────────────────────────────────

    #[test]
    fn clear_then_draw_then_present() {
        let mut rec = Recorder::new(640, 480);
        assert_eq!(frame(&mut rec, 0.0), FrameOutcome::Presented);

        let kinds: Vec<&str> = rec
            .calls()
            .iter()
            .map(|c| match c {
                Call::Size => "size",
                Call::Acquire(_) => "acquire",
                Call::Clear => "clear",
                Call::Draw(_) => "draw",
                Call::Present => "present",
            })
            .collect();
        assert_eq!(kinds, vec!["size", "acquire", "clear", "draw", "present"]);
    }

    #[test]
    fn present_precedes_next_frame_clear() {
        let mut rec = Recorder::new(640, 480);
        frame(&mut rec, 0.0);
        frame(&mut rec, 0.016);

        let clears = rec.positions(|c| matches!(c, Call::Clear));
        let presents = rec.positions(|c| matches!(c, Call::Present));
        assert_eq!(clears.len(), 2);
        assert_eq!(presents.len(), 2);
        assert!(presents[0] < clears[1]);
    }

    #[test]
    fn one_draw_per_frame() {
        let mut rec = Recorder::new(800, 600);
        for i in 0..5 {
            frame(&mut rec, i as f32 * 0.1);
        }
        assert_eq!(rec.positions(|c| matches!(c, Call::Draw(_))).len(), 5);
        assert_eq!(rec.positions(|c| matches!(c, Call::Size)).len(), 5);
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[test]
    fn draw_receives_transform_for_time_and_aspect() {
        let mut rec = Recorder::new(640, 480);
        frame(&mut rec, 1.25);

        let drawn = rec.calls().into_iter().find_map(|c| match c {
            Call::Draw(m) => Some(m),
            _ => None,
        });
        assert_eq!(drawn, Some(transform::frame_transform(1.25, 640.0 / 480.0)));
    }

    #[test]
    fn acquire_uses_queried_size() {
        let mut rec = Recorder::new(1024, 768);
        frame(&mut rec, 0.0);
        assert!(rec.calls().contains(&Call::Acquire(FramebufferSize::new(1024, 768))));
    }

    // ── skip policy ───────────────────────────────────────────────────────

    #[test]
    fn zero_height_skips_the_frame() {
        let mut rec = Recorder::new(640, 0);
        assert_eq!(frame(&mut rec, 0.5), FrameOutcome::Skipped);
        assert_eq!(rec.calls(), vec![Call::Size]);
    }

    #[test]
    fn transient_surface_error_skips_draw_and_present() {
        let mut rec = Recorder::new(640, 480);
        rec.acquire = Err(AcquireFailure::Transient);
        assert_eq!(frame(&mut rec, 0.5), FrameOutcome::Skipped);
        assert!(rec.positions(|c| matches!(c, Call::Draw(_) | Call::Present)).is_empty());
    }

    #[test]
    fn reconfigured_surface_skips_one_frame() {
        let mut rec = Recorder::new(640, 480);
        rec.acquire = Err(AcquireFailure::Reconfigured);
        assert_eq!(frame(&mut rec, 0.5), FrameOutcome::Skipped);

        rec.acquire = Ok(());
        assert_eq!(frame(&mut rec, 0.6), FrameOutcome::Presented);
    }

    #[test]
    fn fatal_surface_error_is_reported() {
        let mut rec = Recorder::new(640, 480);
        rec.acquire = Err(AcquireFailure::OutOfMemory);
        assert_eq!(frame(&mut rec, 0.5), FrameOutcome::Fatal);
        assert!(!rec.calls().contains(&Call::Clear));
    }
}
