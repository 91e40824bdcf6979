use anyhow::Result;

use crate::device::HostError;
use crate::input::{CloseFlag, KeyEvent};

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by the viewer.
///
/// Handlers run synchronously on the event-loop thread while events are being
/// drained, between frames. They must not block.
pub trait App {
    /// Called for every key transition on the window.
    fn on_key(&mut self, event: &KeyEvent, close: &mut CloseFlag) {
        let _ = (event, close);
    }

    /// Called for errors the graphics host reports outside a call's return value.
    ///
    /// These are diagnostics; rendering continues.
    fn on_host_error(&mut self, error: &HostError) {
        log::error!("host error: {error}");
    }

    /// Called once per loop iteration while the window is open.
    ///
    /// An `Err` ends the loop and makes `Runtime::run` fail.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> Result<AppControl>;
}
