use super::types::{Key, KeyEvent, KeyState};

/// Window close request flag.
///
/// Set by the host (window close button, compositor) or by the app's key
/// handler. The runtime only inspects it between frames, so a frame that is
/// already being rendered always completes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct CloseFlag {
    requested: bool,
}

impl CloseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the window close after the current frame.
    pub fn request_close(&mut self) {
        self.requested = true;
    }

    pub fn should_close(&self) -> bool {
        self.requested
    }
}

/// Requests closure when Escape transitions to pressed.
///
/// Returns `true` if this event set the flag. Releases, repeats and other keys
/// leave the flag untouched.
pub fn close_on_escape(event: &KeyEvent, close: &mut CloseFlag) -> bool {
    if event.key == Key::Escape && event.state == KeyState::Pressed && !event.repeat {
        close.request_close();
        return true;
    }
    false
}
