//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform key events into `KeyEvent`s and hands them
//! to the app together with the window's `CloseFlag`.

mod close;
pub(crate) mod platform;
mod types;

pub use close::{close_on_escape, CloseFlag};
pub use types::{Key, KeyEvent, KeyState};
