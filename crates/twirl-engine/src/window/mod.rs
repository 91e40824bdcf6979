//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, runs the setup stage, and drives the
//! frame loop until the close flag is observed.

mod runtime;
mod setup;

pub use runtime::{LoopState, Runtime, RuntimeConfig};
