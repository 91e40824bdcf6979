//! Core engine-facing contracts.
//!
//! This module defines the interface between the runtime (platform loop) and
//! the application: the `App` handler trait, the per-frame context, and the
//! backend-agnostic frame procedure.

mod app;
mod ctx;
mod frame;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
pub use frame::{run_frame, FrameOutcome, FrameTarget};
