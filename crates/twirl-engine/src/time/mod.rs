//! Time subsystem.
//!
//! Provides monotonic animation timing without coupling to the runtime.
//! Intended usage:
//! - one `AnimationClock` per window, started at setup
//! - call `tick()` once per presented frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{AnimationClock, FrameTime};
