//! Twirl engine crate.
//!
//! This crate owns the platform + GPU runtime pieces behind the rotating
//! triangle viewer: one window, one pipeline, one draw per frame.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
