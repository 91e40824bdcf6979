//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring and presenting frames
//! - routing GPU-reported errors to the app as diagnostics

mod gpu;
mod host_error;
mod init;
mod surface;

pub use gpu::{Gpu, SurfaceFrame};
pub use host_error::{HostError, HostErrorKind, HostErrorQueue};
pub use init::GpuInit;
pub use surface::AcquireFailure;
