use std::fmt;
use std::sync::{Arc, Mutex};

/// Category of a GPU-reported error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HostErrorKind {
    OutOfMemory,
    Validation,
    Internal,
}

/// Error reported by the graphics host outside of any call's return value.
///
/// These are diagnostics: the runtime reports them to the app and keeps
/// rendering unless the app decides otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct HostError {
    pub kind: HostErrorKind,
    pub message: String,
}

impl HostError {
    pub fn new(kind: HostErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl From<&wgpu::Error> for HostError {
    fn from(err: &wgpu::Error) -> Self {
        let kind = match err {
            wgpu::Error::OutOfMemory { .. } => HostErrorKind::OutOfMemory,
            wgpu::Error::Validation { .. } => HostErrorKind::Validation,
            _ => HostErrorKind::Internal,
        };
        Self::new(kind, err.to_string())
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for HostError {}

/// Queue of host errors shared with the GPU error handler.
///
/// wgpu may invoke its handler from any thread; errors are parked here and
/// drained by the runtime on the event-loop thread.
#[derive(Debug, Clone, Default)]
pub struct HostErrorQueue {
    inner: Arc<Mutex<Vec<HostError>>>,
}

impl HostErrorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, err: HostError) {
        match self.inner.lock() {
            Ok(mut q) => q.push(err),
            // A poisoned queue only means another push panicked; keep reporting.
            Err(poisoned) => poisoned.into_inner().push(err),
        }
    }

    /// Takes all queued errors in arrival order.
    pub fn drain(&self) -> Vec<HostError> {
        match self.inner.lock() {
            Ok(mut q) => std::mem::take(&mut *q),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_errors_in_arrival_order() {
        let queue = HostErrorQueue::new();
        queue.push(HostError::new(HostErrorKind::Validation, "first"));
        queue.push(HostError::new(HostErrorKind::Internal, "second"));

        let drained = queue.drain();
        let messages: Vec<&str> = drained.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn clones_share_the_same_queue() {
        let queue = HostErrorQueue::new();
        let handler_side = queue.clone();
        std::thread::spawn(move || {
            handler_side.push(HostError::new(HostErrorKind::OutOfMemory, "oom"));
        })
        .join()
        .expect("pusher thread");

        assert_eq!(queue.drain().len(), 1);
    }

    #[test]
    fn display_includes_kind_and_message() {
        let err = HostError::new(HostErrorKind::Validation, "bad binding");
        assert_eq!(err.to_string(), "Validation: bad binding");
    }
}
