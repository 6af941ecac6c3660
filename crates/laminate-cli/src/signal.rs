//! Interrupt handling (SIGINT/SIGTERM)
//!
//! A signal only sets a flag. The flag is checked once before the pipeline
//! starts; a pipeline that is already running is not interrupted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "stop requested" flag
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    requested: Arc<AtomicBool>,
}

impl Cancellation {
    /// Install the process-wide handler. Must be called once at startup.
    pub fn install() -> Result<Self, ctrlc::Error> {
        let cancellation = Self::default();
        let requested = Arc::clone(&cancellation.requested);
        ctrlc::set_handler(move || {
            requested.store(true, Ordering::SeqCst);
        })?;
        Ok(cancellation)
    }

    /// A flag no signal handler will ever set
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_is_shared_between_clones() {
        let cancellation = Cancellation::detached();
        let observer = cancellation.clone();
        assert!(!observer.is_requested());

        cancellation.requested.store(true, Ordering::SeqCst);
        assert!(observer.is_requested());
    }
}
