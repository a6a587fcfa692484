//! # In-Flight Guard
//!
//! One remote operation at a time per register. The terminal drives the
//! register from a single loop, but a slow gateway call must not let a
//! second submit or lookup start underneath it, so each workflow entry
//! point takes the flag before doing anything and releases it on return.
//!
//! The flag is a plain atomic rather than a lock: the loser gets an
//! immediate [`WorkflowError::Busy`] instead of queueing behind the winner.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{WorkflowError, WorkflowResult};

// =============================================================================
// In-Flight Flag
// =============================================================================

#[derive(Debug, Default)]
pub struct InFlightFlag {
    busy: AtomicBool,
}

impl InFlightFlag {
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Claims the flag, failing fast when another operation holds it.
    ///
    /// The returned guard releases the flag when dropped.
    pub fn try_begin(&self, operation: &str) -> WorkflowResult<FlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| WorkflowError::Busy {
                operation: operation.to_string(),
            })?;
        Ok(FlightGuard { flag: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the in-flight flag on drop.
#[derive(Debug)]
pub struct FlightGuard<'a> {
    flag: &'a InFlightFlag,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.busy.store(false, Ordering::Release);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
