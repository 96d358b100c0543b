//! Operator control state for runtime simulation management.
//!
//! This module provides shared atomic state used by the step loop and
//! whatever drives it (a CLI signal handler, an admin surface). The
//! operator can pause/resume, change step speed, and trigger a clean
//! stop -- all without stopping the process.
//!
//! All mutable control fields use [`std::sync::atomic`] types wrapped
//! in [`std::sync::Arc`] by callers, so they can be shared between the
//! step loop task and control tasks without locks on the hot path.
//! Cancellation is cooperative: the loop checks the stop flag once per
//! iteration, so cancellation latency is one step interval.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::Notify;

use crate::config::SimulationBoundsConfig;

/// Minimum non-zero step interval. Zero is allowed (unthrottled, used
/// by tests and replays); anything between 1 and this floor would just
/// hammer the archive.
const MIN_STEP_INTERVAL_MS: u64 = 100;

/// Reason why a simulation run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEndReason {
    /// Reached the configured `max_steps` limit.
    MaxStepsReached,
    /// An operator issued a stop command.
    OperatorStop,
}

/// Shared operator control state.
#[derive(Debug)]
pub struct OperatorState {
    /// Whether the simulation is currently paused.
    paused: AtomicBool,

    /// Notification used to wake the step loop when resumed.
    resume_notify: Notify,

    /// Whether a stop has been requested.
    stop_requested: AtomicBool,

    /// Current step interval in milliseconds (runtime-adjustable).
    step_interval_ms: AtomicU64,

    /// Maximum number of steps (0 = unlimited).
    max_steps: u64,
}

impl OperatorState {
    /// Create a new operator state from configuration.
    pub fn new(bounds: &SimulationBoundsConfig) -> Self {
        Self {
            paused: AtomicBool::new(false),
            resume_notify: Notify::new(),
            stop_requested: AtomicBool::new(false),
            step_interval_ms: AtomicU64::new(bounds.step_interval_ms),
            max_steps: bounds.max_steps,
        }
    }

    // -----------------------------------------------------------------------
    // Pause / Resume
    // -----------------------------------------------------------------------

    /// Check whether the simulation is paused.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Pause the simulation. The step loop will sleep until resumed.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Resume the simulation and wake the step loop.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.resume_notify.notify_one();
    }

    /// Wait until the simulation is no longer paused.
    ///
    /// Returns immediately if not paused. Otherwise blocks until
    /// [`resume`](Self::resume) is called.
    pub async fn wait_if_paused(&self) {
        while self.paused.load(Ordering::Acquire) {
            self.resume_notify.notified().await;
        }
    }

    // -----------------------------------------------------------------------
    // Stop
    // -----------------------------------------------------------------------

    /// Request a clean simulation stop.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Release);
    }

    /// Check whether a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Acquire)
    }

    // -----------------------------------------------------------------------
    // Step Speed
    // -----------------------------------------------------------------------

    /// Get the current step interval in milliseconds.
    pub fn step_interval_ms(&self) -> u64 {
        self.step_interval_ms.load(Ordering::Acquire)
    }

    /// Set the step interval in milliseconds.
    ///
    /// Zero means unthrottled; non-zero values below 100ms are
    /// rejected. Returns the previous interval on success, or `None`
    /// if the value was rejected.
    pub fn set_step_interval_ms(&self, ms: u64) -> Option<u64> {
        if ms != 0 && ms < MIN_STEP_INTERVAL_MS {
            return None;
        }
        let prev = self.step_interval_ms.swap(ms, Ordering::AcqRel);
        Some(prev)
    }

    // -----------------------------------------------------------------------
    // Boundaries
    // -----------------------------------------------------------------------

    /// Check whether the step limit has been reached.
    ///
    /// Returns `true` if `max_steps > 0` and `steps_taken >= max_steps`.
    pub const fn step_limit_reached(&self, steps_taken: u64) -> bool {
        self.max_steps > 0 && steps_taken >= self.max_steps
    }

    /// Get the configured max steps.
    pub const fn max_steps(&self) -> u64 {
        self.max_steps
    }
}
