//! The one piece of process-level configuration the kernel itself does
//! not take: a per-session bound on how long a search is allowed to run,
//! checked once per algorithm iteration.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wayfare_core::algorithm::search::Cancellation;

#[derive(Debug, Clone)]
pub enum TerminationPolicy {
    IterationsLimit { limit: u64 },
    WallClockLimit { limit: Duration },
    Combined { policies: Vec<TerminationPolicy> },
    /// No bound beyond the manual cancel flag. The default.
    Unbounded,
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        TerminationPolicy::Unbounded
    }
}

impl TerminationPolicy {
    fn terminate(&self, started_at: Instant, iteration: u64) -> bool {
        match self {
            TerminationPolicy::Unbounded => false,
            TerminationPolicy::IterationsLimit { limit } => iteration > *limit,
            TerminationPolicy::WallClockLimit { limit } => started_at.elapsed() > *limit,
            TerminationPolicy::Combined { policies } => {
                policies.iter().any(|p| p.terminate(started_at, iteration))
            }
        }
    }
}

/// Adapts a [`TerminationPolicy`] plus a session's manual cancel flag
/// into the kernel's [`Cancellation`] capability. `is_cancelled` is
/// polled once per expansion and bumps its own iteration counter on
/// every call -- the algorithm never sees or reports this count itself.
pub struct PolicyCancellation {
    policy: TerminationPolicy,
    started_at: Instant,
    iteration: AtomicU64,
    manual: Arc<AtomicBool>,
}

impl PolicyCancellation {
    pub fn new(policy: TerminationPolicy, manual: Arc<AtomicBool>) -> Self {
        PolicyCancellation {
            policy,
            started_at: Instant::now(),
            iteration: AtomicU64::new(0),
            manual,
        }
    }
}

impl Cancellation for PolicyCancellation {
    fn is_cancelled(&self) -> bool {
        if self.manual.load(Ordering::Relaxed) {
            return true;
        }
        let iteration = self.iteration.fetch_add(1, Ordering::Relaxed);
        self.policy.terminate(self.started_at, iteration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterations_limit_cancels_after_threshold() {
        let manual = Arc::new(AtomicBool::new(false));
        let cancel = PolicyCancellation::new(TerminationPolicy::IterationsLimit { limit: 2 }, manual);
        assert!(!cancel.is_cancelled()); // iteration 0
        assert!(!cancel.is_cancelled()); // iteration 1
        assert!(!cancel.is_cancelled()); // iteration 2
        assert!(cancel.is_cancelled()); // iteration 3 > 2
    }

    #[test]
    fn manual_flag_overrides_unbounded_policy() {
        let manual = Arc::new(AtomicBool::new(false));
        let cancel = PolicyCancellation::new(TerminationPolicy::Unbounded, manual.clone());
        assert!(!cancel.is_cancelled());
        manual.store(true, Ordering::Relaxed);
        assert!(cancel.is_cancelled());
    }
}
