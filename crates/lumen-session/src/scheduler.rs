//! Recomputation scheduling: a quiescence window plus a single in-flight slot.
//!
//! Every control change bumps a generation counter and waits out the
//! quiescence window; only a change that is still the newest when its
//! window closes goes on to trigger a run. A trigger then has to claim the
//! run slot, so at most one run exists at any time.

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::time::Duration;

use crate::config::TriggerPolicy;

const IDLE: u8 = 0;
const BUSY: u8 = 1;
/// Busy, and a trigger arrived that wants one more run.
const BUSY_DIRTY: u8 = 2;

pub struct Scheduler {
    quiescence: Duration,
    policy: TriggerPolicy,
    slot: AtomicU8,
    generation: AtomicU64,
}

/// Result of asking for the run slot.
pub enum Admission<'a> {
    Admitted(RunSlot<'a>),
    /// A run is in flight and the trigger was discarded.
    Dropped,
    /// A run is in flight and will go again once it finishes.
    Deferred,
}

/// Exclusive right to run the pipeline. Releases the slot on drop unless
/// [`RunSlot::release_or_rerun`] already did.
pub struct RunSlot<'a> {
    scheduler: &'a Scheduler,
    released: bool,
}

impl Scheduler {
    pub fn new(quiescence: Duration, policy: TriggerPolicy) -> Self {
        Self {
            quiescence,
            policy,
            slot: AtomicU8::new(IDLE),
            generation: AtomicU64::new(0),
        }
    }

    /// Record a change and return its generation token.
    pub fn touch(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True while no newer change has been recorded since `token`.
    pub fn is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Wait out the quiescence window. Returns whether `token` survived it.
    pub async fn settle(&self, token: u64) -> bool {
        tokio::time::sleep(self.quiescence).await;
        self.is_current(token)
    }

    pub fn is_busy(&self) -> bool {
        self.slot.load(Ordering::SeqCst) != IDLE
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    pub fn try_acquire(&self) -> Admission<'_> {
        let mut current = self.slot.load(Ordering::SeqCst);
        loop {
            let next = match (current, self.policy) {
                (IDLE, _) => BUSY,
                (_, TriggerPolicy::DropWhileBusy) => return Admission::Dropped,
                (BUSY_DIRTY, TriggerPolicy::QueueLatest) => return Admission::Deferred,
                (_, TriggerPolicy::QueueLatest) => BUSY_DIRTY,
            };
            match self
                .slot
                .compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) if next == BUSY => {
                    return Admission::Admitted(RunSlot {
                        scheduler: self,
                        released: false,
                    });
                }
                Ok(_) => return Admission::Deferred,
                Err(actual) => current = actual,
            }
        }
    }
}

impl RunSlot<'_> {
    /// Finish a run. Releases the slot and returns false, or, if a trigger
    /// was deferred meanwhile, keeps the slot and returns true.
    ///
    /// Checking for a deferred trigger and releasing are one atomic step,
    /// so a trigger can never land between them unnoticed.
    pub fn release_or_rerun(&mut self) -> bool {
        if self.released {
            return false;
        }
        let slot = &self.scheduler.slot;
        if slot
            .compare_exchange(BUSY, IDLE, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            self.released = true;
            return false;
        }
        // Only the holder moves the slot out of BUSY_DIRTY.
        slot.store(BUSY, Ordering::SeqCst);
        true
    }
}

impl Drop for RunSlot<'_> {
    fn drop(&mut self) {
        if !self.released {
            self.scheduler.slot.store(IDLE, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_touch_is_current() {
        let scheduler = Scheduler::new(Duration::ZERO, TriggerPolicy::DropWhileBusy);
        let first = scheduler.touch();
        let second = scheduler.touch();
        assert!(!scheduler.is_current(first));
        assert!(scheduler.is_current(second));
    }

    #[test]
    fn slot_is_exclusive_and_released_on_drop() {
        let scheduler = Scheduler::new(Duration::ZERO, TriggerPolicy::DropWhileBusy);
        let slot = match scheduler.try_acquire() {
            Admission::Admitted(slot) => slot,
            _ => panic!("idle scheduler must admit"),
        };
        assert!(scheduler.is_busy());
        assert!(matches!(scheduler.try_acquire(), Admission::Dropped));
        drop(slot);
        assert!(!scheduler.is_busy());
        assert!(matches!(scheduler.try_acquire(), Admission::Admitted(_)));
    }

    #[test]
    fn queue_latest_defers_and_requests_one_rerun() {
        let scheduler = Scheduler::new(Duration::ZERO, TriggerPolicy::QueueLatest);
        let Admission::Admitted(mut slot) = scheduler.try_acquire() else {
            panic!("idle scheduler must admit");
        };
        assert!(matches!(scheduler.try_acquire(), Admission::Deferred));
        assert!(matches!(scheduler.try_acquire(), Admission::Deferred));
        assert!(slot.release_or_rerun(), "deferred trigger must cause a rerun");
        assert!(scheduler.is_busy(), "slot is kept for the rerun");
        assert!(!slot.release_or_rerun());
        assert!(!scheduler.is_busy());
    }

    #[test]
    fn deferral_during_rerun_is_not_lost() {
        let scheduler = Scheduler::new(Duration::ZERO, TriggerPolicy::QueueLatest);
        let Admission::Admitted(mut slot) = scheduler.try_acquire() else {
            panic!("idle scheduler must admit");
        };
        assert!(matches!(scheduler.try_acquire(), Admission::Deferred));
        assert!(slot.release_or_rerun());
        // A trigger landing after the first check still has to be seen.
        assert!(matches!(scheduler.try_acquire(), Admission::Deferred));
        assert!(slot.release_or_rerun());
        assert!(!slot.release_or_rerun());
        drop(slot);

        // Once released, no stale request lingers: the next run starts clean.
        let Admission::Admitted(mut next) = scheduler.try_acquire() else {
            panic!("released scheduler must admit");
        };
        assert!(!next.release_or_rerun());
    }

    #[test]
    fn drop_after_release_does_not_free_a_new_holder() {
        let scheduler = Scheduler::new(Duration::ZERO, TriggerPolicy::DropWhileBusy);
        let Admission::Admitted(mut first) = scheduler.try_acquire() else {
            panic!("idle scheduler must admit");
        };
        assert!(!first.release_or_rerun());
        let Admission::Admitted(_second) = scheduler.try_acquire() else {
            panic!("released scheduler must admit");
        };
        drop(first);
        assert!(scheduler.is_busy());
        assert!(matches!(scheduler.try_acquire(), Admission::Dropped));
    }

    #[tokio::test(start_paused = true)]
    async fn settle_reports_superseded_tokens() {
        let scheduler = Scheduler::new(Duration::from_millis(40), TriggerPolicy::DropWhileBusy);
        let token = scheduler.touch();
        assert!(scheduler.settle(token).await);

        let stale = scheduler.touch();
        let (survived, _) = tokio::join!(scheduler.settle(stale), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            scheduler.touch()
        });
        assert!(!survived);
    }
}
