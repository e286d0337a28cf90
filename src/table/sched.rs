//! Timer queue for the cooperative tick loop.
//!
//! All waiting in the engine is a `Scheduled` entry here. Entries carry the
//! generation current when they were armed; the tick loop discards entries
//! whose generation has moved on, which is how stale timers become no-ops.

extern crate alloc;

use alloc::collections::BinaryHeap;
use core::cmp::{Ordering, Reverse};

/// Deferred work the tick loop knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Task {
    /// Betting grace period expired; deal the round.
    BettingTimeout,
    /// Insurance window closed.
    FinishInsurance,
    /// The AI at this seat acts on its hand.
    AiTurn {
        /// Seat index of the acting AI.
        seat: usize,
    },
    /// Dealer settle delay elapsed; start the draw loop.
    BeginDealerPlay,
    /// Next card of the dealer's draw loop.
    DealerDraw,
    /// Dealer flavor line during their turn.
    DealerRemark,
    /// Callout hold expired; move to resolving.
    EnterResolving,
    /// Resolving display time expired; move to round end.
    EnterRoundEnd,
    /// Round-end housekeeping: churn, banter, reshuffle check.
    FinishRoundEnd,
    /// Open betting for the next hand.
    StartBetting,
}

/// A timer entry: fires at `due`, valid only while `generation` is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Scheduled {
    pub(crate) due: u64,
    pub(crate) seq: u64,
    pub(crate) generation: u64,
    pub(crate) task: Task,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then(self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of timers keyed by due time, arrival order within a tick.
#[derive(Debug, Default)]
pub(crate) struct Scheduler {
    heap: BinaryHeap<Reverse<Scheduled>>,
    next_seq: u64,
}

impl Scheduler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Arms a timer for `task` at `due`, stamped with `generation`.
    pub(crate) fn schedule(&mut self, due: u64, generation: u64, task: Task) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Scheduled {
            due,
            seq,
            generation,
            task,
        }));
    }

    /// Pops the next timer that has come due, if any.
    pub(crate) fn pop_due(&mut self, now: u64) -> Option<Scheduled> {
        if self.heap.peek().is_some_and(|entry| entry.0.due <= now) {
            self.heap.pop().map(|entry| entry.0)
        } else {
            None
        }
    }

    /// When the next timer fires, if one is armed. Lets hosts sleep
    /// precisely instead of polling.
    pub(crate) fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|entry| entry.0.due)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_in_due_order() {
        let mut sched = Scheduler::new();
        sched.schedule(500, 0, Task::EnterRoundEnd);
        sched.schedule(100, 0, Task::BettingTimeout);

        assert!(sched.pop_due(50).is_none());
        assert_eq!(sched.pop_due(500).map(|s| s.task), Some(Task::BettingTimeout));
        assert_eq!(sched.pop_due(500).map(|s| s.task), Some(Task::EnterRoundEnd));
        assert!(sched.pop_due(500).is_none());
    }

    #[test]
    fn ties_fire_in_arrival_order() {
        let mut sched = Scheduler::new();
        sched.schedule(100, 0, Task::AiTurn { seat: 1 });
        sched.schedule(100, 0, Task::AiTurn { seat: 2 });

        assert_eq!(
            sched.pop_due(100).map(|s| s.task),
            Some(Task::AiTurn { seat: 1 })
        );
        assert_eq!(
            sched.pop_due(100).map(|s| s.task),
            Some(Task::AiTurn { seat: 2 })
        );
    }
}
