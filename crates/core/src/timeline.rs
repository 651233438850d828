//! Timeline module - one-shot deferred effects on a logical clock
//!
//! The engine never reads a wall clock. Callers advance time explicitly and
//! the timeline hands back whatever effects came due, in the order they were
//! due. Effects scheduled for the same instant keep their scheduling order.
//!
//! Pause does not stop the timeline: effects already scheduled always run.

use arrayvec::ArrayVec;

/// Upper bound on effects in flight at once
pub const MAX_PENDING: usize = 4;

/// Work the engine postpones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredEffect {
    /// Physically drop the rows currently marked as clearing
    RemoveClearedRows,
    /// Lift the hard-drop command suppression
    ReleaseHardDrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    effect: DeferredEffect,
}

/// Single logical timeline holding pending one-shot effects
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    now_ms: u64,
    next_seq: u64,
    pending: ArrayVec<Scheduled, MAX_PENDING>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `effect` to fire `delay_ms` from now.
    ///
    /// If the timeline is full the effect is due immediately and is returned
    /// to the caller instead of being queued.
    pub fn schedule(&mut self, effect: DeferredEffect, delay_ms: u32) -> Option<DeferredEffect> {
        let entry = Scheduled {
            due_ms: self.now_ms + u64::from(delay_ms),
            seq: self.next_seq,
            effect,
        };
        self.next_seq += 1;
        match self.pending.try_push(entry) {
            Ok(()) => None,
            Err(_) => Some(effect),
        }
    }

    /// Advance the clock and collect every effect that came due
    pub fn advance(&mut self, elapsed_ms: u32) -> ArrayVec<DeferredEffect, MAX_PENDING> {
        self.now_ms += u64::from(elapsed_ms);

        let mut due: ArrayVec<Scheduled, MAX_PENDING> = ArrayVec::new();
        let now = self.now_ms;
        self.pending.retain(|entry| {
            if entry.due_ms <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });

        due.sort_unstable_by_key(|entry| (entry.due_ms, entry.seq));
        due.into_iter().map(|entry| entry.effect).collect()
    }

    /// Milliseconds until the earliest pending effect
    pub fn next_due_in(&self) -> Option<u64> {
        self.pending
            .iter()
            .map(|entry| entry.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Number of effects waiting to fire
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending effect and reset the clock
    pub fn clear(&mut self) {
        self.pending.clear();
        self.now_ms = 0;
        self.next_seq = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_fires_after_delay() {
        let mut timeline = Timeline::new();
        assert!(timeline.schedule(DeferredEffect::RemoveClearedRows, 500).is_none());

        assert!(timeline.advance(499).is_empty());
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.next_due_in(), Some(1));

        let due = timeline.advance(1);
        assert_eq!(due.as_slice(), &[DeferredEffect::RemoveClearedRows]);
        assert!(timeline.is_empty());
    }

    #[test]
    fn test_effects_fire_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(DeferredEffect::RemoveClearedRows, 500);
        timeline.schedule(DeferredEffect::ReleaseHardDrop, 100);

        let due = timeline.advance(1000);
        assert_eq!(
            due.as_slice(),
            &[DeferredEffect::ReleaseHardDrop, DeferredEffect::RemoveClearedRows]
        );
    }

    #[test]
    fn test_same_instant_keeps_schedule_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(DeferredEffect::RemoveClearedRows, 0);
        timeline.schedule(DeferredEffect::ReleaseHardDrop, 0);

        let due = timeline.advance(0);
        assert_eq!(
            due.as_slice(),
            &[DeferredEffect::RemoveClearedRows, DeferredEffect::ReleaseHardDrop]
        );
    }

    #[test]
    fn test_next_due_in() {
        let mut timeline = Timeline::new();
        assert_eq!(timeline.next_due_in(), None);

        timeline.schedule(DeferredEffect::RemoveClearedRows, 500);
        timeline.advance(120);
        timeline.schedule(DeferredEffect::ReleaseHardDrop, 100);

        assert_eq!(timeline.next_due_in(), Some(100));
        assert_eq!(timeline.now_ms(), 120);
    }

    #[test]
    fn test_full_timeline_returns_effect() {
        let mut timeline = Timeline::new();
        for _ in 0..MAX_PENDING {
            assert!(timeline.schedule(DeferredEffect::ReleaseHardDrop, 10).is_none());
        }
        assert_eq!(
            timeline.schedule(DeferredEffect::RemoveClearedRows, 10),
            Some(DeferredEffect::RemoveClearedRows)
        );
        assert_eq!(timeline.len(), MAX_PENDING);
    }

    #[test]
    fn test_clear_resets() {
        let mut timeline = Timeline::new();
        timeline.schedule(DeferredEffect::RemoveClearedRows, 500);
        timeline.advance(10);
        timeline.clear();

        assert!(timeline.is_empty());
        assert_eq!(timeline.now_ms(), 0);
        assert!(timeline.advance(1000).is_empty());
    }
}
