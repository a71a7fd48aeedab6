#![forbid(unsafe_code)]

//! Paint-synchronized task scheduling.
//!
//! [`AnimationFrameScheduler`] is the host-driven counterpart of
//! `requestAnimationFrame`: tasks are queued with [`schedule`] and handed back
//! by [`take_ready`] when the host reaches its next paint tick. Every task runs
//! at most once, and a cancelled task never runs.
//!
//! The scheduler stores tasks as data. The owner decides what "running" a task
//! means, which keeps frame work deterministic under test.
//!
//! [`schedule`]: AnimationFrameScheduler::schedule
//! [`take_ready`]: AnimationFrameScheduler::take_ready

use std::num::NonZeroU64;

/// Opaque handle of a scheduled frame task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(NonZeroU64);

impl FrameHandle {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

/// Queue of tasks waiting for the next paint tick.
#[derive(Debug)]
pub struct AnimationFrameScheduler<T> {
    next_id: NonZeroU64,
    pending: Vec<(FrameHandle, T)>,
}

impl<T> Default for AnimationFrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AnimationFrameScheduler<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: NonZeroU64::MIN,
            pending: Vec::new(),
        }
    }

    /// Queue `task` for the next paint tick.
    pub fn schedule(&mut self, task: T) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.pending.push((handle, task));
        handle
    }

    /// Cancel a queued task. Returns `false` if it already ran or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        match self.pending.iter().position(|(h, _)| *h == handle) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_scheduled(&self, handle: FrameHandle) -> bool {
        self.pending.iter().any(|(h, _)| *h == handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drain every task queued before this tick, in scheduling order.
    ///
    /// Tasks scheduled while the returned tasks are executed belong to the
    /// following tick.
    pub fn take_ready(&mut self) -> Vec<(FrameHandle, T)> {
        std::mem::take(&mut self.pending)
    }

    /// Drop every queued task.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
