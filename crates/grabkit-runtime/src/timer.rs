#![forbid(unsafe_code)]

//! One-shot deadline timers (`setTimeout` semantics, host-driven).

use std::num::NonZeroU64;

use web_time::{Duration, Instant};

/// Opaque handle of an armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(NonZeroU64);

impl TimerHandle {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

#[derive(Debug)]
struct Armed<T> {
    handle: TimerHandle,
    deadline: Instant,
    task: T,
}

/// Deadline-ordered one-shot timers.
///
/// Timers fire from [`take_due`](Self::take_due) once `now` reaches their
/// deadline, ordered by deadline and then by arming order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    next_id: NonZeroU64,
    armed: Vec<Armed<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_id: NonZeroU64::MIN,
            armed: Vec::new(),
        }
    }

    /// Arm a timer firing at `deadline`.
    pub fn schedule_at(&mut self, deadline: Instant, task: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.armed.push(Armed {
            handle,
            deadline,
            task,
        });
        handle
    }

    /// Arm a timer firing `delay` after `now`.
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, task: T) -> TimerHandle {
        self.schedule_at(now + delay, task)
    }

    /// Disarm a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.armed.len();
        self.armed.retain(|armed| armed.handle != handle);
        self.armed.len() != before
    }

    #[must_use]
    pub fn is_armed(&self, handle: TimerHandle) -> bool {
        self.armed.iter().any(|armed| armed.handle == handle)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.iter().map(|armed| armed.deadline).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }

    /// Disarm every timer.
    pub fn clear(&mut self) {
        self.armed.clear();
    }

    /// Remove and return every timer whose deadline is at or before `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerHandle, T)> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.armed)
            .into_iter()
            .partition(|armed| armed.deadline <= now);
        self.armed = waiting;
        due.sort_by_key(|armed| (armed.deadline, armed.handle));
        due.into_iter()
            .map(|armed| (armed.handle, armed.task))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_when_due() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let handle = timers.schedule_after(t0, Duration::from_millis(3000), "failsafe");

        assert!(timers.take_due(t0 + Duration::from_millis(2999)).is_empty());
        assert!(timers.is_armed(handle));
        assert_eq!(
            timers.take_due(t0 + Duration::from_millis(3000)),
            vec![(handle, "failsafe")]
        );
        assert!(timers.is_empty());
    }

    #[test]
    fn due_timers_are_deadline_ordered() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let late = timers.schedule_after(t0, Duration::from_millis(20), 2);
        let early = timers.schedule_after(t0, Duration::from_millis(10), 1);
        let tie = timers.schedule_after(t0, Duration::from_millis(20), 3);
        assert_eq!(timers.next_deadline(), Some(t0 + Duration::from_millis(10)));

        let fired = timers.take_due(t0 + Duration::from_millis(50));
        assert_eq!(fired, vec![(early, 1), (late, 2), (tie, 3)]);
    }

    #[test]
    fn cancel_is_idempotent() {
        let t0 = Instant::now();
        let mut timers = TimerQueue::new();
        let handle = timers.schedule_at(t0, ());
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.take_due(t0).is_empty());
        assert_eq!(timers.next_deadline(), None);
    }
}
