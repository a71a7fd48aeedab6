#![forbid(unsafe_code)]

//! Keyed leading-drop throttling.
//!
//! A throttled operation becomes pending for a delay; further requests for the
//! same key are dropped until the pending one has been taken. The registry
//! stores keys only. The caller maps each fired key back to its operation.
//!
//! ```
//! use grabkit_runtime::throttle::ThrottleRegistry;
//! use web_time::{Duration, Instant};
//!
//! let t0 = Instant::now();
//! let mut throttle = ThrottleRegistry::new(Duration::from_millis(16));
//!
//! assert!(throttle.throttle("resolve", t0));
//! assert!(!throttle.throttle("resolve", t0)); // dropped while pending
//!
//! assert!(throttle.take_due(t0).is_empty());
//! assert_eq!(throttle.take_due(t0 + Duration::from_millis(16)), vec!["resolve"]);
//! ```

use std::hash::Hash;

use ahash::AHashMap;
use web_time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Instant,
    seq: u64,
}

/// Pending throttled operations keyed by `K`.
#[derive(Debug)]
pub struct ThrottleRegistry<K> {
    default_delay: Duration,
    pending: AHashMap<K, Pending>,
    seq: u64,
}

impl<K: Eq + Hash + Copy> ThrottleRegistry<K> {
    #[must_use]
    pub fn new(default_delay: Duration) -> Self {
        Self {
            default_delay,
            pending: AHashMap::new(),
            seq: 0,
        }
    }

    #[must_use]
    pub const fn default_delay(&self) -> Duration {
        self.default_delay
    }

    /// Throttle `key` with the default delay.
    pub fn throttle(&mut self, key: K, now: Instant) -> bool {
        self.throttle_for(key, self.default_delay, now)
    }

    /// Make `key` pending for `delay`.
    ///
    /// Returns `false` (and changes nothing) when `key` is already pending.
    pub fn throttle_for(&mut self, key: K, delay: Duration, now: Instant) -> bool {
        if self.pending.contains_key(&key) {
            return false;
        }
        self.seq += 1;
        self.pending.insert(
            key,
            Pending {
                deadline: now + delay,
                seq: self.seq,
            },
        );
        true
    }

    /// Drop a pending `key`. Returns whether it was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        self.pending.remove(&key).is_some()
    }

    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.pending.contains_key(&key)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|p| p.deadline).min()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every key whose delay elapsed, ordered by deadline
    /// and then by throttling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(K, Pending)> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(k, p)| (*k, *p))
            .collect();
        due.sort_by_key(|(_, p)| (p.deadline, p.seq));
        for (key, _) in &due {
            self.pending.remove(key);
        }
        due.into_iter().map(|(key, _)| key).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
