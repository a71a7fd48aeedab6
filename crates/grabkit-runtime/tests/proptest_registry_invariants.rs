//! Property-based invariant tests for the listener registry and throttling.
//!
//! 1. At most one binding exists per (event type, handler, target) key
//! 2. Attach/detach commands always mirror the live binding set
//! 3. Once-bindings are delivered exactly once
//! 4. A throttled key fires at most once per arming
//! 5. Frame and timer cancellation is idempotent

use std::collections::HashSet;

use grabkit_core::EventType;
use grabkit_runtime::{
    AnimationFrameScheduler, GlobalEventRegistry, HandlerKind, HandlerRef, ListenerCommand,
    ListenerOptions, ListenerTarget, SurfaceId, ThrottleRegistry, TimerQueue,
};
use proptest::prelude::*;
use web_time::{Duration, Instant};

// ── Strategies ──────────────────────────────────────────────────────────

fn event_type() -> impl Strategy<Value = EventType> {
    prop_oneof![
        Just(EventType::MouseMove),
        Just(EventType::MouseUp),
        Just(EventType::TouchMove),
        Just(EventType::TouchEnd),
        Just(EventType::KeyDown),
    ]
}

fn handler() -> impl Strategy<Value = HandlerRef> {
    (
        0u32..3,
        prop_oneof![
            Just(HandlerKind::DragUpdate),
            Just(HandlerKind::DragEnd),
            Just(HandlerKind::Keydown),
        ],
    )
        .prop_map(|(owner, kind)| HandlerRef::new(SurfaceId::new(owner), kind))
}

fn target() -> impl Strategy<Value = ListenerTarget> {
    prop_oneof![
        Just(ListenerTarget::Window),
        Just(ListenerTarget::Document),
        Just(ListenerTarget::DocumentElement),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Bind(EventType, HandlerRef, ListenerTarget, bool),
    Unbind(EventType, HandlerRef, Option<ListenerTarget>),
    UnbindOwner(u32),
    Dispatch(EventType),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (event_type(), handler(), target(), any::<bool>())
            .prop_map(|(e, h, t, once)| Op::Bind(e, h, t, once)),
        2 => (event_type(), handler(), proptest::option::of(target()))
            .prop_map(|(e, h, t)| Op::Unbind(e, h, t)),
        1 => (0u32..3).prop_map(Op::UnbindOwner),
        2 => event_type().prop_map(Op::Dispatch),
    ]
}

fn apply(registry: &mut GlobalEventRegistry, op: &Op) {
    match *op {
        Op::Bind(e, h, t, once) => {
            let options = ListenerOptions {
                once,
                ..ListenerOptions::default()
            };
            registry.bind(e, h, t, options);
        }
        Op::Unbind(e, h, t) => {
            registry.unbind(e, h, t);
        }
        Op::UnbindOwner(owner) => {
            registry.unbind_owner(SurfaceId::new(owner));
        }
        Op::Dispatch(e) => {
            registry.dispatch(e);
        }
    }
}

proptest! {
    #[test]
    fn one_binding_per_key(ops in proptest::collection::vec(op(), 0..64)) {
        let mut registry = GlobalEventRegistry::new();
        for op in &ops {
            apply(&mut registry, op);
        }
        let keys: HashSet<_> = registry
            .bindings()
            .iter()
            .map(|b| (b.event_type, b.handler, b.context))
            .collect();
        prop_assert_eq!(keys.len(), registry.len());
    }

    #[test]
    fn commands_mirror_live_bindings(ops in proptest::collection::vec(op(), 0..64)) {
        let mut registry = GlobalEventRegistry::new();
        let mut attached: Vec<_> = Vec::new();
        for op in &ops {
            apply(&mut registry, op);
            for command in registry.drain_commands() {
                match command {
                    ListenerCommand::Attach(binding) => attached.push(binding),
                    ListenerCommand::Detach(binding) => {
                        let index = attached.iter().position(|b| *b == binding);
                        prop_assert!(index.is_some(), "detach without attach");
                        if let Some(index) = index {
                            attached.remove(index);
                        }
                    }
                }
            }
        }
        prop_assert_eq!(attached.as_slice(), registry.bindings());
    }

    #[test]
    fn once_bindings_deliver_once(e in event_type(), h in handler(), t in target(), rounds in 1usize..5) {
        let mut registry = GlobalEventRegistry::new();
        registry.bind(e, h, t, ListenerOptions::once());
        let delivered: usize = (0..rounds).map(|_| registry.dispatch(e).len()).sum();
        prop_assert_eq!(delivered, 1);
        prop_assert!(registry.is_empty());
    }

    #[test]
    fn throttled_key_fires_once_per_arming(
        offsets in proptest::collection::vec(0u64..100, 1..32),
        delay in 1u64..50,
    ) {
        let t0 = Instant::now();
        let mut throttle = ThrottleRegistry::new(Duration::from_millis(delay));
        let mut armed = 0usize;
        let mut fired = 0usize;
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        for offset in sorted {
            let now = t0 + Duration::from_millis(offset);
            fired += throttle.take_due(now).len();
            if throttle.throttle(0u8, now) {
                armed += 1;
            }
        }
        fired += throttle.take_due(t0 + Duration::from_secs(1)).len();
        prop_assert_eq!(armed, fired);
    }

    #[test]
    fn cancellation_is_idempotent(count in 1usize..16, pick in any::<prop::sample::Index>()) {
        let t0 = Instant::now();
        let mut frames = AnimationFrameScheduler::new();
        let mut timers = TimerQueue::new();
        let frame_handles: Vec<_> = (0..count).map(|i| frames.schedule(i)).collect();
        let timer_handles: Vec<_> = (0..count)
            .map(|i| timers.schedule_after(t0, Duration::from_millis(10), i))
            .collect();

        let frame = frame_handles[pick.index(count)];
        let timer = timer_handles[pick.index(count)];
        prop_assert!(frames.cancel(frame));
        prop_assert!(!frames.cancel(frame));
        prop_assert!(timers.cancel(timer));
        prop_assert!(!timers.cancel(timer));

        prop_assert_eq!(frames.take_ready().len(), count - 1);
        prop_assert_eq!(timers.take_due(t0 + Duration::from_millis(10)).len(), count - 1);
    }
}
