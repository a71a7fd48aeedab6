#![forbid(unsafe_code)]

//! Property-based invariant tests for `InteractionSession`.
//!
//! 1. Cross-family updates never change the update counter
//! 2. Edge and velocity components are always in {-1, 0, 1}
//! 3. At most one update frame and one failsafe timer are live
//! 4. Every end signal resolves, to `true` at most once per grab
//! 5. The frame hook always receives `position - start`

mod common;

use common::RecordingSurface;
use grabkit_core::{MouseEvent, Point, PointerDelta, PointerEvent, TouchEvent};
use grabkit_runtime::{EndSignal, GlobalEventRegistry, InteractionConfig, SurfaceId};
use grabkit_session::{EndOptions, InteractionSession, SessionContext, UpdateOutcome};
use proptest::prelude::*;
use web_time::{Duration, Instant};

// ── Strategies ──────────────────────────────────────────────────────────

fn coord() -> impl Strategy<Value = f64> {
    (-200i32..1200).prop_map(f64::from)
}

#[derive(Debug, Clone)]
enum Step {
    Move(f64, f64),
    Frame,
    Advance(u64),
    End,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (coord(), coord()).prop_map(|(x, y)| Step::Move(x, y)),
        2 => Just(Step::Frame),
        2 => (1u64..4000).prop_map(Step::Advance),
        1 => Just(Step::End),
    ]
}

struct Run {
    session: InteractionSession,
    surface: RecordingSurface,
    registry: GlobalEventRegistry,
    now: Instant,
    signals: Vec<EndSignal>,
}

impl Run {
    fn new(tolerance: u32) -> Self {
        Self {
            session: InteractionSession::new(
                SurfaceId::new(0),
                InteractionConfig::default().with_tolerance(tolerance),
            )
            .unwrap(),
            surface: RecordingSurface::new(),
            registry: GlobalEventRegistry::new(),
            now: Instant::now(),
            signals: Vec::new(),
        }
    }

    fn cx(&mut self) -> (SessionContext<'_, RecordingSurface>, &mut InteractionSession) {
        (
            SessionContext::new(&mut self.surface, &mut self.registry, self.now),
            &mut self.session,
        )
    }

    fn start(&mut self, event: PointerEvent) {
        let (mut cx, session) = self.cx();
        session.start(&mut cx, &event, None);
    }

    fn step(&mut self, step: &Step) -> Option<UpdateOutcome> {
        match *step {
            Step::Move(x, y) => {
                let event = PointerEvent::from(MouseEvent::moved(x, y));
                let (mut cx, session) = self.cx();
                let outcome = session.update(&mut cx, Some(&event));
                if let UpdateOutcome::Ended(signal) = &outcome {
                    self.signals.push(signal.clone());
                }
                return Some(outcome);
            }
            Step::Frame => {
                let (mut cx, session) = self.cx();
                session.on_animation_frame(&mut cx);
            }
            Step::Advance(ms) => {
                self.now += Duration::from_millis(ms);
                let (mut cx, session) = self.cx();
                if let Some(signal) = session.advance(&mut cx) {
                    self.signals.push(signal);
                }
            }
            Step::End => {
                let (mut cx, session) = self.cx();
                let signal = session.end(&mut cx, None, EndOptions::default());
                self.signals.push(signal);
            }
        }
        None
    }

    /// Flush every pending frame and deferred operation.
    fn settle(&mut self) {
        for _ in 0..3 {
            self.step(&Step::Frame);
            self.step(&Step::Advance(5000));
        }
    }
}

fn unit(value: i8) -> bool {
    (-1..=1).contains(&value)
}

proptest! {
    #[test]
    fn cross_family_updates_leave_counter(
        x in coord(), y in coord(),
        moves in proptest::collection::vec((coord(), coord()), 1..16),
    ) {
        let mut run = Run::new(0);
        run.start(TouchEvent::start(x, y).into());
        for (mx, my) in moves {
            run.step(&Step::Move(mx, my));
            prop_assert_eq!(run.session.record().updates, 0);
        }
    }

    #[test]
    fn signs_stay_in_unit_range(
        start in (coord(), coord()),
        steps in proptest::collection::vec(step(), 0..48),
    ) {
        let mut run = Run::new(0);
        run.start(MouseEvent::down(start.0, start.1).into());
        for step in &steps {
            run.step(step);
            let record = run.session.record();
            if let Some(edge) = record.edge {
                let (ex, ey) = edge.values();
                prop_assert!(unit(ex) && unit(ey));
            }
            if let Some(velocity) = record.velocity {
                let (vx, vy) = velocity.values();
                prop_assert!(unit(vx) && unit(vy));
            }
        }
    }

    #[test]
    fn slots_hold_one_live_handle(
        start in (coord(), coord()),
        steps in proptest::collection::vec(step(), 0..48),
    ) {
        let mut run = Run::new(0);
        run.start(MouseEvent::down(start.0, start.1).into());
        for step in &steps {
            run.step(step);
            // One update frame plus at most one end frame.
            prop_assert!(run.session.pending_frames() <= 2);
            prop_assert!(run.session.armed_timers() <= 1);
        }
    }

    #[test]
    fn every_end_signal_resolves(
        start in (coord(), coord()),
        steps in proptest::collection::vec(step(), 0..48),
    ) {
        let mut run = Run::new(0);
        run.start(MouseEvent::down(start.0, start.1).into());
        for step in &steps {
            run.step(step);
        }
        run.step(&Step::End);
        run.settle();

        let completed = run.signals.iter().filter(|s| s.value() == Some(true)).count();
        prop_assert!(run.signals.iter().all(EndSignal::is_resolved));
        prop_assert!(completed <= 1, "one grab completes at most once");
        prop_assert!(!run.session.is_grabbed());
    }

    #[test]
    fn frame_hook_receives_travel_from_start(
        start in (coord(), coord()),
        tolerance in 0u32..4,
        moves in proptest::collection::vec((coord(), coord()), 1..16),
    ) {
        let mut run = Run::new(tolerance);
        run.start(MouseEvent::down(start.0, start.1).into());
        for (x, y) in moves {
            let scheduled = matches!(
                run.step(&Step::Move(x, y)),
                Some(UpdateOutcome::Scheduled(_))
            );
            if scheduled {
                let origin: Point = run.session.record().pointer;
                run.step(&Step::Frame);
                prop_assert_eq!(
                    run.surface.deltas.last().copied(),
                    Some(PointerDelta::new(x - origin.x, y - origin.y))
                );
            }
        }
    }
}
