#![forbid(unsafe_code)]

//! Stage routing: listener bookkeeping across several surfaces.
//!
//! Run:
//!   cargo test -p grabkit-session --test stage_routing

mod common;

use common::{CONTEXT, OUTSIDE, RecordingSurface};
use grabkit_core::{ElementId, EventType, InputEvent, KeyEvent, MouseEvent, PointerDelta, TouchEvent};
use grabkit_runtime::{HandlerKind, InteractionConfig, ListenerCommand};
use grabkit_session::{HandlerOutcome, KeyOutcome, Stage, StartOutcome, UpdateOutcome};
use pretty_assertions::assert_eq;
use web_time::{Duration, Instant};

fn stage() -> Stage<RecordingSurface> {
    Stage::new(InteractionConfig::default()).unwrap()
}

fn ms(t0: Instant, n: u64) -> Instant {
    t0 + Duration::from_millis(n)
}

#[test]
fn invalid_config_is_rejected() {
    let config = InteractionConfig::default().with_precision_scale(0.0);
    assert!(Stage::<RecordingSurface>::new(config).is_err());
}

#[test]
fn surfaces_bind_keydown_on_add() {
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new());
    let b = stage.add_surface(RecordingSurface::new());
    assert_ne!(a, b);
    assert_eq!(stage.len(), 2);

    let commands = stage.drain_commands();
    assert_eq!(commands.len(), 2);
    for command in commands {
        let ListenerCommand::Attach(binding) = command else {
            panic!("expected attach, got {command:?}");
        };
        assert_eq!(binding.event_type, EventType::KeyDown);
        assert_eq!(binding.handler.kind, HandlerKind::Keydown);
    }
}

#[test]
fn moves_reach_only_the_grabbed_surface() {
    let t0 = Instant::now();
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new());
    let b = stage.add_surface(RecordingSurface::new());
    let _ = stage.drain_commands();

    let down = MouseEvent::down(10.0, 10.0).into();
    assert_eq!(stage.pointer_down(a, &down, None, t0), Some(StartOutcome::Grabbed));

    let report = stage.dispatch(&MouseEvent::moved(14.0, 12.0).into(), ms(t0, 5));
    assert_eq!(report.len(), 1);
    let (owner, outcome) = &report.outcomes[0];
    assert_eq!(*owner, a);
    assert!(matches!(outcome, HandlerOutcome::Update(UpdateOutcome::Scheduled(_))));

    assert_eq!(stage.animation_frame(ms(t0, 16)), 1);
    assert_eq!(
        stage.surface(a).unwrap().deltas,
        vec![PointerDelta::new(4.0, 2.0)]
    );
    assert!(stage.surface(b).unwrap().deltas.is_empty());
}

#[test]
fn mouse_up_ends_and_releases_listeners() {
    let t0 = Instant::now();
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new());
    stage.pointer_down(a, &MouseEvent::down(10.0, 10.0).into(), None, t0);
    let attached = stage.drain_commands();
    assert_eq!(attached.len(), 5);

    let report = stage.dispatch(&MouseEvent::up(10.0, 10.0).into(), ms(t0, 30));
    let signals: Vec<_> = report.end_signals().map(|(id, s)| (id, s.clone())).collect();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].0, a);

    // Only the keydown binding survives.
    assert_eq!(stage.registry().len(), 1);
    let detached = stage.drain_commands();
    assert_eq!(detached.len(), 4);
    assert!(detached.iter().all(|c| matches!(c, ListenerCommand::Detach(_))));

    // Later moves are not routed anywhere.
    assert!(stage.dispatch(&MouseEvent::moved(50.0, 50.0).into(), ms(t0, 35)).is_empty());

    stage.animation_frame(ms(t0, 40));
    stage.advance(ms(t0, 56));
    assert_eq!(signals[0].1.value(), Some(true));
}

#[test]
fn touch_end_routes_to_touch_session() {
    let t0 = Instant::now();
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new());
    stage.pointer_down(a, &TouchEvent::start(5.0, 5.0).into(), None, t0);

    // Compatibility mouse events after touch input are ignored.
    let report = stage.dispatch(&MouseEvent::moved(9.0, 9.0).into(), ms(t0, 2));
    assert!(matches!(
        report.outcomes[0].1,
        HandlerOutcome::Update(UpdateOutcome::Ignored(_))
    ));

    let report = stage.dispatch(&TouchEvent::end().into(), ms(t0, 10));
    assert_eq!(report.end_signals().count(), 1);
    assert!(!stage.session(a).unwrap().is_grabbed());
}

#[test]
fn keydown_reaches_every_surface() {
    let t0 = Instant::now();
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new());
    let b = stage.add_surface(RecordingSurface::new());

    let key: InputEvent = KeyEvent::new(27).with_target(OUTSIDE).into();
    let report = stage.dispatch(&key, t0);
    assert_eq!(report.len(), 2);
    assert!(
        report
            .outcomes
            .iter()
            .all(|(_, o)| matches!(o, HandlerOutcome::Key(KeyOutcome::Exited)))
    );
    for id in [a, b] {
        assert!(stage.surface(id).unwrap().blurred.is_empty());
    }
}

#[test]
fn failsafe_fires_through_stage() {
    let t0 = Instant::now();
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new());
    stage.pointer_down(a, &MouseEvent::down(500.0, 400.0).into(), None, t0);
    stage.dispatch(&MouseEvent::moved(2000.0, 400.0).into(), ms(t0, 10));

    assert_eq!(stage.next_deadline(), Some(ms(t0, 200)));
    assert!(stage.advance(ms(t0, 200)).is_empty());
    assert_eq!(stage.next_deadline(), Some(ms(t0, 3010)));

    let ended = stage.advance(ms(t0, 3010));
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].0, a);
    assert!(!stage.session(a).unwrap().is_grabbed());
}

#[test]
fn removing_a_surface_releases_its_listeners() {
    let t0 = Instant::now();
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new());
    let b = stage.add_surface(RecordingSurface::new());
    stage.pointer_down(a, &MouseEvent::down(10.0, 10.0).into(), None, t0);
    assert_eq!(stage.registry().len(), 6);

    let surface = stage.remove_surface(a, ms(t0, 5)).unwrap();
    assert_eq!(surface.grabbed(CONTEXT), Some(false));
    assert_eq!(surface.reflected, vec![true, false]);
    assert_eq!(stage.registry().len(), 1);
    assert_eq!(stage.registry().bindings()[0].handler.owner, b);
    assert!(stage.remove_surface(a, ms(t0, 6)).is_none());
    assert_eq!(
        stage.pointer_down(a, &MouseEvent::down(1.0, 1.0).into(), None, ms(t0, 7)),
        None
    );
}

#[test]
fn drag_listener_options() {
    let t0 = Instant::now();
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new());
    let _ = stage.drain_commands();
    stage.pointer_down(a, &MouseEvent::down(10.0, 10.0).into(), None, t0);

    let options = |event_type: EventType| {
        stage
            .registry()
            .bindings()
            .iter()
            .find(|b| b.event_type == event_type)
            .map(|b| b.options)
            .unwrap()
    };
    assert_eq!(options(EventType::TouchMove).passive, Some(true));
    assert_eq!(options(EventType::MouseMove).passive, None);
    assert!(options(EventType::MouseUp).once);
    assert!(options(EventType::TouchEnd).once);
    assert!(!options(EventType::KeyDown).once);
}

#[test]
fn explicit_target_supplies_pivot() {
    let t0 = Instant::now();
    let handle = ElementId::new(40);
    let mut stage = stage();
    let a = stage.add_surface(RecordingSurface::new().with_attribute(handle, "pivot", "7"));
    stage.pointer_down(a, &MouseEvent::down(1.0, 1.0).into(), Some(handle), t0);
    let record = stage.session(a).unwrap().record();
    assert_eq!(record.origin, Some(handle));
    assert_eq!(record.pivot.map(|p| p.get()), Some(7));
}
