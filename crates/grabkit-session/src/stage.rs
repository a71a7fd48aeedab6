#![forbid(unsafe_code)]

//! Multi-surface driver.
//!
//! A [`Stage`] owns the process-wide [`GlobalEventRegistry`] and every
//! interactive surface of a page. Hosts feed it raw input and paint/clock
//! ticks; the stage routes each event only to the handlers registered for it.
//!
//! ```ignore
//! let mut stage = Stage::new(InteractionConfig::default())?;
//! let id = stage.add_surface(my_surface);
//!
//! stage.pointer_down(id, &MouseEvent::down(10.0, 10.0).into(), None, now);
//! stage.dispatch(&MouseEvent::moved(14.0, 10.0).into(), now);
//! stage.animation_frame(now);
//! for command in stage.drain_commands() {
//!     // attach/detach real listeners
//! }
//! ```

use std::collections::BTreeMap;

use grabkit_core::{ElementId, InputEvent, PointerEvent};
use grabkit_runtime::{
    ConfigError, EndSignal, GlobalEventRegistry, HandlerKind, InteractionConfig,
    ListenerCommand, SurfaceId,
};
use web_time::Instant;

use crate::session::{
    EndOptions, InteractionSession, KeyOutcome, SessionContext, StartOutcome, UpdateOutcome,
};
use crate::surface::InteractionSurface;

const LOG_TARGET: &str = "grabkit.stage";

/// What one handler did with a dispatched event.
#[derive(Debug, Clone)]
pub enum HandlerOutcome {
    Update(UpdateOutcome),
    End(EndSignal),
    Key(KeyOutcome),
}

/// Outcomes of one [`Stage::dispatch`], in handler order.
#[derive(Debug, Clone, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<(SurfaceId, HandlerOutcome)>,
}

impl DispatchReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// End signals produced by this dispatch.
    pub fn end_signals(&self) -> impl Iterator<Item = (SurfaceId, &EndSignal)> {
        self.outcomes.iter().filter_map(|(id, outcome)| match outcome {
            HandlerOutcome::End(signal) | HandlerOutcome::Update(UpdateOutcome::Ended(signal)) => {
                Some((*id, signal))
            }
            _ => None,
        })
    }
}

#[derive(Debug)]
struct Entry<S> {
    session: InteractionSession,
    surface: S,
}

/// Registry plus the sessions of every surface on a page.
#[derive(Debug)]
pub struct Stage<S> {
    config: InteractionConfig,
    registry: GlobalEventRegistry,
    entries: BTreeMap<SurfaceId, Entry<S>>,
    next_id: u32,
}

impl<S: InteractionSurface> Stage<S> {
    /// Create an empty stage whose sessions share `config`.
    pub fn new(config: InteractionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validated()?,
            registry: GlobalEventRegistry::new(),
            entries: BTreeMap::new(),
            next_id: 0,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &InteractionConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &GlobalEventRegistry {
        &self.registry
    }

    /// Take the listener commands queued since the last call.
    pub fn drain_commands(&mut self) -> Vec<ListenerCommand> {
        self.registry.drain_commands()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn surface(&self, id: SurfaceId) -> Option<&S> {
        self.entries.get(&id).map(|entry| &entry.surface)
    }

    pub fn surface_mut(&mut self, id: SurfaceId) -> Option<&mut S> {
        self.entries.get_mut(&id).map(|entry| &mut entry.surface)
    }

    #[must_use]
    pub fn session(&self, id: SurfaceId) -> Option<&InteractionSession> {
        self.entries.get(&id).map(|entry| &entry.session)
    }

    pub fn session_mut(&mut self, id: SurfaceId) -> Option<&mut InteractionSession> {
        self.entries.get_mut(&id).map(|entry| &mut entry.session)
    }

    /// Register a surface and connect its session.
    pub fn add_surface(&mut self, surface: S) -> SurfaceId {
        let id = SurfaceId::new(self.next_id);
        self.next_id += 1;
        let session = InteractionSession::with_validated_config(id, self.config.clone());
        session.connect(&mut self.registry);
        self.entries.insert(id, Entry { session, surface });
        tracing::debug!(target: LOG_TARGET, surface = %id, "surface added");
        id
    }

    /// Disconnect and return a surface.
    pub fn remove_surface(&mut self, id: SurfaceId, now: Instant) -> Option<S> {
        let mut entry = self.entries.remove(&id)?;
        let mut cx = SessionContext::new(&mut entry.surface, &mut self.registry, now);
        entry.session.disconnect(&mut cx);
        tracing::debug!(target: LOG_TARGET, surface = %id, "surface removed");
        Some(entry.surface)
    }

    /// Deliver a pointer-down on surface `id`.
    pub fn pointer_down(
        &mut self,
        id: SurfaceId,
        event: &PointerEvent,
        explicit_target: Option<ElementId>,
        now: Instant,
    ) -> Option<StartOutcome> {
        let Some(entry) = self.entries.get_mut(&id) else {
            tracing::debug!(target: LOG_TARGET, surface = %id, "pointer down on unknown surface");
            return None;
        };
        let mut cx = SessionContext::new(&mut entry.surface, &mut self.registry, now);
        Some(entry.session.start(&mut cx, event, explicit_target))
    }

    /// Route a global event to the handlers bound for its type.
    pub fn dispatch(&mut self, event: &InputEvent, now: Instant) -> DispatchReport {
        let event_type = event.event_type();
        let handlers = self.registry.dispatch(event_type);
        let mut report = DispatchReport::default();

        for handler in handlers {
            let registry = &mut self.registry;
            let Some(entry) = self.entries.get_mut(&handler.owner) else {
                tracing::warn!(
                    target: LOG_TARGET,
                    surface = %handler.owner,
                    event_type = %event_type,
                    "handler bound for unknown surface"
                );
                continue;
            };
            let mut cx = SessionContext::new(&mut entry.surface, registry, now);
            let outcome = match (handler.kind, event) {
                (HandlerKind::DragUpdate, InputEvent::Pointer(pointer)) => {
                    HandlerOutcome::Update(entry.session.update(&mut cx, Some(pointer)))
                }
                (HandlerKind::DragEnd, InputEvent::Pointer(pointer)) => HandlerOutcome::End(
                    entry
                        .session
                        .end(&mut cx, Some(pointer), EndOptions::default()),
                ),
                (HandlerKind::Keydown, InputEvent::Key(key)) => {
                    HandlerOutcome::Key(entry.session.handle_keydown(&mut cx, key))
                }
                _ => continue,
            };
            report.outcomes.push((handler.owner, outcome));
        }

        tracing::trace!(
            target: LOG_TARGET,
            event_type = %event_type,
            handled = report.len(),
            "event dispatched"
        );
        report
    }

    /// Run every session's frame tasks for this paint tick.
    pub fn animation_frame(&mut self, now: Instant) -> usize {
        let registry = &mut self.registry;
        self.entries
            .values_mut()
            .map(|entry| {
                let mut cx = SessionContext::new(&mut entry.surface, &mut *registry, now);
                entry.session.on_animation_frame(&mut cx)
            })
            .sum()
    }

    /// Fire due timers and throttled operations of every session.
    ///
    /// Returns the end signals of sessions ended by their failsafe.
    pub fn advance(&mut self, now: Instant) -> Vec<(SurfaceId, EndSignal)> {
        let registry = &mut self.registry;
        let mut ended = Vec::new();
        for (id, entry) in &mut self.entries {
            let mut cx = SessionContext::new(&mut entry.surface, &mut *registry, now);
            if let Some(signal) = entry.session.advance(&mut cx) {
                ended.push((*id, signal));
            }
        }
        ended
    }

    /// Earliest instant at which [`advance`](Self::advance) has work.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries
            .values()
            .filter_map(|entry| entry.session.next_deadline())
            .min()
    }
}
