#![forbid(unsafe_code)]

//! The pointer interaction state machine.
//!
//! # Lifecycle
//!
//! ```text
//!   start ──▶ Grabbed ──update*──▶ end ──▶ end frame ──▶ resolve(true) ──▶ Idle
//!     │                                                      (record reset)
//!     └─ second start inside the double-trigger window ──▶ secondary (no signal)
//! ```
//!
//! # Host contract
//!
//! The session is driven entirely by its host:
//!
//! - pointer-down events go to [`InteractionSession::start`];
//! - events routed through the [`GlobalEventRegistry`] go to
//!   [`update`](InteractionSession::update), [`end`](InteractionSession::end)
//!   and [`handle_keydown`](InteractionSession::handle_keydown);
//! - paint ticks call [`on_animation_frame`](InteractionSession::on_animation_frame);
//! - the passage of time is reported through
//!   [`advance`](InteractionSession::advance).
//!
//! Every call carries a [`SessionContext`] holding the surface, the shared
//! registry and the current instant. The session owns all of its deferred work
//! (frames, the failsafe timer, throttled operations) as plain data, so a run
//! is fully determined by the sequence of calls.
//!
//! # Invariants
//!
//! 1. At most one update frame and one response (failsafe or end frame) are
//!    live; each is cancelled before its slot is reassigned.
//! 2. While a record holds an event, events of the other input family are
//!    ignored.
//! 3. Every signal returned by [`end`](InteractionSession::end) resolves
//!    exactly once.
//! 4. Secondary interactions never set the grabbed state and produce no
//!    signal.

use grabkit_core::event::{KeyClass, KeyEvent, MouseButton, PointerEvent};
use grabkit_core::pivot::PIVOT_ATTRIBUTE;
use grabkit_core::sampler::{position, same_family};
use grabkit_core::transform::parse_translation;
use grabkit_core::{AxisPair, ElementId, EventType, Pivot, Point, PointerDelta, Translation};
use grabkit_runtime::{
    AnimationFrameScheduler, ConfigError, EndResolver, EndSignal, FrameHandle,
    GlobalEventRegistry, HandlerKind, HandlerRef, InteractionConfig, ListenerOptions,
    ListenerTarget, SurfaceId, ThrottleRegistry, TimerHandle, TimerQueue,
};
use web_time::Instant;

use crate::record::{InteractionRecord, ResponseHandle};
use crate::surface::InteractionSurface;
use crate::viewport_guard::ViewportGuard;

const LOG_TARGET: &str = "grabkit.session";

/// Collaborators of one session call.
pub struct SessionContext<'a, S: ?Sized> {
    pub surface: &'a mut S,
    pub registry: &'a mut GlobalEventRegistry,
    pub now: Instant,
}

impl<'a, S: ?Sized> SessionContext<'a, S> {
    pub fn new(surface: &'a mut S, registry: &'a mut GlobalEventRegistry, now: Instant) -> Self {
        Self {
            surface,
            registry,
            now,
        }
    }
}

/// Deterministic reason why an incoming signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoredReason {
    /// The session is suppressed.
    Prevented,
    /// The event belongs to another input family than the recorded one.
    FamilyMismatch,
    /// Mouse button other than the primary one.
    ButtonNotAllowed,
    /// Touch event without active touches.
    NoPointerPosition,
    /// A drag is already running and the double-trigger window has closed.
    AlreadyGrabbed,
    /// No interaction surface resolved.
    MissingSurface,
    /// No drag is running.
    NotGrabbed,
}

/// Result of [`InteractionSession::start`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Grabbed,
    /// Second trigger inside the double-trigger window.
    Secondary,
    Ignored(IgnoredReason),
}

/// Result of [`InteractionSession::update`].
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// A frame carrying the new delta was scheduled.
    Scheduled(FrameHandle),
    /// Absorbed by the tolerance; the start position was re-seeded.
    Absorbed,
    /// Same position as the previous sample.
    Unchanged,
    /// The update ended the session.
    Ended(EndSignal),
    Ignored(IgnoredReason),
}

/// Result of [`InteractionSession::handle_keydown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Exit key: current element cleared.
    Exited,
    /// Meta key: a refocus on the active element is pending.
    RefocusScheduled,
    /// The target became the current element.
    Tracked(Option<ElementId>),
    Ignored(IgnoredReason),
}

/// Options of [`InteractionSession::end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOptions {
    /// Clamp the context into the viewport in the end frame.
    pub fit_to_viewport: bool,
}

impl Default for EndOptions {
    fn default() -> Self {
        Self {
            fit_to_viewport: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FrameTask {
    Apply { point: Point },
    EndFrame { options: EndOptions },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerTask {
    Failsafe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ThrottleOp {
    ClickReset,
    EndResolve,
    LayoutUpdate,
    KeyboardRefocus,
}

/// One interactive surface's interaction state machine.
#[derive(Debug)]
pub struct InteractionSession {
    id: SurfaceId,
    config: InteractionConfig,
    guard: ViewportGuard,
    record: InteractionRecord,
    grabbed: bool,
    prevented: bool,
    trigger_count: u32,
    interaction_target: Option<ElementId>,
    interaction_host: Option<ElementId>,
    frames: AnimationFrameScheduler<FrameTask>,
    timers: TimerQueue<TimerTask>,
    throttle: ThrottleRegistry<ThrottleOp>,
    pending_end: Option<EndResolver>,
    last_delta: Option<PointerDelta>,
}

impl InteractionSession {
    /// Create a session for the surface `id`.
    pub fn new(id: SurfaceId, config: InteractionConfig) -> Result<Self, ConfigError> {
        Ok(Self::with_validated_config(id, config.validated()?))
    }

    pub(crate) fn with_validated_config(id: SurfaceId, config: InteractionConfig) -> Self {
        Self {
            id,
            guard: ViewportGuard::new(config.precision_scale, config.failsafe_timeout()),
            throttle: ThrottleRegistry::new(config.throttle_delay()),
            config,
            record: InteractionRecord::default(),
            grabbed: false,
            prevented: false,
            trigger_count: 0,
            interaction_target: None,
            interaction_host: None,
            frames: AnimationFrameScheduler::new(),
            timers: TimerQueue::new(),
            pending_end: None,
            last_delta: None,
        }
    }

    #[must_use]
    pub const fn id(&self) -> SurfaceId {
        self.id
    }

    #[must_use]
    pub const fn config(&self) -> &InteractionConfig {
        &self.config
    }

    #[must_use]
    pub const fn record(&self) -> &InteractionRecord {
        &self.record
    }

    #[must_use]
    pub const fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    #[must_use]
    pub const fn is_prevented(&self) -> bool {
        self.prevented
    }

    /// Suppress (or re-enable) the session. While suppressed, starts and
    /// keyboard events are ignored and updates end the session.
    pub fn set_prevented(&mut self, prevented: bool) {
        self.prevented = prevented;
    }

    /// Triggers counted in the current double-trigger window.
    #[must_use]
    pub const fn trigger_count(&self) -> u32 {
        self.trigger_count
    }

    #[must_use]
    pub const fn interaction_target(&self) -> Option<ElementId> {
        self.interaction_target
    }

    #[must_use]
    pub const fn interaction_host(&self) -> Option<ElementId> {
        self.interaction_host
    }

    /// Delta returned by the last frame hook.
    #[must_use]
    pub const fn last_delta(&self) -> Option<PointerDelta> {
        self.last_delta
    }

    /// Number of frame tasks waiting for the next paint tick.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Whether the out-of-viewport failsafe is armed.
    #[must_use]
    pub fn failsafe_armed(&self) -> bool {
        self.record
            .failsafe()
            .is_some_and(|handle| self.timers.is_armed(handle))
    }

    /// Number of armed timers.
    #[must_use]
    pub fn armed_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [self.timers.next_deadline(), self.throttle.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    fn handler(&self, kind: HandlerKind) -> HandlerRef {
        HandlerRef::new(self.id, kind)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    /// Register the global keydown handler.
    pub fn connect(&self, registry: &mut GlobalEventRegistry) -> bool {
        registry.bind(
            EventType::KeyDown,
            self.handler(HandlerKind::Keydown),
            ListenerTarget::Document,
            ListenerOptions::default(),
        )
    }

    /// Tear the session down: drop all deferred work and release every
    /// listener it owns. A pending end signal resolves to `false`.
    pub fn disconnect<S: InteractionSurface + ?Sized>(&mut self, cx: &mut SessionContext<'_, S>) {
        if self.grabbed {
            if let Some(context) = self.record.context {
                cx.surface.set_grabbed(context, false);
            }
            cx.surface.reflect_grabbed(false);
        }
        self.frames.clear();
        self.timers.clear();
        self.throttle.clear();
        self.pending_end = None;
        self.grabbed = false;
        self.trigger_count = 0;
        self.record.reset();
        let removed = cx.registry.unbind_owner(self.id);
        tracing::debug!(target: LOG_TARGET, owner = %self.id, removed, "session disconnected");
    }

    // ── Start ───────────────────────────────────────────────────────────

    /// Handle a pointer-down on the surface.
    pub fn start<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
        event: &PointerEvent,
        explicit_target: Option<ElementId>,
    ) -> StartOutcome {
        if self.prevented {
            return self.ignore_start(IgnoredReason::Prevented);
        }
        if self.record.event.is_some() && !same_family(event, self.record.event.as_ref()) {
            return self.ignore_start(IgnoredReason::FamilyMismatch);
        }
        if matches!(event, PointerEvent::Mouse(mouse) if mouse.button != MouseButton::Primary) {
            return self.ignore_start(IgnoredReason::ButtonNotAllowed);
        }
        let sample = position(event);
        if !sample.authoritative {
            return self.ignore_start(IgnoredReason::NoPointerPosition);
        }
        if self.grabbed && self.trigger_count == 0 {
            return self.ignore_start(IgnoredReason::AlreadyGrabbed);
        }

        let Some(context) = self.resolve_context(cx.surface) else {
            return self.ignore_start(IgnoredReason::MissingSurface);
        };

        self.record.updates = 0;
        if let Some(target) = explicit_target.or_else(|| event.target()) {
            self.record.origin = Some(target);
            self.record.pivot = cx
                .surface
                .attribute(target, PIVOT_ATTRIBUTE)
                .as_deref()
                .and_then(Pivot::parse)
                .filter(|pivot| pivot.get() != 0);
        }

        if self.trigger_count == 0 {
            self.record.context = Some(context);
            self.record.host = self.interaction_host;
        }

        self.trigger_count += 1;
        if self.trigger_count == 1 {
            self.throttle.cancel(ThrottleOp::ClickReset);
            self.throttle.throttle_for(
                ThrottleOp::ClickReset,
                self.config.double_trigger_window(),
                cx.now,
            );
        }

        if self.trigger_count > 1 {
            self.secondary(cx, context);
            return StartOutcome::Secondary;
        }

        self.grabbed = true;
        cx.surface.reflect_grabbed(true);

        self.record.translation = cx
            .surface
            .transform(context)
            .as_deref()
            .and_then(parse_translation)
            .unwrap_or(Translation::ZERO);
        self.record.offset = cx.surface.offset_box(context);
        self.record.pointer = sample.point;
        self.record.previous_pointer = sample.point;
        if self.record.event.is_none() {
            self.record.event = Some(event.clone());
        }

        let owner = cx.surface.owner();
        cx.surface.set_current_element(Some(owner));
        self.bind_drag_listeners(cx.registry);

        tracing::debug!(
            target: LOG_TARGET,
            owner = %self.id,
            context = %context,
            event_type = %event.event_type(),
            x = sample.point.x,
            y = sample.point.y,
            pivot = ?self.record.pivot.map(Pivot::get),
            anchor = ?self.record.pivot.and_then(Pivot::anchor).map(AxisPair::values),
            "interaction started"
        );
        StartOutcome::Grabbed
    }

    fn resolve_context<S: InteractionSurface + ?Sized>(&mut self, surface: &mut S) -> Option<ElementId> {
        if let Some(target) = self.interaction_target {
            return Some(target);
        }
        let target = surface.resolve_interaction_surface()?;
        self.interaction_target = Some(target);
        self.interaction_host = Some(
            surface
                .resolve_host_of(target)
                .unwrap_or_else(|| surface.owner()),
        );
        Some(target)
    }

    fn secondary<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
        context: ElementId,
    ) {
        if let Some(request) = self.record.request.take() {
            self.frames.cancel(request);
        }
        if let Some(ResponseHandle::EndFrame(frame)) = self.record.response {
            self.frames.cancel(frame);
            self.record.response = None;
            self.pending_end = None;
            cx.surface.set_grabbed(context, false);
        }
        self.grabbed = false;
        cx.surface.reflect_grabbed(false);

        tracing::debug!(
            target: LOG_TARGET,
            owner = %self.id,
            context = %context,
            triggers = self.trigger_count,
            "secondary interaction"
        );

        if cx.surface.positioning().is_out_of_flow() {
            if let Err(error) = cx.surface.stretch_to_fill(context, self.record.pivot) {
                tracing::error!(
                    target: LOG_TARGET,
                    owner = %self.id,
                    context = %context,
                    %error,
                    "stretch to fill failed"
                );
            }
            self.throttle.throttle(ThrottleOp::LayoutUpdate, cx.now);
        }
    }

    fn ignore_start(&self, reason: IgnoredReason) -> StartOutcome {
        tracing::debug!(target: LOG_TARGET, owner = %self.id, ?reason, "start ignored");
        StartOutcome::Ignored(reason)
    }

    // ── Update ──────────────────────────────────────────────────────────

    /// Handle a global pointer move. `None` ends the session.
    pub fn update<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
        event: Option<&PointerEvent>,
    ) -> UpdateOutcome {
        let Some(event) = event else {
            return UpdateOutcome::Ended(self.end(cx, None, EndOptions::default()));
        };
        if !same_family(event, self.record.event.as_ref()) {
            return self.ignore_update(IgnoredReason::FamilyMismatch);
        }
        if !self.grabbed {
            return self.ignore_update(IgnoredReason::NotGrabbed);
        }
        let sample = position(event);
        if !sample.authoritative {
            return self.ignore_update(IgnoredReason::NoPointerPosition);
        }
        let point = sample.point;

        self.record.updates = self.record.updates.saturating_add(1);
        if self.config.tolerance > self.record.updates {
            self.record.pointer = point;
            return UpdateOutcome::Absorbed;
        }

        if self.prevented {
            return UpdateOutcome::Ended(self.end(cx, Some(event), EndOptions::default()));
        }

        if self.record.previous_pointer == point {
            return UpdateOutcome::Unchanged;
        }

        let velocity = AxisPair::motion(self.record.previous_pointer, point);
        self.record.velocity = Some(velocity);

        if self.record.pivot.is_some_and(Pivot::is_center) {
            if let Some(context) = self.record.context {
                cx.surface.set_grabbed(context, true);
                let owner = cx.surface.owner();
                if context != owner {
                    cx.surface.set_grabbed(owner, true);
                }
            }
        }

        self.record.previous_pointer = point;

        let viewport = cx.surface.bounding_rect();
        let edge = self
            .guard
            .classify(point, viewport, cx.surface.device_pixel_ratio());
        self.record.edge = Some(edge);

        if ViewportGuard::contains(viewport, point) {
            if ViewportGuard::disarm(&mut self.record.response, &mut self.timers) {
                tracing::debug!(target: LOG_TARGET, owner = %self.id, "failsafe disarmed");
            }
        } else if self
            .guard
            .arm(&mut self.record.response, &mut self.timers, cx.now, TimerTask::Failsafe)
            .is_some()
        {
            tracing::debug!(target: LOG_TARGET, owner = %self.id, "failsafe armed");
        }

        if let Some(request) = self.record.request.take() {
            self.frames.cancel(request);
        }
        let handle = self.frames.schedule(FrameTask::Apply { point });
        self.record.request = Some(handle);

        tracing::trace!(
            target: LOG_TARGET,
            owner = %self.id,
            x = point.x,
            y = point.y,
            velocity = ?velocity.values(),
            edge = ?edge.values(),
            updates = self.record.updates,
            "update scheduled"
        );
        UpdateOutcome::Scheduled(handle)
    }

    fn ignore_update(&self, reason: IgnoredReason) -> UpdateOutcome {
        tracing::trace!(target: LOG_TARGET, owner = %self.id, ?reason, "update ignored");
        UpdateOutcome::Ignored(reason)
    }

    // ── End ─────────────────────────────────────────────────────────────

    /// End the interaction.
    ///
    /// The returned signal resolves to `true` once the end frame ran and the
    /// deferred resolution fired, or to `false` when nothing was rendered
    /// (not grabbed, no context, or `event` from a foreign input family).
    pub fn end<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
        event: Option<&PointerEvent>,
        options: EndOptions,
    ) -> EndSignal {
        if let Some(event) = event {
            if !same_family(event, self.record.event.as_ref()) {
                tracing::debug!(
                    target: LOG_TARGET,
                    owner = %self.id,
                    event_type = %event.event_type(),
                    "end ignored for foreign event"
                );
                return EndSignal::resolved(false);
            }
        }

        if let Some(request) = self.record.request.take() {
            self.frames.cancel(request);
        }

        let mut signal = None;
        if self.grabbed {
            if let Some(context) = self.record.context {
                self.cancel_response();
                let frame = self.frames.schedule(FrameTask::EndFrame { options });
                self.record.response = Some(ResponseHandle::EndFrame(frame));
                let (end_signal, resolver) = EndSignal::pair();
                self.pending_end = Some(resolver);
                signal = Some(end_signal);
                tracing::debug!(
                    target: LOG_TARGET,
                    owner = %self.id,
                    context = %context,
                    updates = self.record.updates,
                    "interaction ending"
                );
            }
        }

        self.grabbed = false;
        cx.surface.reflect_grabbed(false);
        self.unbind_drag_listeners(cx.registry);

        signal.unwrap_or_else(|| EndSignal::resolved(false))
    }

    fn cancel_response(&mut self) -> Option<ResponseHandle> {
        let response = self.record.response.take()?;
        match response {
            ResponseHandle::Failsafe(timer) => {
                self.timers.cancel(timer);
            }
            ResponseHandle::EndFrame(frame) => {
                self.frames.cancel(frame);
            }
        }
        Some(response)
    }

    /// Reset the record and the cached interaction target.
    ///
    /// A running drag is released first: the grabbed state is cleared and the
    /// drag listeners are unbound. Returns `false` (and logs a warning) when
    /// the record was already empty.
    pub fn clear<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
    ) -> bool {
        if self.grabbed {
            if let Some(context) = self.record.context {
                cx.surface.set_grabbed(context, false);
            }
            self.grabbed = false;
            cx.surface.reflect_grabbed(false);
            self.unbind_drag_listeners(cx.registry);
            tracing::debug!(target: LOG_TARGET, owner = %self.id, "running interaction released");
        }
        if self.record.is_empty() {
            tracing::warn!(
                target: LOG_TARGET,
                owner = %self.id,
                "unable to clear an empty interaction record"
            );
            return false;
        }
        if let Some(request) = self.record.request.take() {
            self.frames.cancel(request);
        }
        if let Some(ResponseHandle::EndFrame(_)) = self.cancel_response() {
            self.pending_end = None;
        }
        self.record.reset();
        self.interaction_target = None;
        self.interaction_host = None;
        true
    }

    // ── Keyboard ────────────────────────────────────────────────────────

    /// Route a global keydown.
    pub fn handle_keydown<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
        key: &KeyEvent,
    ) -> KeyOutcome {
        if self.prevented {
            return KeyOutcome::Ignored(IgnoredReason::Prevented);
        }
        match key.class() {
            KeyClass::Exit => {
                cx.surface.set_current_element(None);
                if let Some(target) = key.target {
                    if cx.surface.is_component_context(target) {
                        cx.surface.blur(target);
                    }
                }
                KeyOutcome::Exited
            }
            KeyClass::Meta => {
                self.throttle.throttle(ThrottleOp::KeyboardRefocus, cx.now);
                KeyOutcome::RefocusScheduled
            }
            KeyClass::Confirm | KeyClass::Other => {
                cx.surface.set_current_element(key.target);
                KeyOutcome::Tracked(key.target)
            }
        }
    }

    // ── Deferred work ───────────────────────────────────────────────────

    /// Run the frame tasks queued before this paint tick. Returns how many ran.
    pub fn on_animation_frame<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
    ) -> usize {
        let ready = self.frames.take_ready();
        let count = ready.len();
        for (handle, task) in ready {
            match task {
                FrameTask::Apply { point } => self.apply_frame(cx, handle, point),
                FrameTask::EndFrame { options } => self.complete_end(cx, handle, options),
            }
        }
        count
    }

    fn apply_frame<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
        handle: FrameHandle,
        point: Point,
    ) {
        if self.record.request == Some(handle) {
            self.record.request = None;
        }
        let delta = point - self.record.pointer;
        let applied = cx.surface.on_frame_update(delta);
        self.last_delta = Some(applied);
        tracing::trace!(
            target: LOG_TARGET,
            owner = %self.id,
            dx = applied.x,
            dy = applied.y,
            "frame update applied"
        );
    }

    fn complete_end<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
        handle: FrameHandle,
        options: EndOptions,
    ) {
        if self.record.response == Some(ResponseHandle::EndFrame(handle)) {
            self.record.response = None;
        }
        if let Some(context) = self.record.context {
            if options.fit_to_viewport {
                if let Err(error) = cx.surface.fit_to_viewport(context) {
                    tracing::error!(
                        target: LOG_TARGET,
                        owner = %self.id,
                        context = %context,
                        %error,
                        "fit to viewport failed"
                    );
                }
            }
            cx.surface.set_grabbed(context, false);
        }
        if self.record.event.is_some() {
            self.throttle.throttle(ThrottleOp::EndResolve, cx.now);
        } else if let Some(resolver) = self.pending_end.take() {
            resolver.resolve(false);
        }
    }

    /// Fire due timers and throttled operations.
    ///
    /// Returns the signal of the end triggered by the out-of-viewport
    /// failsafe, if it fired.
    pub fn advance<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
    ) -> Option<EndSignal> {
        let mut failsafe_end = None;
        for (handle, task) in self.timers.take_due(cx.now) {
            match task {
                TimerTask::Failsafe => failsafe_end = Some(self.fire_failsafe(cx, handle)),
            }
        }

        for op in self.throttle.take_due(cx.now) {
            match op {
                ThrottleOp::ClickReset => self.close_trigger_window(cx.registry),
                ThrottleOp::EndResolve => self.resolve_end(),
                ThrottleOp::LayoutUpdate => cx
                    .surface
                    .request_layout_update(!self.config.enable_document_events),
                ThrottleOp::KeyboardRefocus => {
                    let active = cx.surface.active_element();
                    cx.surface.set_current_element(active);
                }
            }
        }
        failsafe_end
    }

    fn fire_failsafe<S: InteractionSurface + ?Sized>(
        &mut self,
        cx: &mut SessionContext<'_, S>,
        handle: TimerHandle,
    ) -> EndSignal {
        if self.record.failsafe() == Some(handle) {
            self.record.response = None;
        }
        tracing::warn!(
            target: LOG_TARGET,
            owner = %self.id,
            timeout_ms = self.config.failsafe_timeout_ms,
            "pointer stayed outside the viewport, ending interaction"
        );
        self.end(cx, None, EndOptions::default())
    }

    /// Reset the trigger counter. A session left idle by a secondary
    /// interaction, with no end pending, also drops its record and drag
    /// listeners so the next start may use either input family.
    fn close_trigger_window(&mut self, registry: &mut GlobalEventRegistry) {
        self.trigger_count = 0;
        if self.grabbed || self.pending_end.is_some() || self.record.is_empty() {
            return;
        }
        if let Some(request) = self.record.request.take() {
            self.frames.cancel(request);
        }
        self.cancel_response();
        self.record.reset();
        self.unbind_drag_listeners(registry);
        tracing::debug!(target: LOG_TARGET, owner = %self.id, "idle interaction record reset");
    }

    fn resolve_end(&mut self) {
        if let Some(resolver) = self.pending_end.take() {
            resolver.resolve(true);
            tracing::debug!(target: LOG_TARGET, owner = %self.id, "interaction completed");
        }
        if !self.grabbed {
            self.record.reset();
        }
    }

    // ── Listeners ───────────────────────────────────────────────────────

    fn bind_drag_listeners(&self, registry: &mut GlobalEventRegistry) {
        let update = self.handler(HandlerKind::DragUpdate);
        let end = self.handler(HandlerKind::DragEnd);
        registry.bind(
            EventType::MouseMove,
            update,
            ListenerTarget::DocumentElement,
            ListenerOptions::default(),
        );
        // Touch moves are never cancelled.
        registry.bind(
            EventType::TouchMove,
            update,
            ListenerTarget::DocumentElement,
            ListenerOptions::default().with_passive(true),
        );
        registry.bind(
            EventType::TouchEnd,
            end,
            ListenerTarget::Document,
            ListenerOptions::once(),
        );
        registry.bind(
            EventType::MouseUp,
            end,
            ListenerTarget::Document,
            ListenerOptions::once(),
        );
    }

    fn unbind_drag_listeners(&self, registry: &mut GlobalEventRegistry) {
        let update = self.handler(HandlerKind::DragUpdate);
        let end = self.handler(HandlerKind::DragEnd);
        registry.unbind(EventType::MouseMove, update, None);
        registry.unbind(EventType::MouseUp, end, None);
        registry.unbind(EventType::TouchMove, update, None);
        registry.unbind(EventType::TouchEnd, end, None);
    }
}
