#![forbid(unsafe_code)]

//! Global listener registry.
//!
//! Interaction sessions listen on the window/document while a drag is in
//! flight. The registry is the single place those listeners are recorded:
//!
//! - exactly one binding per `(event type, handler, target)` key, so repeated
//!   binds are no-ops;
//! - unbinding an absent binding is a no-op;
//! - `once` bindings are consumed by their first [`dispatch`].
//!
//! The registry does not touch a real DOM. Each effective bind/unbind queues a
//! [`ListenerCommand`] that the host drains and applies with
//! [`drain_commands`].
//!
//! [`dispatch`]: GlobalEventRegistry::dispatch
//! [`drain_commands`]: GlobalEventRegistry::drain_commands

use std::fmt;

use grabkit_core::{ElementId, EventType};

/// Identifier of one interactive surface (the owner of its handlers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u32);

impl SurfaceId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface-{}", self.0)
    }
}

/// Session handler a binding routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    DragUpdate,
    DragEnd,
    Keydown,
}

/// Handler identity: which surface, which handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerRef {
    pub owner: SurfaceId,
    pub kind: HandlerKind,
}

impl HandlerRef {
    #[must_use]
    pub const fn new(owner: SurfaceId, kind: HandlerKind) -> Self {
        Self { owner, kind }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Window,
    Document,
    DocumentElement,
    Element(ElementId),
}

/// `addEventListener` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ListenerOptions {
    /// Remove the binding after its first delivery.
    pub once: bool,
    /// `None` leaves the host default in place.
    pub passive: Option<bool>,
    pub capture: bool,
}

impl ListenerOptions {
    #[must_use]
    pub const fn once() -> Self {
        Self {
            once: true,
            passive: None,
            capture: false,
        }
    }

    #[must_use]
    pub const fn with_passive(mut self, passive: bool) -> Self {
        self.passive = Some(passive);
        self
    }
}

/// One registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub event_type: EventType,
    pub handler: HandlerRef,
    pub context: ListenerTarget,
    pub options: ListenerOptions,
}

impl Binding {
    fn matches(&self, event_type: EventType, handler: HandlerRef, context: ListenerTarget) -> bool {
        self.event_type == event_type && self.handler == handler && self.context == context
    }
}

/// Host command for attaching or detaching a real listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerCommand {
    Attach(Binding),
    Detach(Binding),
}

/// Registry of global listeners, in bind order.
#[derive(Debug, Default)]
pub struct GlobalEventRegistry {
    bindings: Vec<Binding>,
    commands: Vec<ListenerCommand>,
}

impl GlobalEventRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `event_type` on `context`.
    ///
    /// Returns `false` when the same key is already bound.
    pub fn bind(
        &mut self,
        event_type: EventType,
        handler: HandlerRef,
        context: ListenerTarget,
        options: ListenerOptions,
    ) -> bool {
        if self
            .bindings
            .iter()
            .any(|b| b.matches(event_type, handler, context))
        {
            return false;
        }
        let binding = Binding {
            event_type,
            handler,
            context,
            options,
        };
        tracing::trace!(
            target: "grabkit.registry",
            event_type = %event_type,
            owner = %handler.owner,
            handler = ?handler.kind,
            context = ?context,
            once = options.once,
            "listener bound"
        );
        self.bindings.push(binding);
        self.commands.push(ListenerCommand::Attach(binding));
        true
    }

    /// Unbind `handler` from `event_type`.
    ///
    /// With `context == None` the first binding of `(event_type, handler)` is
    /// removed, whatever its target. Returns `false` when nothing matched.
    pub fn unbind(
        &mut self,
        event_type: EventType,
        handler: HandlerRef,
        context: Option<ListenerTarget>,
    ) -> bool {
        let position = self.bindings.iter().position(|b| {
            b.event_type == event_type
                && b.handler == handler
                && context.is_none_or(|context| b.context == context)
        });
        let Some(index) = position else {
            return false;
        };
        let binding = self.bindings.remove(index);
        tracing::trace!(
            target: "grabkit.registry",
            event_type = %event_type,
            owner = %handler.owner,
            handler = ?handler.kind,
            "listener unbound"
        );
        self.commands.push(ListenerCommand::Detach(binding));
        true
    }

    /// Remove every binding.
    pub fn unbind_all(&mut self) {
        let removed = self.bindings.len();
        self.commands
            .extend(self.bindings.drain(..).map(ListenerCommand::Detach));
        if removed > 0 {
            tracing::debug!(target: "grabkit.registry", removed, "all listeners unbound");
        }
    }

    /// Remove every binding owned by `owner`. Returns how many were removed.
    pub fn unbind_owner(&mut self, owner: SurfaceId) -> usize {
        let mut removed = 0;
        let commands = &mut self.commands;
        self.bindings.retain(|binding| {
            if binding.handler.owner == owner {
                commands.push(ListenerCommand::Detach(*binding));
                removed += 1;
                false
            } else {
                true
            }
        });
        if removed > 0 {
            tracing::debug!(target: "grabkit.registry", owner = %owner, removed, "owner listeners unbound");
        }
        removed
    }

    #[must_use]
    pub fn is_bound(
        &self,
        event_type: EventType,
        handler: HandlerRef,
        context: ListenerTarget,
    ) -> bool {
        self.bindings
            .iter()
            .any(|b| b.matches(event_type, handler, context))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Current bindings in bind order.
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Handlers to run for an incoming `event_type`, in bind order.
    ///
    /// `once` bindings are consumed and their detach commands queued.
    pub fn dispatch(&mut self, event_type: EventType) -> Vec<HandlerRef> {
        let mut handlers = Vec::new();
        let commands = &mut self.commands;
        self.bindings.retain(|binding| {
            if binding.event_type != event_type {
                return true;
            }
            handlers.push(binding.handler);
            if binding.options.once {
                commands.push(ListenerCommand::Detach(*binding));
                false
            } else {
                true
            }
        });
        handlers
    }

    /// Take the queued attach/detach commands.
    pub fn drain_commands(&mut self) -> Vec<ListenerCommand> {
        std::mem::take(&mut self.commands)
    }
}
