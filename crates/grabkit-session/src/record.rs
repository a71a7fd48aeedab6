#![forbid(unsafe_code)]

//! Per-session interaction state.

use grabkit_core::{AxisPair, ElementId, OffsetBox, Pivot, Point, PointerEvent, Translation};
use grabkit_runtime::{FrameHandle, TimerHandle};

/// What currently occupies the response slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseHandle {
    /// Out-of-viewport failsafe timer.
    Failsafe(TimerHandle),
    /// Clamp-and-complete frame scheduled by `end`.
    EndFrame(FrameHandle),
}

/// State of the current interaction.
///
/// Created empty with its session, filled by `start`, mutated by `update` and
/// reset once the end completion resolves (or by `clear`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionRecord {
    /// Element the interaction was triggered from.
    pub origin: Option<ElementId>,
    /// Element being manipulated.
    pub context: Option<ElementId>,
    pub host: Option<ElementId>,
    /// Originating event; fixes the input family for the whole session.
    pub event: Option<PointerEvent>,
    pub pivot: Option<Pivot>,
    /// Translation of the context when the drag started.
    pub translation: Translation,
    /// Offset geometry of the context when the drag started.
    pub offset: OffsetBox,
    /// Start position; deltas are measured from here.
    pub pointer: Point,
    pub previous_pointer: Point,
    pub velocity: Option<AxisPair>,
    pub edge: Option<AxisPair>,
    pub updates: u32,
    /// Pending update frame.
    pub request: Option<FrameHandle>,
    pub response: Option<ResponseHandle>,
}

impl InteractionRecord {
    /// Whether every field is unset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The failsafe timer, when it occupies the response slot.
    #[must_use]
    pub fn failsafe(&self) -> Option<TimerHandle> {
        match self.response {
            Some(ResponseHandle::Failsafe(handle)) => Some(handle),
            _ => None,
        }
    }
}
