#![forbid(unsafe_code)]

//! grabkit public facade crate.
//!
//! Re-exports the types a host needs to wire pointer interactions into its
//! rendering layer, plus a prelude for day-to-day usage.
//!
//! # Example
//!
//! ```ignore
//! use grabkit::prelude::*;
//!
//! let mut stage = Stage::new(InteractionConfig::default())?;
//! let id = stage.add_surface(MySurface::new());
//! stage.pointer_down(id, &MouseEvent::down(10.0, 10.0).into(), None, Instant::now());
//! for command in stage.drain_commands() {
//!     host.apply(command);
//! }
//! ```

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use grabkit_core::{
    AxisPair, AxisSign, ElementId, EventFamily, EventType, InputEvent, KeyClass, KeyEvent,
    MouseButton, MouseEvent, MouseEventKind, OffsetBox, Pivot, Point, PointerDelta, PointerEvent,
    PointerSample, Rect, TouchEvent, TouchEventKind, TouchPoint, Translation,
};

// --- Runtime re-exports ----------------------------------------------------

pub use grabkit_runtime::{
    Binding, ConfigError, EndSignal, GlobalEventRegistry, HandlerKind, HandlerRef,
    InteractionConfig, ListenerCommand, ListenerOptions, ListenerTarget, SurfaceId,
};

// --- Session re-exports ----------------------------------------------------

pub use grabkit_session::{
    DispatchReport, EndOptions, HandlerOutcome, IgnoredReason, InteractionRecord,
    InteractionSession, InteractionSurface, KeyOutcome, Positioning, SessionContext, Stage,
    StartOutcome, SurfaceError, UpdateOutcome, ViewportGuard,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ElementId, EndOptions, EndSignal, Error, HandlerOutcome, InputEvent, InteractionConfig,
        InteractionSession, InteractionSurface, KeyEvent, ListenerCommand, MouseEvent, OffsetBox,
        Pivot, PointerDelta, PointerEvent, Rect, Result, SessionContext, Stage, StartOutcome,
        SurfaceError, SurfaceId, TouchEvent, UpdateOutcome,
    };

    pub use crate::{core, runtime, session};
}

pub use grabkit_core as core;
pub use grabkit_runtime as runtime;
pub use grabkit_session as session;
