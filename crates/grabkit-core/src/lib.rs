#![forbid(unsafe_code)]

//! Core: pointer/key event vocabulary, sampling, and geometry.
//!
//! # Role in grabkit
//! `grabkit-core` is the input layer. It owns the normalized event types that
//! the interaction session consumes and the small amount of math needed to
//! reason about them (points, rectangles, per-axis signs).
//!
//! # Primary responsibilities
//! - **Event**: tagged pointer (mouse/touch) and key events, classified once at
//!   the boundary so downstream code never probes types.
//! - **Sampler**: extract a client position from a pointer event and compare
//!   input families.
//! - **Geometry**: points, deltas, rectangles, offset boxes, axis signs.
//! - **Pivot / transform**: parse the attribute and style values a surface
//!   exposes at drag start.
//!
//! # How it fits in the system
//! `grabkit-runtime` schedules deferred work and tracks global listeners;
//! `grabkit-session` drives the drag state machine on top of both crates.

pub mod event;
pub mod geometry;
pub mod pivot;
pub mod sampler;
pub mod transform;

pub use event::{
    ElementId, EventType, InputEvent, KeyClass, KeyEvent, MouseButton, MouseEvent,
    MouseEventKind, PointerEvent, TouchEvent, TouchEventKind, TouchPoint,
};
pub use geometry::{AxisPair, AxisSign, OffsetBox, Point, PointerDelta, Rect, Translation};
pub use pivot::Pivot;
pub use sampler::{EventFamily, PointerSample};
