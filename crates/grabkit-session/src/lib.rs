#![forbid(unsafe_code)]

//! Pointer interaction sessions for draggable and resizable surfaces.
//!
//! # Role in grabkit
//! `grabkit-session` turns raw pointer and keyboard signals into coherent
//! interactions: drag start, live updates, edge and viewport detection,
//! double-trigger (secondary) interactions and termination with cleanup.
//!
//! # Primary responsibilities
//! - **InteractionSession**: the per-surface state machine.
//! - **InteractionRecord**: the state of the current interaction.
//! - **ViewportGuard**: edge classification and the out-of-viewport failsafe.
//! - **InteractionSurface**: the host-side collaborator boundary.
//! - **Stage**: routes host events through the global listener registry to
//!   every surface of a page.
//!
//! # How it fits in the system
//! Sessions never read a clock or touch a DOM. Hosts hand them a
//! [`SessionContext`] per call and drain listener commands from the registry.

pub mod record;
pub mod session;
pub mod stage;
pub mod surface;
pub mod viewport_guard;

pub use record::{InteractionRecord, ResponseHandle};
pub use session::{
    EndOptions, IgnoredReason, InteractionSession, KeyOutcome, SessionContext, StartOutcome,
    UpdateOutcome,
};
pub use stage::{DispatchReport, HandlerOutcome, Stage};
pub use surface::{InteractionSurface, Positioning, SurfaceError};
pub use viewport_guard::ViewportGuard;
