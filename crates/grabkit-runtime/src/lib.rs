#![forbid(unsafe_code)]

//! Cooperative scheduling primitives for grabkit interaction sessions.
//!
//! # Role in grabkit
//! `grabkit-runtime` owns every piece of deferred work an interaction session
//! can create. Nothing here spawns threads or reads a clock: the host passes
//! `now` in and pulls due work out, which keeps sessions deterministic and
//! WASM-friendly.
//!
//! # Primary responsibilities
//! - **AnimationFrameScheduler**: tasks that run on the next paint tick.
//! - **TimerQueue**: one-shot deadline timers (the out-of-viewport failsafe).
//! - **ThrottleRegistry**: keyed leading-drop throttling.
//! - **GlobalEventRegistry**: window/document listener bookkeeping.
//! - **EndSignal**: the once-only completion of an interaction end.
//! - **InteractionConfig**: timing and tolerance parameters.

pub mod config;
pub mod frame;
pub mod registry;
pub mod signal;
pub mod throttle;
pub mod timer;

pub use config::{ConfigError, InteractionConfig};
pub use frame::{AnimationFrameScheduler, FrameHandle};
pub use registry::{
    Binding, GlobalEventRegistry, HandlerKind, HandlerRef, ListenerCommand, ListenerOptions,
    ListenerTarget, SurfaceId,
};
pub use signal::{EndResolver, EndSignal};
pub use throttle::ThrottleRegistry;
pub use timer::{TimerHandle, TimerQueue};
