#![forbid(unsafe_code)]

//! Pointer sampling: positions and input families.
//!
//! Browsers deliver compatibility mouse events after touch input, so a drag
//! that started from a touch must not be driven by the synthesized mouse
//! stream (and vice versa). [`same_family`] is the comparison the session uses
//! to keep one input family per session.
//!
//! ```
//! use grabkit_core::event::{MouseEvent, PointerEvent, TouchEvent};
//! use grabkit_core::sampler::{position, same_family};
//!
//! let down = PointerEvent::from(MouseEvent::down(10.0, 12.0));
//! let touch = PointerEvent::from(TouchEvent::moved(3.0, 4.0));
//!
//! assert_eq!(position(&down).point.x, 10.0);
//! assert!(same_family(&down, Some(&down)));
//! assert!(!same_family(&touch, Some(&down)));
//! assert!(!same_family(&touch, None));
//! ```

use crate::event::{InputEvent, PointerEvent};
use crate::geometry::Point;

/// Input family of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventFamily {
    Mouse,
    Touch,
    /// Not a pointer event.
    Unknown,
}

/// A sampled pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Client position, `(0, 0)` when nothing could be sampled.
    pub point: Point,
    /// `false` when the event carried no position (a touch event without
    /// active touches). Such samples must not drive the session.
    pub authoritative: bool,
}

impl PointerSample {
    const EMPTY: Self = Self {
        point: Point::ORIGIN,
        authoritative: false,
    };
}

/// Classify any input event by family.
#[must_use]
pub fn classify(event: &InputEvent) -> EventFamily {
    match event {
        InputEvent::Pointer(pointer) => family(pointer),
        InputEvent::Key(_) => EventFamily::Unknown,
    }
}

/// Family of a pointer event.
#[must_use]
pub const fn family(event: &PointerEvent) -> EventFamily {
    match event {
        PointerEvent::Mouse(_) => EventFamily::Mouse,
        PointerEvent::Touch(_) => EventFamily::Touch,
    }
}

/// Client position of a pointer event.
///
/// Mouse events report their own coordinates; touch events report the first
/// active touch.
#[must_use]
pub fn position(event: &PointerEvent) -> PointerSample {
    match event {
        PointerEvent::Mouse(mouse) => PointerSample {
            point: Point::new(mouse.client_x, mouse.client_y),
            authoritative: true,
        },
        PointerEvent::Touch(touch) => match touch.touches.first() {
            Some(first) => PointerSample {
                point: Point::new(first.client_x, first.client_y),
                authoritative: true,
            },
            None => PointerSample::EMPTY,
        },
    }
}

/// Whether `event` belongs to the same family as the `recorded` event.
///
/// A missing counterpart never matches; callers that accept anything before
/// an event has been recorded must check for `None` themselves.
#[must_use]
pub fn same_family(event: &PointerEvent, recorded: Option<&PointerEvent>) -> bool {
    recorded.is_some_and(|recorded| family(event) == family(recorded))
}
