#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! Host adapters translate their native pointer and keyboard events into these
//! types once, at the boundary. Everything downstream matches on the tags.
//!
//! # Design Notes
//!
//! - Coordinates are client coordinates in CSS pixels (`f64`).
//! - Mouse buttons follow the DOM `MouseEvent.button` numbering.
//! - Key events carry the legacy numeric key code, which is what the keyboard
//!   routing classes (confirm/exit/meta) are defined over.

use std::fmt;

use smallvec::SmallVec;

/// Opaque handle to an element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl ElementId {
    /// Wrap a raw host handle.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw host handle.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Any input event a surface may receive.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A mouse or touch event.
    Pointer(PointerEvent),
    /// A keyboard event.
    Key(KeyEvent),
}

impl InputEvent {
    /// Listener type this event is delivered to.
    #[must_use]
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Pointer(pointer) => pointer.event_type(),
            Self::Key(_) => EventType::KeyDown,
        }
    }

    /// The pointer payload, if this is a pointer event.
    #[must_use]
    pub fn as_pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::Pointer(pointer) => Some(pointer),
            Self::Key(_) => None,
        }
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        Self::Pointer(event)
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(event: MouseEvent) -> Self {
        Self::Pointer(PointerEvent::Mouse(event))
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        Self::Pointer(PointerEvent::Touch(event))
    }
}

impl From<KeyEvent> for InputEvent {
    fn from(event: KeyEvent) -> Self {
        Self::Key(event)
    }
}

/// A pointer event from either input family.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Mouse-like input.
    Mouse(MouseEvent),
    /// Multi-touch input.
    Touch(TouchEvent),
}

impl PointerEvent {
    /// Element the host dispatched this event to.
    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Mouse(mouse) => mouse.target,
            Self::Touch(touch) => touch.target,
        }
    }

    /// Listener type this event is delivered to.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down => EventType::MouseDown,
                MouseEventKind::Move => EventType::MouseMove,
                MouseEventKind::Up => EventType::MouseUp,
            },
            Self::Touch(touch) => match touch.kind {
                TouchEventKind::Start => EventType::TouchStart,
                TouchEventKind::Move => EventType::TouchMove,
                TouchEventKind::End => EventType::TouchEnd,
                TouchEventKind::Cancel => EventType::TouchCancel,
            },
        }
    }
}

impl From<MouseEvent> for PointerEvent {
    fn from(event: MouseEvent) -> Self {
        Self::Mouse(event)
    }
}

impl From<TouchEvent> for PointerEvent {
    fn from(event: TouchEvent) -> Self {
        Self::Touch(event)
    }
}

/// A mouse event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// Down, move, or up.
    pub kind: MouseEventKind,
    /// Button that changed state (or the primary button for moves).
    pub button: MouseButton,
    /// Client X coordinate.
    pub client_x: f64,
    /// Client Y coordinate.
    pub client_y: f64,
    /// Element the event was dispatched to.
    pub target: Option<ElementId>,
}

impl MouseEvent {
    /// Create a primary-button mouse event with no target.
    #[must_use]
    pub const fn new(kind: MouseEventKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            button: MouseButton::Primary,
            client_x,
            client_y,
            target: None,
        }
    }

    /// Mouse-down at the given client position.
    #[must_use]
    pub const fn down(client_x: f64, client_y: f64) -> Self {
        Self::new(MouseEventKind::Down, client_x, client_y)
    }

    /// Mouse-move at the given client position.
    #[must_use]
    pub const fn moved(client_x: f64, client_y: f64) -> Self {
        Self::new(MouseEventKind::Move, client_x, client_y)
    }

    /// Mouse-up at the given client position.
    #[must_use]
    pub const fn up(client_x: f64, client_y: f64) -> Self {
        Self::new(MouseEventKind::Up, client_x, client_y)
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    /// Set the dispatch target.
    #[must_use]
    pub const fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Mouse event phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    Down,
    Move,
    Up,
}

/// Mouse buttons, numbered like `MouseEvent.button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Button 0, usually the left button.
    Primary,
    /// Button 1, usually the wheel button.
    Auxiliary,
    /// Button 2, usually the right button.
    Secondary,
    /// Button 3.
    Back,
    /// Button 4.
    Forward,
    /// Any other button index.
    Other(i16),
}

impl MouseButton {
    /// Map a DOM button index.
    #[must_use]
    pub const fn from_index(index: i16) -> Self {
        match index {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            3 => Self::Back,
            4 => Self::Forward,
            other => Self::Other(other),
        }
    }

    /// DOM button index.
    #[must_use]
    pub const fn index(self) -> i16 {
        match self {
            Self::Primary => 0,
            Self::Auxiliary => 1,
            Self::Secondary => 2,
            Self::Back => 3,
            Self::Forward => 4,
            Self::Other(other) => other,
        }
    }
}

/// A touch event with its list of currently active touches.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    /// Start, move, end, or cancel.
    pub kind: TouchEventKind,
    /// Touches still on the surface, first one is the primary contact.
    pub touches: SmallVec<[TouchPoint; 2]>,
    /// Element the event was dispatched to.
    pub target: Option<ElementId>,
}

impl TouchEvent {
    /// Create a touch event with no active touches.
    #[must_use]
    pub fn new(kind: TouchEventKind) -> Self {
        Self {
            kind,
            touches: SmallVec::new(),
            target: None,
        }
    }

    /// Touch-start with a single contact.
    #[must_use]
    pub fn start(client_x: f64, client_y: f64) -> Self {
        Self::new(TouchEventKind::Start).with_touch(TouchPoint::new(0, client_x, client_y))
    }

    /// Touch-move with a single contact.
    #[must_use]
    pub fn moved(client_x: f64, client_y: f64) -> Self {
        Self::new(TouchEventKind::Move).with_touch(TouchPoint::new(0, client_x, client_y))
    }

    /// Touch-end; the lifted contact is no longer listed.
    #[must_use]
    pub fn end() -> Self {
        Self::new(TouchEventKind::End)
    }

    /// Append an active touch.
    #[must_use]
    pub fn with_touch(mut self, touch: TouchPoint) -> Self {
        self.touches.push(touch);
        self
    }

    /// Set the dispatch target.
    #[must_use]
    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Touch event phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    Start,
    Move,
    End,
    Cancel,
}

/// One active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Host identifier, stable for the lifetime of the contact.
    pub identifier: i64,
    /// Client X coordinate.
    pub client_x: f64,
    /// Client Y coordinate.
    pub client_y: f64,
}

impl TouchPoint {
    #[must_use]
    pub const fn new(identifier: i64, client_x: f64, client_y: f64) -> Self {
        Self {
            identifier,
            client_x,
            client_y,
        }
    }
}

/// Key codes that confirm an action.
pub const CONFIRM_KEY_CODES: [u32; 2] = [13, 32];
/// Key codes that exit the current element.
pub const EXIT_KEY_CODES: [u32; 1] = [27];
/// Modifier and navigation key codes that never retarget the current element.
pub const META_KEY_CODES: [u32; 5] = [9, 16, 17, 18, 20];

/// A key-down event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Legacy numeric key code (`KeyboardEvent.keyCode`).
    pub key_code: u32,
    /// Element the event was dispatched to.
    pub target: Option<ElementId>,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(key_code: u32) -> Self {
        Self {
            key_code,
            target: None,
        }
    }

    /// Set the dispatch target.
    #[must_use]
    pub const fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    /// Keyboard routing class of this key.
    #[must_use]
    pub fn class(&self) -> KeyClass {
        KeyClass::of(self.key_code)
    }
}

/// Keyboard routing classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyClass {
    /// Enter or Space.
    Confirm,
    /// Escape.
    Exit,
    /// Tab, Shift, Control, Alt, Caps Lock.
    Meta,
    /// Everything else.
    Other,
}

impl KeyClass {
    /// Classify a legacy key code.
    #[must_use]
    pub fn of(key_code: u32) -> Self {
        if EXIT_KEY_CODES.contains(&key_code) {
            Self::Exit
        } else if META_KEY_CODES.contains(&key_code) {
            Self::Meta
        } else if CONFIRM_KEY_CODES.contains(&key_code) {
            Self::Confirm
        } else {
            Self::Other
        }
    }
}

/// Listener event types known to the global registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    MouseDown,
    MouseMove,
    MouseUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    TouchCancel,
    KeyDown,
}

impl EventType {
    /// DOM event name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
            Self::KeyDown => "keydown",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
