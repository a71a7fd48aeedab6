#![forbid(unsafe_code)]

//! Geometric primitives.

use std::ops::Sub;

/// A position in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The client origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = PointerDelta;

    fn sub(self, rhs: Self) -> PointerDelta {
        PointerDelta::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Pointer travel since the start of a session.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerDelta {
    pub x: f64,
    pub y: f64,
}

impl PointerDelta {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle for viewport bounds.
///
/// Uses client coordinates (origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge (alias for x).
    #[inline]
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    #[must_use]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside the rectangle, edges included.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// The offset box of an element (`offsetLeft`, `offsetTop`, `offsetWidth`,
/// `offsetHeight`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OffsetBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl OffsetBox {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Translation component of an element transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-axis direction: `-1`, `0`, or `1`.
///
/// Used both for motion (velocity) and for viewport edge contact, where
/// `Negative` is the near edge (left/top) and `Positive` the far edge
/// (right/bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisSign {
    Negative,
    #[default]
    Zero,
    Positive,
}

impl AxisSign {
    /// Sign of the change from `previous` to `current`.
    #[must_use]
    pub fn of_change(previous: f64, current: f64) -> Self {
        if current > previous {
            Self::Positive
        } else if current < previous {
            Self::Negative
        } else {
            Self::Zero
        }
    }

    /// Integer value in `{-1, 0, 1}`.
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Self::Negative => -1,
            Self::Zero => 0,
            Self::Positive => 1,
        }
    }
}

/// An [`AxisSign`] for each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AxisPair {
    pub x: AxisSign,
    pub y: AxisSign,
}

impl AxisPair {
    pub const NONE: Self = Self::new(AxisSign::Zero, AxisSign::Zero);

    #[must_use]
    pub const fn new(x: AxisSign, y: AxisSign) -> Self {
        Self { x, y }
    }

    /// Per-axis sign of the motion from `previous` to `current`.
    #[must_use]
    pub fn motion(previous: Point, current: Point) -> Self {
        Self::new(
            AxisSign::of_change(previous.x, current.x),
            AxisSign::of_change(previous.y, current.y),
        )
    }

    /// Integer values in `{-1, 0, 1}`.
    #[must_use]
    pub const fn values(self) -> (i8, i8) {
        (self.x.value(), self.y.value())
    }
}
