#![forbid(unsafe_code)]

//! Pivot tags read from the `pivot` attribute of an interaction origin.
//!
//! Pivots use a numeric keypad layout:
//!
//! ```text
//! 7 8 9
//! 4 5 6
//! 1 2 3
//! ```
//!
//! `5` is the center pivot (the whole surface moves); every other value in
//! `1..=9` anchors a resize at the matching edge or corner. Values outside
//! that range are kept as-is but carry no anchor.

use crate::geometry::{AxisPair, AxisSign};

/// Name of the attribute the pivot is read from.
pub const PIVOT_ATTRIBUTE: &str = "pivot";

/// Integer anchor tag of a resize/move origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pivot(i32);

impl Pivot {
    /// The center pivot.
    pub const CENTER: Self = Self(5);

    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Parse an attribute value the way `parseInt` does: optional whitespace,
    /// an optional sign, then leading decimal digits. Trailing garbage is
    /// ignored; a value without leading digits yields `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim_start();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let end = digits
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(digits.len());
        if end == 0 {
            return None;
        }
        let magnitude: i32 = digits[..end].parse().ok()?;
        Some(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Whether this pivot moves the whole surface.
    #[must_use]
    pub const fn is_center(self) -> bool {
        self.0 == Self::CENTER.0
    }

    /// Edge anchor per axis: `-1` for left/top, `1` for right/bottom, `0` for
    /// the middle. `None` outside the keypad range.
    #[must_use]
    pub const fn anchor(self) -> Option<AxisPair> {
        if self.0 < 1 || self.0 > 9 {
            return None;
        }
        let index = self.0 - 1;
        let x = match index % 3 {
            0 => AxisSign::Negative,
            1 => AxisSign::Zero,
            _ => AxisSign::Positive,
        };
        let y = match index / 3 {
            0 => AxisSign::Positive,
            1 => AxisSign::Zero,
            _ => AxisSign::Negative,
        };
        Some(AxisPair::new(x, y))
    }
}
