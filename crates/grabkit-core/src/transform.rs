#![forbid(unsafe_code)]

//! Translation extraction from CSS `transform` values.
//!
//! A drag starts from the element's current translation, so the session needs
//! the `x`/`y` offset from whatever the style currently holds. Recognized
//! functions:
//!
//! | Function | Translation |
//! |----------|-------------|
//! | `matrix(a, b, c, d, tx, ty)` | `(tx, ty)` |
//! | `matrix3d(.. 16 values ..)` | `(m41, m42)` |
//! | `translate(x[, y])` | `(x, y)` |
//! | `translate3d(x, y, z)` | `(x, y)` |
//! | `translateX(x)` / `translateY(y)` | one axis |
//!
//! Translations of several functions are summed; other functions (rotate,
//! scale, ...) are skipped. Units are stripped, so `10px` reads as `10`.
//!
//! ```
//! use grabkit_core::transform::parse_translation;
//! use grabkit_core::geometry::Translation;
//!
//! assert_eq!(
//!     parse_translation("matrix(1, 0, 0, 1, 24, -8)"),
//!     Some(Translation::new(24.0, -8.0))
//! );
//! assert_eq!(
//!     parse_translation("translate(10px, 20px) scale(2)"),
//!     Some(Translation::new(10.0, 20.0))
//! );
//! assert_eq!(parse_translation("none"), None);
//! ```

use crate::geometry::Translation;

/// Parse the translation component of a transform value.
///
/// Returns `None` when the value holds no translating function.
#[must_use]
pub fn parse_translation(value: &str) -> Option<Translation> {
    let mut found = false;
    let mut total = Translation::ZERO;

    for (name, args) in functions(value) {
        let values: Vec<f64> = args.split(',').map(parse_length).collect();
        let translation = match name.to_ascii_lowercase().as_str() {
            "matrix" if values.len() == 6 => Translation::new(values[4], values[5]),
            "matrix3d" if values.len() == 16 => Translation::new(values[12], values[13]),
            "translate" if !values.is_empty() => {
                Translation::new(values[0], values.get(1).copied().unwrap_or(0.0))
            }
            "translate3d" if values.len() >= 2 => Translation::new(values[0], values[1]),
            "translatex" if !values.is_empty() => Translation::new(values[0], 0.0),
            "translatey" if !values.is_empty() => Translation::new(0.0, values[0]),
            _ => continue,
        };
        found = true;
        total.x += translation.x;
        total.y += translation.y;
    }

    found.then_some(total)
}

/// Split `name(args) name(args)` into `(name, args)` pairs.
fn functions(value: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = value;
    std::iter::from_fn(move || {
        let open = rest.find('(')?;
        let close = open + rest[open..].find(')')?;
        let name = rest[..open].trim();
        let args = &rest[open + 1..close];
        rest = &rest[close + 1..];
        Some((name, args))
    })
}

/// Numeric prefix of a CSS length; non-numeric input reads as `0`.
fn parse_length(raw: &str) -> f64 {
    let raw = raw.trim();
    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }
    // An exponent only counts when digits follow it (`1e2`, `1e-2`, not `1em`).
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            end = exp;
        }
    }
    raw[..end].parse().unwrap_or(0.0)
}
