//! Right-to-left detection.
//!
//! The renderer never reorders text itself; it only needs to know whether a
//! run contains strong right-to-left characters so that it can avoid
//! splitting it and can scope directionality markup.

use unicode_bidi::{BidiClass, bidi_class};

/// Check if a character is a strong right-to-left character.
#[inline]
#[must_use]
pub fn is_rtl_char(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    matches!(bidi_class(c), BidiClass::R | BidiClass::AL)
}

/// Check if `text` contains any strong right-to-left character.
#[must_use]
pub fn contains_rtl(text: &str) -> bool {
    text.chars().any(is_rtl_char)
}
