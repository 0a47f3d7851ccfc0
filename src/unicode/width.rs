//! Column width of characters for tab-stop and horizontal-offset math.

use unicode_width::UnicodeWidthChar;

/// Check if a character occupies two columns.
///
/// This includes a fast path for ASCII, which is never wide.
#[inline]
#[must_use]
pub fn is_full_width(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    UnicodeWidthChar::width(c) == Some(2)
}

/// Number of visible columns a (non-tab) character advances.
#[inline]
#[must_use]
pub fn char_columns(c: char) -> usize {
    if is_full_width(c) { 2 } else { 1 }
}
