//! Error types for viewline.
//!
//! Rendering itself never fails: out-of-range input is clamped. Errors only
//! surface where configuration enters the crate.

use std::fmt;

/// Result type alias for viewline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for viewline operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown whitespace rendering mode (e.g., from a settings file).
    InvalidWhitespaceMode(String),
    /// Unknown text direction.
    InvalidTextDirection(String),
    /// An option value was rejected while building view-line options.
    InvalidOption { name: &'static str, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWhitespaceMode(s) => write!(
                f,
                "invalid whitespace mode: {s} (expected none, boundary, selection, trailing or all)"
            ),
            Self::InvalidTextDirection(s) => {
                write!(f, "invalid text direction: {s} (expected ltr or rtl)")
            }
            Self::InvalidOption { name, reason } => write!(f, "invalid option {name}: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
