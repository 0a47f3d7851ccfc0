//! `viewline` - code editor line rendering and view window engine
//!
//! Turns one line of source text plus its syntax tokens, inline decorations
//! and whitespace policy into styled markup and a column mapping, and keeps a
//! window of rendered lines in sync with a scrolling viewport while
//! re-rendering as little as possible.
//!
//! - [`line`]: resolve a line into visual runs, emit markup, map columns
//! - [`view`]: the rendered-line window, the viewport reconciler and the
//!   concrete editor view line
//! - [`unicode`]: character classification shared by both

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Column counts fit in u32
#![allow(clippy::cast_sign_loss)] // Pixel widths are never negative
#![allow(clippy::cast_precision_loss)] // Column to pixel conversions
#![allow(clippy::cast_possible_wrap)] // Offset distances in the mapping search
#![allow(clippy::module_name_repetitions)] // Allow line::LineTokens etc
#![allow(clippy::struct_excessive_bools)] // Render configuration needs multiple flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::too_many_lines)] // The emitter walks every run in one pass
#![allow(clippy::fn_params_excessive_bools)] // Mirrors the render configuration flags
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod error;
pub mod line;
pub mod unicode;
pub mod view;

// Re-export core types at crate root
pub use error::{Error, Result};

// Re-export the line pipeline
pub use line::{
    CharacterMapping, InlineDecoration, InlineDecorationKind, LineMarkup, LineTokens,
    RenderLineConfig, RenderLineOutput, RenderWhitespace, RunPosition, TextDirection,
    render_view_line,
};

// Re-export the view window
pub use view::{
    LineSource, MemoryTarget, RenderStats, RenderTarget, RenderedLine, ViewLine, ViewLineOptions,
    ViewLines, ViewportData, VisibleLines,
};
