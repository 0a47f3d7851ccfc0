//! Single-line rendering.
//!
//! A [`RenderLineConfig`] describes one line: its content, token runs,
//! inline decorations and the rendering policy. [`render_view_line`] resolves
//! it into [`VisualRun`]s, emits [`LineMarkup`] and builds the
//! [`CharacterMapping`] used for cursor placement and hit testing.
//!
//! # Example
//!
//! ```
//! use viewline::line::{LineTokens, RenderLineConfig, RenderWhitespace, render_view_line};
//!
//! let config = RenderLineConfig::new("\tlet x;", LineTokens::single(7, "mtk1"))
//!     .with_render_whitespace(RenderWhitespace::Boundary);
//! let output = render_view_line(&config);
//!
//! // Tab plus six characters, plus the end-of-line column.
//! assert_eq!(output.character_mapping.len(), 8);
//! assert_eq!(output.character_mapping.horizontal_offset(2), 4);
//! ```

mod decoration;
mod emit;
mod input;
mod mapping;
mod markup;
mod part;
mod resolve;
mod tokens;

pub use decoration::{InlineDecoration, InlineDecorationKind, clip_decorations, sort_decorations};
pub use emit::{RenderLineOutput, emit, render_view_line};
pub use input::{
    MIDDLE_DOT, OffsetRange, RenderLineConfig, RenderWhitespace, TextDirection,
    WORD_SEPARATOR_MIDDLE_DOT,
};
pub use mapping::{CharacterMapping, InflatedEntry, RunPosition};
pub use markup::{LineMarkup, OverflowMarker, RenderedSpan};
pub use part::{
    CONTROL_CLASS, ForeignElements, OVERFLOW_CLASS, RunMetadata, SIZED_WHITESPACE_CLASS, VisualRun,
    WHITESPACE_CLASS,
};
pub use resolve::{LONG_RUN_LENGTH, ResolvedRenderLine, resolve};
pub use tokens::{LineToken, LineTokens};
