//! Per-call render configuration for a single line.

use std::fmt;
use std::str::FromStr;

use super::decoration::{InlineDecoration, sort_decorations};
use super::tokens::LineTokens;
use crate::error::{Error, Result};
use crate::unicode::{contains_rtl, is_basic_ascii};

/// U+00B7 MIDDLE DOT.
pub const MIDDLE_DOT: char = '\u{B7}';
/// U+2E31 WORD SEPARATOR MIDDLE DOT.
pub const WORD_SEPARATOR_MIDDLE_DOT: char = '\u{2E31}';

/// Which whitespace characters are drawn with visible glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RenderWhitespace {
    #[default]
    None,
    /// Whitespace that is not a single space between words.
    Boundary,
    /// Whitespace inside the selections passed with the line.
    Selection,
    /// Whitespace after the last non-whitespace character.
    Trailing,
    All,
}

impl RenderWhitespace {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Boundary => "boundary",
            Self::Selection => "selection",
            Self::Trailing => "trailing",
            Self::All => "all",
        }
    }
}

impl fmt::Display for RenderWhitespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderWhitespace {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "boundary" => Ok(Self::Boundary),
            "selection" => Ok(Self::Selection),
            "trailing" => Ok(Self::Trailing),
            "all" => Ok(Self::All),
            _ => Err(Error::InvalidWhitespaceMode(s.to_string())),
        }
    }
}

/// Base direction of a rendered line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        })
    }
}

impl FromStr for TextDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" => Ok(Self::Ltr),
            "rtl" => Ok(Self::Rtl),
            _ => Err(Error::InvalidTextDirection(s.to_string())),
        }
    }
}

/// Half-open character range `[start, end_exclusive)` on one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OffsetRange {
    pub start: usize,
    pub end_exclusive: usize,
}

impl OffsetRange {
    #[must_use]
    pub const fn new(start: usize, end_exclusive: usize) -> Self {
        Self {
            start,
            end_exclusive,
        }
    }

    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end_exclusive
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end_exclusive
    }
}

/// Everything needed to render one line, compared field-wise to skip
/// redundant renders.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderLineConfig {
    pub use_monospace_optimizations: bool,
    pub can_use_halfwidth_rightwards_arrow: bool,
    pub line_content: String,
    pub continues_with_wrapped_line: bool,
    pub is_basic_ascii: bool,
    pub contains_rtl: bool,
    /// Leading characters that belong to a wrapped line's indentation.
    pub faux_indent_length: usize,
    pub line_tokens: LineTokens,
    /// Kept sorted in render order.
    pub line_decorations: Vec<InlineDecoration>,
    pub tab_size: usize,
    pub start_visible_column: usize,
    pub space_width: f32,
    pub render_space_width: f32,
    pub render_space_char: char,
    /// `None` renders the whole line.
    pub stop_rendering_line_after: Option<usize>,
    pub render_whitespace: RenderWhitespace,
    pub render_control_characters: bool,
    pub font_ligatures: bool,
    /// Kept sorted by start offset.
    pub selections_on_line: Option<Vec<OffsetRange>>,
    pub text_direction: TextDirection,
    pub vertical_scrollbar_size: u32,
    pub render_new_line_when_empty: bool,
}

impl RenderLineConfig {
    /// Configuration for `content` with the given tokens and neutral defaults:
    /// monospace, tab size 4, unit font widths, no truncation, no visible
    /// whitespace.
    #[must_use]
    pub fn new(content: impl Into<String>, tokens: LineTokens) -> Self {
        let line_content = content.into();
        Self {
            use_monospace_optimizations: true,
            can_use_halfwidth_rightwards_arrow: false,
            is_basic_ascii: is_basic_ascii(&line_content),
            contains_rtl: contains_rtl(&line_content),
            line_content,
            continues_with_wrapped_line: false,
            faux_indent_length: 0,
            line_tokens: tokens,
            line_decorations: Vec::new(),
            tab_size: 4,
            start_visible_column: 0,
            space_width: 1.0,
            render_space_width: 1.0,
            render_space_char: MIDDLE_DOT,
            stop_rendering_line_after: None,
            render_whitespace: RenderWhitespace::None,
            render_control_characters: false,
            font_ligatures: false,
            selections_on_line: None,
            text_direction: TextDirection::Ltr,
            vertical_scrollbar_size: 0,
            render_new_line_when_empty: false,
        }
    }

    #[must_use]
    pub fn with_monospace(mut self, monospace: bool) -> Self {
        self.use_monospace_optimizations = monospace;
        self
    }

    #[must_use]
    pub fn with_halfwidth_arrow(mut self, allowed: bool) -> Self {
        self.can_use_halfwidth_rightwards_arrow = allowed;
        self
    }

    #[must_use]
    pub fn with_continues_with_wrapped_line(mut self, continues: bool) -> Self {
        self.continues_with_wrapped_line = continues;
        self
    }

    /// Override the flags derived from the content.
    #[must_use]
    pub fn with_content_flags(mut self, is_basic_ascii: bool, contains_rtl: bool) -> Self {
        self.is_basic_ascii = is_basic_ascii;
        self.contains_rtl = contains_rtl;
        self
    }

    #[must_use]
    pub fn with_faux_indent(mut self, length: usize) -> Self {
        self.faux_indent_length = length;
        self
    }

    #[must_use]
    pub fn with_decorations(mut self, mut decorations: Vec<InlineDecoration>) -> Self {
        sort_decorations(&mut decorations);
        self.line_decorations = decorations;
        self
    }

    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    #[must_use]
    pub fn with_start_visible_column(mut self, column: usize) -> Self {
        self.start_visible_column = column;
        self
    }

    /// Record the font widths and pick the whitespace glyph whose width is
    /// closest to a space.
    #[must_use]
    pub fn with_font_widths(mut self, space_width: f32, middot_width: f32, wsmiddot_width: f32) -> Self {
        self.space_width = space_width;
        if (wsmiddot_width - space_width).abs() < (middot_width - space_width).abs() {
            self.render_space_width = wsmiddot_width;
            self.render_space_char = WORD_SEPARATOR_MIDDLE_DOT;
        } else {
            self.render_space_width = middot_width;
            self.render_space_char = MIDDLE_DOT;
        }
        self
    }

    #[must_use]
    pub fn with_stop_rendering_line_after(mut self, stop: Option<usize>) -> Self {
        self.stop_rendering_line_after = stop;
        self
    }

    #[must_use]
    pub fn with_render_whitespace(mut self, mode: RenderWhitespace) -> Self {
        self.render_whitespace = mode;
        self
    }

    #[must_use]
    pub fn with_control_characters(mut self, render: bool) -> Self {
        self.render_control_characters = render;
        self
    }

    #[must_use]
    pub fn with_font_ligatures(mut self, ligatures: bool) -> Self {
        self.font_ligatures = ligatures;
        self
    }

    #[must_use]
    pub fn with_selections(mut self, selections: Option<Vec<OffsetRange>>) -> Self {
        self.selections_on_line = selections.map(|mut s| {
            s.sort_by_key(|r| r.start);
            s
        });
        self
    }

    #[must_use]
    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }

    #[must_use]
    pub fn with_vertical_scrollbar_size(mut self, size: u32) -> Self {
        self.vertical_scrollbar_size = size;
        self
    }

    #[must_use]
    pub fn with_render_new_line_when_empty(mut self, render: bool) -> Self {
        self.render_new_line_when_empty = render;
        self
    }

    /// True when the line lays out strictly left to right.
    #[must_use]
    pub fn is_ltr(&self) -> bool {
        !self.contains_rtl && self.text_direction != TextDirection::Rtl
    }

    /// Content length in characters.
    #[must_use]
    pub fn content_len(&self) -> usize {
        self.line_content.chars().count()
    }
}
