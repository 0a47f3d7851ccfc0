//! Document-side inputs of a render pass: per-line data and the viewport.

use ropey::Rope;

use crate::line::{InlineDecoration, LineTokens, TextDirection};
use crate::unicode::{contains_rtl, is_basic_ascii};

/// Token class used when a source has no syntax information.
pub const DEFAULT_TOKEN_CLASS: &str = "mtk1";

/// Everything the document knows about one line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineRenderingData {
    pub content: String,
    pub tokens: LineTokens,
    pub inline_decorations: Vec<InlineDecoration>,
    pub tab_size: usize,
    /// First valid column (1-based).
    pub min_column: usize,
    /// Column after the last character.
    pub max_column: usize,
    pub is_basic_ascii: bool,
    pub contains_rtl: bool,
    pub continues_with_wrapped_line: bool,
    pub start_visible_column: usize,
    pub text_direction: TextDirection,
}

impl LineRenderingData {
    /// Data for `content` rendered as one default-styled token.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        let len = content.chars().count();
        Self {
            tokens: LineTokens::single(len, DEFAULT_TOKEN_CLASS),
            inline_decorations: Vec::new(),
            tab_size: 4,
            min_column: 1,
            max_column: len + 1,
            is_basic_ascii: is_basic_ascii(&content),
            contains_rtl: contains_rtl(&content),
            continues_with_wrapped_line: false,
            start_visible_column: 0,
            text_direction: TextDirection::Ltr,
            content,
        }
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: LineTokens) -> Self {
        self.tokens = tokens;
        self
    }

    #[must_use]
    pub fn with_decorations(mut self, decorations: Vec<InlineDecoration>) -> Self {
        self.inline_decorations = decorations;
        self
    }

    #[must_use]
    pub fn with_tab_size(mut self, tab_size: usize) -> Self {
        self.tab_size = tab_size;
        self
    }

    #[must_use]
    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }
}

/// Provides line data by 1-based line number.
pub trait LineSource {
    fn line_count(&self) -> usize;

    /// Data for `line_number`. Lines past the end render empty.
    fn line_rendering_data(&self, line_number: usize) -> LineRenderingData;
}

fn strip_line_break(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

impl LineSource for Rope {
    fn line_count(&self) -> usize {
        self.len_lines()
    }

    fn line_rendering_data(&self, line_number: usize) -> LineRenderingData {
        let content = line_number
            .checked_sub(1)
            .and_then(|index| self.get_line(index))
            .map(|slice| strip_line_break(&slice.to_string()).to_string())
            .unwrap_or_default();
        LineRenderingData::new(content)
    }
}

impl<S: AsRef<str>> LineSource for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line_rendering_data(&self, line_number: usize) -> LineRenderingData {
        let content = line_number
            .checked_sub(1)
            .and_then(|index| self.get(index))
            .map_or("", AsRef::as_ref);
        LineRenderingData::new(strip_line_break(content))
    }
}

impl<S: AsRef<str>> LineSource for Vec<S> {
    fn line_count(&self) -> usize {
        self.as_slice().line_count()
    }

    fn line_rendering_data(&self, line_number: usize) -> LineRenderingData {
        self.as_slice().line_rendering_data(line_number)
    }
}

/// A selection in view coordinates (1-based lines and columns).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewSelection {
    pub start_line_number: usize,
    pub start_column: usize,
    pub end_line_number: usize,
    pub end_column: usize,
}

impl ViewSelection {
    #[must_use]
    pub const fn new(
        start_line_number: usize,
        start_column: usize,
        end_line_number: usize,
        end_column: usize,
    ) -> Self {
        Self {
            start_line_number,
            start_column,
            end_line_number,
            end_column,
        }
    }

    #[must_use]
    pub const fn touches_line(&self, line_number: usize) -> bool {
        self.start_line_number <= line_number && line_number <= self.end_line_number
    }
}

/// The lines requested by one render pass and where they go.
pub struct ViewportData<'a> {
    pub start_line_number: usize,
    pub end_line_number: usize,
    /// Top of each requested line relative to the viewport, indexed by
    /// `line_number - start_line_number`.
    pub relative_vertical_offset: Vec<f32>,
    pub line_height: f32,
    pub selections: Vec<ViewSelection>,
    source: &'a dyn LineSource,
}

impl<'a> ViewportData<'a> {
    /// Viewport over `[start_line_number, end_line_number]` with uniformly
    /// stacked lines.
    #[must_use]
    pub fn new(
        source: &'a dyn LineSource,
        start_line_number: usize,
        end_line_number: usize,
        line_height: f32,
    ) -> Self {
        let count = (end_line_number + 1).saturating_sub(start_line_number);
        let relative_vertical_offset = (0..count).map(|i| i as f32 * line_height).collect();
        Self {
            start_line_number,
            end_line_number,
            relative_vertical_offset,
            line_height,
            selections: Vec::new(),
            source,
        }
    }

    /// Replace the vertical offsets, e.g. when view zones push lines apart.
    #[must_use]
    pub fn with_vertical_offsets(mut self, offsets: Vec<f32>) -> Self {
        self.relative_vertical_offset = offsets;
        self
    }

    #[must_use]
    pub fn with_selections(mut self, selections: Vec<ViewSelection>) -> Self {
        self.selections = selections;
        self
    }

    #[must_use]
    pub fn line_rendering_data(&self, line_number: usize) -> LineRenderingData {
        self.source.line_rendering_data(line_number)
    }

    /// Number of lines in the underlying document.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.source.line_count()
    }

    /// Top of `line_number`, which must be inside the viewport.
    #[must_use]
    pub fn vertical_offset(&self, line_number: usize) -> f32 {
        self.relative_vertical_offset[line_number - self.start_line_number]
    }
}

impl std::fmt::Debug for ViewportData<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportData")
            .field("start_line_number", &self.start_line_number)
            .field("end_line_number", &self.end_line_number)
            .field("relative_vertical_offset", &self.relative_vertical_offset)
            .field("line_height", &self.line_height)
            .field("selections", &self.selections)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rope_lines_drop_terminators() {
        let rope = Rope::from_str("one\r\ntwo\nשלום");
        assert_eq!(rope.line_count(), 3);
        assert_eq!(rope.line_rendering_data(1).content, "one");
        assert_eq!(rope.line_rendering_data(2).content, "two");

        let rtl = rope.line_rendering_data(3);
        assert!(rtl.contains_rtl);
        assert!(!rtl.is_basic_ascii);
        assert_eq!(rtl.max_column, 5);
        assert_eq!(rtl.tokens, LineTokens::single(4, DEFAULT_TOKEN_CLASS));
    }

    #[test]
    fn out_of_range_lines_are_empty() {
        let lines = vec!["a", "b"];
        assert_eq!(lines.line_rendering_data(0).content, "");
        assert_eq!(lines.line_rendering_data(3).content, "");
        assert_eq!(Rope::from_str("x").line_rendering_data(9).content, "");
    }

    #[test]
    fn viewport_stacks_lines() {
        let lines = vec!["a"; 10];
        let viewport = ViewportData::new(&lines, 3, 6, 20.0);
        assert_eq!(viewport.relative_vertical_offset, [0.0, 20.0, 40.0, 60.0]);
        assert!((viewport.vertical_offset(5) - 40.0).abs() < f32::EPSILON);
        assert_eq!(viewport.line_rendering_data(4).content, "a");
        assert_eq!(viewport.line_count(), 10);
    }

    #[test]
    fn selection_touches_lines() {
        let sel = ViewSelection::new(2, 3, 4, 1);
        assert!(!sel.touches_line(1));
        assert!(sel.touches_line(2));
        assert!(sel.touches_line(4));
        assert!(!sel.touches_line(5));
    }
}
