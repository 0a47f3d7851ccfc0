//! The concrete rendered line of an editor view.

use std::fmt;

use tracing::trace;

use super::line::RenderedLine;
use super::options::ViewLineOptions;
use super::target::NodeHandle;
use super::viewport::ViewportData;
use crate::line::{
    CharacterMapping, ForeignElements, LineMarkup, OffsetRange, RenderLineConfig, RenderWhitespace,
    RunPosition, TextDirection, render_view_line,
};

/// Class of the element wrapping one view line.
pub const VIEW_LINE_CLASS: &str = "view-line";

/// What a [`ViewLine`] hands to its render target.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewLinePayload {
    pub top: f32,
    pub height: f32,
    pub text_direction: TextDirection,
    pub contains_rtl: bool,
    pub vertical_scrollbar_size: u32,
    pub markup: LineMarkup,
}

impl fmt::Display for ViewLinePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<div ")?;
        if self.text_direction == TextDirection::Rtl {
            f.write_str("dir=\"rtl\" ")?;
        } else if self.contains_rtl {
            f.write_str("dir=\"ltr\" ")?;
        }
        write!(
            f,
            "style=\"top:{}px;height:{}px;line-height:{}",
            self.top, self.height, self.height
        )?;
        if self.text_direction == TextDirection::Rtl {
            write!(f, "px;padding-right:{}", self.vertical_scrollbar_size)?;
        }
        write!(f, "px;\" class=\"{VIEW_LINE_CLASS}\">{}</div>", self.markup)
    }
}

/// Horizontal extent in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HorizontalRange {
    pub left: f32,
    pub width: f32,
}

/// What was produced by the last render.
#[derive(Clone, Debug)]
struct RenderedViewLine {
    config: RenderLineConfig,
    mapping: CharacterMapping,
    foreign_elements: ForeignElements,
    /// Characters produced by each span, indexed like the mapping's runs.
    run_lengths: Vec<usize>,
    /// Basic ASCII, left to right, monospace, no foreign elements: pixel
    /// positions follow from the mapping alone.
    fast: bool,
}

impl RenderedViewLine {
    fn column_offset(&self, column: usize) -> f32 {
        self.config.space_width * self.mapping.horizontal_offset(column) as f32
    }
}

/// A line of the editor view: renders itself from the viewport's line data
/// and the shared options, and answers position queries afterwards.
#[derive(Clone, Debug)]
pub struct ViewLine {
    options: ViewLineOptions,
    is_maybe_invalid: bool,
    node: Option<NodeHandle>,
    top: f32,
    height: f32,
    rendered: Option<RenderedViewLine>,
}

impl ViewLine {
    #[must_use]
    pub fn new(options: ViewLineOptions) -> Self {
        Self {
            options,
            is_maybe_invalid: true,
            node: None,
            top: 0.0,
            height: options.line_height,
            rendered: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ViewLineOptions {
        &self.options
    }

    /// Whether the next render pass must rebuild this line.
    #[must_use]
    pub fn is_maybe_invalid(&self) -> bool {
        self.is_maybe_invalid
    }

    /// Last position set by a layout or render.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.top, self.height)
    }

    pub fn on_decorations_changed(&mut self) {
        self.is_maybe_invalid = true;
    }

    pub fn on_options_changed(&mut self, options: ViewLineOptions) {
        self.is_maybe_invalid = true;
        self.options = options;
    }

    /// Selections only change the output when whitespace is rendered inside
    /// them. Returns whether the line was invalidated.
    pub fn on_selection_changed(&mut self) -> bool {
        let renders_selection = self
            .rendered
            .as_ref()
            .is_some_and(|r| r.config.render_whitespace == RenderWhitespace::Selection);
        if renders_selection {
            self.is_maybe_invalid = true;
        }
        renders_selection
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        self.rendered.is_some()
    }

    #[must_use]
    pub fn is_rendered_rtl(&self) -> bool {
        self.rendered
            .as_ref()
            .is_some_and(|r| r.config.text_direction == TextDirection::Rtl)
    }

    /// Configuration of the last render.
    #[must_use]
    pub fn render_config(&self) -> Option<&RenderLineConfig> {
        self.rendered.as_ref().map(|r| &r.config)
    }

    #[must_use]
    pub fn character_mapping(&self) -> Option<&CharacterMapping> {
        self.rendered.as_ref().map(|r| &r.mapping)
    }

    #[must_use]
    pub fn foreign_elements(&self) -> ForeignElements {
        self.rendered
            .as_ref()
            .map_or(ForeignElements::empty(), |r| r.foreign_elements)
    }

    /// Whether pixel positions can be computed without measuring.
    #[must_use]
    pub fn has_fast_layout(&self) -> bool {
        self.rendered.as_ref().is_some_and(|r| r.fast)
    }

    /// Rendered width in pixels for lines with a fast layout.
    #[must_use]
    pub fn monospace_width(&self) -> Option<f32> {
        let rendered = self.rendered.as_ref().filter(|r| r.fast)?;
        Some(rendered.column_offset(rendered.mapping.len()).round())
    }

    /// Pixel range covered by `[start_column, end_column)`.
    ///
    /// Columns are clamped to the line. A range entirely past the
    /// rendering cut-off collapses to the end of the line. Lines without a
    /// fast layout return `None`.
    #[must_use]
    pub fn visible_range_for_columns(
        &self,
        start_column: usize,
        end_column: usize,
    ) -> Option<HorizontalRange> {
        let rendered = self.rendered.as_ref()?;
        let max_column = rendered.config.content_len() + 1;
        let mut start_column = start_column.clamp(1, max_column);
        let mut end_column = end_column.clamp(1, max_column);

        if let Some(stop) = rendered.config.stop_rendering_line_after {
            let last_visible = stop + 1;
            if start_column > last_visible && end_column > last_visible {
                return Some(HorizontalRange {
                    left: self.monospace_width()?,
                    width: 0.0,
                });
            }
            start_column = start_column.min(last_visible);
            end_column = end_column.min(last_visible);
        }

        if !rendered.fast {
            return None;
        }
        let left = rendered.column_offset(start_column);
        let right = rendered.column_offset(end_column);
        Some(HorizontalRange {
            left,
            width: right - left,
        })
    }

    /// Column under `position` in the rendered output; `1` before the first
    /// render.
    #[must_use]
    pub fn column_of_run_offset(&self, position: RunPosition) -> usize {
        let Some(rendered) = &self.rendered else {
            return 1;
        };
        let run_length = rendered
            .run_lengths
            .get(position.run_index)
            .copied()
            .unwrap_or(0);
        rendered.mapping.column(position, run_length)
    }

    fn build_config(&self, line_number: usize, viewport: &ViewportData<'_>) -> RenderLineConfig {
        let data = viewport.line_rendering_data(line_number);
        let options = &self.options;

        let selections_on_line = if options.render_whitespace == RenderWhitespace::Selection {
            let ranges: Vec<OffsetRange> = viewport
                .selections
                .iter()
                .filter(|s| s.touches_line(line_number))
                .filter_map(|s| {
                    let start = if s.start_line_number == line_number {
                        s.start_column
                    } else {
                        data.min_column
                    };
                    let end = if s.end_line_number == line_number {
                        s.end_column
                    } else {
                        data.max_column
                    };
                    (start < end).then(|| OffsetRange::new(start - 1, end - 1))
                })
                .collect();
            (!ranges.is_empty()).then_some(ranges)
        } else {
            None
        };

        RenderLineConfig::new(data.content, data.tokens)
            .with_monospace(options.use_monospace_optimizations)
            .with_halfwidth_arrow(options.can_use_halfwidth_rightwards_arrow)
            .with_continues_with_wrapped_line(data.continues_with_wrapped_line)
            .with_content_flags(data.is_basic_ascii, data.contains_rtl)
            .with_faux_indent(data.min_column.saturating_sub(1))
            .with_decorations(data.inline_decorations)
            .with_tab_size(data.tab_size)
            .with_start_visible_column(data.start_visible_column)
            .with_font_widths(options.space_width, options.middot_width, options.wsmiddot_width)
            .with_stop_rendering_line_after(options.stop_rendering_line_after)
            .with_render_whitespace(options.render_whitespace)
            .with_control_characters(options.render_control_characters)
            .with_font_ligatures(options.font_ligatures)
            .with_selections(selections_on_line)
            .with_text_direction(data.text_direction)
            .with_vertical_scrollbar_size(options.vertical_scrollbar_size)
            .with_render_new_line_when_empty(options.render_new_line_when_empty)
    }
}

impl RenderedLine for ViewLine {
    type Payload = ViewLinePayload;

    fn node(&self) -> Option<NodeHandle> {
        self.node
    }

    fn set_node(&mut self, node: NodeHandle) {
        self.node = Some(node);
    }

    fn on_content_changed(&mut self) {
        self.is_maybe_invalid = true;
    }

    fn on_tokens_changed(&mut self) {
        self.is_maybe_invalid = true;
    }

    fn layout_line(&mut self, _line_number: usize, top: f32, height: f32) {
        self.top = top;
        self.height = height;
    }

    fn render_line(
        &mut self,
        line_number: usize,
        top: f32,
        height: f32,
        viewport: &ViewportData<'_>,
    ) -> Option<ViewLinePayload> {
        if !self.is_maybe_invalid {
            return None;
        }
        self.is_maybe_invalid = false;

        let config = self.build_config(line_number, viewport);
        if self.rendered.as_ref().is_some_and(|r| r.config == config) {
            trace!(line_number, "render input unchanged");
            return None;
        }

        let output = render_view_line(&config);
        self.top = top;
        self.height = height;

        let fast = config.is_basic_ascii
            && config.is_ltr()
            && self.options.use_monospace_optimizations
            && !output.contains_foreign_elements();
        let payload = ViewLinePayload {
            top,
            height,
            text_direction: config.text_direction,
            contains_rtl: config.contains_rtl,
            vertical_scrollbar_size: self.options.vertical_scrollbar_size,
            markup: output.markup,
        };
        self.rendered = Some(RenderedViewLine {
            run_lengths: payload.markup.spans.iter().map(|s| s.char_len()).collect(),
            config,
            mapping: output.character_mapping,
            foreign_elements: output.foreign_elements,
            fast,
        });
        Some(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::viewport::ViewSelection;

    fn render(line: &mut ViewLine, lines: &Vec<&str>, number: usize) -> Option<ViewLinePayload> {
        let viewport = ViewportData::new(lines, number, number, 19.0);
        line.render_line(number, 0.0, 19.0, &viewport)
    }

    #[test]
    fn payload_wraps_markup() {
        let lines = vec!["abc"];
        let mut line = ViewLine::new(ViewLineOptions::default());
        let payload = render(&mut line, &lines, 1).unwrap();
        assert_eq!(
            payload.to_string(),
            "<div style=\"top:0px;height:19px;line-height:19px;\" class=\"view-line\">\
             <span><span class=\"mtk1\">abc</span></span></div>"
        );
    }

    #[test]
    fn rtl_payload_gets_direction_and_padding() {
        let payload = ViewLinePayload {
            top: 38.0,
            height: 19.0,
            text_direction: TextDirection::Rtl,
            contains_rtl: true,
            vertical_scrollbar_size: 14,
            markup: LineMarkup::default(),
        };
        assert_eq!(
            payload.to_string(),
            "<div dir=\"rtl\" style=\"top:38px;height:19px;line-height:19px;padding-right:14px;\" \
             class=\"view-line\"><span></span></div>"
        );

        let mixed = ViewLinePayload {
            text_direction: TextDirection::Ltr,
            ..payload
        };
        assert!(mixed.to_string().starts_with("<div dir=\"ltr\" style="));
    }

    #[test]
    fn valid_line_is_not_rerendered() {
        let lines = vec!["abc"];
        let mut line = ViewLine::new(ViewLineOptions::default());
        assert!(render(&mut line, &lines, 1).is_some());
        assert!(!line.is_maybe_invalid());
        assert!(render(&mut line, &lines, 1).is_none());

        // Dirty but identical input: nothing to emit.
        line.on_content_changed();
        assert!(render(&mut line, &lines, 1).is_none());

        let changed = vec!["abcd"];
        line.on_content_changed();
        assert!(render(&mut line, &changed, 1).is_some());
    }

    #[test]
    fn options_change_forces_render() {
        let lines = vec!["a b"];
        let mut line = ViewLine::new(ViewLineOptions::default());
        render(&mut line, &lines, 1);
        let options = ViewLineOptions::builder()
            .render_whitespace(RenderWhitespace::All)
            .build()
            .unwrap();
        line.on_options_changed(options);
        let payload = render(&mut line, &lines, 1).unwrap();
        assert_eq!(payload.markup.text(), "a\u{B7}\u{200C}b");
    }

    #[test]
    fn selection_changes_matter_only_in_selection_mode() {
        let lines = vec!["a b"];
        let mut line = ViewLine::new(ViewLineOptions::default());
        assert!(!line.on_selection_changed());
        render(&mut line, &lines, 1);
        assert!(line.on_selection_changed());

        let options = ViewLineOptions::builder()
            .render_whitespace(RenderWhitespace::None)
            .build()
            .unwrap();
        let mut plain = ViewLine::new(options);
        render(&mut plain, &lines, 1);
        assert!(!plain.on_selection_changed());
    }

    #[test]
    fn selected_whitespace_is_rendered() {
        let lines = vec!["a b c", "d e"];
        let mut line = ViewLine::new(ViewLineOptions::default());
        let viewport = ViewportData::new(&lines, 1, 2, 19.0)
            .with_selections(vec![ViewSelection::new(1, 3, 2, 2)]);
        let payload = line.render_line(1, 0.0, 19.0, &viewport).unwrap();
        assert_eq!(payload.markup.text(), "a\u{A0}b\u{B7}\u{200C}c");
        assert_eq!(
            line.render_config().and_then(|c| c.selections_on_line.clone()),
            Some(vec![OffsetRange::new(2, 5)])
        );
    }

    #[test]
    fn monospace_ranges() {
        let lines = vec!["hello world"];
        let mut line = ViewLine::new(ViewLineOptions::default());
        assert_eq!(line.visible_range_for_columns(1, 2), None);
        render(&mut line, &lines, 1);

        assert!(line.has_fast_layout());
        assert_eq!(line.monospace_width(), Some(77.0));
        assert_eq!(
            line.visible_range_for_columns(2, 4),
            Some(HorizontalRange {
                left: 7.0,
                width: 14.0
            })
        );
        assert_eq!(
            line.visible_range_for_columns(0, 99),
            Some(HorizontalRange {
                left: 0.0,
                width: 77.0
            })
        );
    }

    #[test]
    fn ranges_past_cut_off_collapse_to_line_end() {
        let lines = vec!["abcdefghij"];
        let options = ViewLineOptions::builder()
            .stop_rendering_line_after(Some(4))
            .build()
            .unwrap();
        let mut line = ViewLine::new(options);
        render(&mut line, &lines, 1);
        assert_eq!(line.monospace_width(), Some(28.0));
        assert_eq!(
            line.visible_range_for_columns(7, 9),
            Some(HorizontalRange {
                left: 28.0,
                width: 0.0
            })
        );
        assert_eq!(
            line.visible_range_for_columns(3, 9),
            Some(HorizontalRange {
                left: 14.0,
                width: 14.0
            })
        );
    }

    #[test]
    fn rtl_lines_need_measurement() {
        let lines = vec!["abc שלום"];
        let mut line = ViewLine::new(ViewLineOptions::default());
        render(&mut line, &lines, 1);
        assert!(!line.has_fast_layout());
        assert!(!line.is_rendered_rtl());
        assert_eq!(line.monospace_width(), None);
        assert_eq!(line.visible_range_for_columns(1, 2), None);
    }

    #[test]
    fn hit_testing_maps_back_to_columns() {
        let lines = vec!["\tx"];
        let options = ViewLineOptions::builder()
            .render_whitespace(RenderWhitespace::None)
            .build()
            .unwrap();
        let mut line = ViewLine::new(options);
        assert_eq!(line.column_of_run_offset(RunPosition::new(0, 3)), 1);
        render(&mut line, &lines, 1);
        assert_eq!(line.column_of_run_offset(RunPosition::new(0, 0)), 1);
        assert_eq!(line.column_of_run_offset(RunPosition::new(0, 1)), 1);
        assert_eq!(line.column_of_run_offset(RunPosition::new(0, 3)), 2);
        assert_eq!(line.column_of_run_offset(RunPosition::new(0, 5)), 3);
    }
}
