//! Editor-facing view of the rendered lines.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use super::collection::LineRange;
use super::options::ViewLineOptions;
use super::renderer::RenderStats;
use super::target::RenderTarget;
use super::view_line::{HorizontalRange, ViewLine, ViewLinePayload};
use super::viewport::ViewportData;
use super::visible::VisibleLines;
use crate::line::RunPosition;

/// Visible [`ViewLine`]s of one editor, with the options they share.
///
/// Routes view events to the lines they concern, renders viewports and
/// answers per-line geometry queries. Tracks the widest line seen so far.
pub struct ViewLines<T: RenderTarget<ViewLinePayload>> {
    options: Rc<Cell<ViewLineOptions>>,
    visible: VisibleLines<ViewLine, T>,
    max_line_width: u32,
}

impl<T: RenderTarget<ViewLinePayload>> ViewLines<T> {
    pub fn new(options: ViewLineOptions, target: T) -> Self {
        let options = Rc::new(Cell::new(options));
        let shared = Rc::clone(&options);
        Self {
            options,
            visible: VisibleLines::new(move || ViewLine::new(shared.get()), target),
            max_line_width: 0,
        }
    }

    #[must_use]
    pub fn options(&self) -> ViewLineOptions {
        self.options.get()
    }

    #[must_use]
    pub fn target(&self) -> &T {
        self.visible.target()
    }

    pub fn target_mut(&mut self) -> &mut T {
        self.visible.target_mut()
    }

    #[must_use]
    pub fn visible_lines(&self) -> &VisibleLines<ViewLine, T> {
        &self.visible
    }

    /// Widest line width, in whole pixels, seen since the last reset.
    #[must_use]
    pub fn max_line_width(&self) -> u32 {
        self.max_line_width
    }

    fn for_each_line(&mut self, mut f: impl FnMut(&mut ViewLine) -> bool) -> bool {
        let mut any = false;
        for line in self.visible.lines_mut().iter_mut() {
            any |= f(line);
        }
        any
    }

    /// Install new options. Every visible line is invalidated when they
    /// differ from the current ones.
    pub fn on_configuration_changed(&mut self, options: ViewLineOptions) -> bool {
        if self.options.get() == options {
            return false;
        }
        debug!(?options, "view line options changed");
        self.options.set(options);
        self.max_line_width = 0;
        self.for_each_line(|line| {
            line.on_options_changed(options);
            true
        });
        true
    }

    pub fn on_decorations_changed(&mut self) -> bool {
        self.for_each_line(|line| {
            line.on_decorations_changed();
            true
        });
        true
    }

    /// Returns whether any visible line needs to re-render.
    pub fn on_selection_changed(&mut self) -> bool {
        self.for_each_line(ViewLine::on_selection_changed)
    }

    pub fn on_cursor_state_changed(&mut self) -> bool {
        self.on_selection_changed()
    }

    pub fn on_flushed(&mut self) -> bool {
        self.max_line_width = 0;
        self.visible.on_flushed()
    }

    pub fn on_lines_changed(&mut self, from_line_number: usize, count: usize) -> bool {
        self.visible.on_lines_changed(from_line_number, count)
    }

    pub fn on_lines_deleted(&mut self, from_line_number: usize, to_line_number: usize) -> bool {
        self.visible.on_lines_deleted(from_line_number, to_line_number)
    }

    pub fn on_lines_inserted(&mut self, from_line_number: usize, to_line_number: usize) -> bool {
        self.visible.on_lines_inserted(from_line_number, to_line_number)
    }

    pub fn on_tokens_changed(&mut self, ranges: &[LineRange]) -> bool {
        self.visible.on_tokens_changed(ranges)
    }

    /// Render `viewport` and update the maximum line width from lines whose
    /// width is known without measuring.
    pub fn render_lines(&mut self, viewport: &ViewportData<'_>) -> RenderStats {
        let stats = self.visible.render_lines(viewport);

        let start = self.visible.start_line_number();
        let end = self.visible.end_line_number();
        let mut all_widths_known = true;
        let mut local_max = 0.0_f32;
        for line_number in start..=end {
            match self.line_width(line_number) {
                Some(width) => local_max = local_max.max(width),
                None => all_widths_known = false,
            }
        }
        if all_widths_known && start == 1 && end == viewport.line_count() {
            // Every line of the document was measured.
            self.max_line_width = 0;
        }
        self.ensure_max_line_width(local_max);
        stats
    }

    fn ensure_max_line_width(&mut self, width: f32) {
        let width = width.ceil() as u32;
        if self.max_line_width < width {
            self.max_line_width = width;
        }
    }

    #[must_use]
    pub fn line(&self, line_number: usize) -> Option<&ViewLine> {
        self.visible.visible_line(line_number)
    }

    /// Width in pixels of a visible line with a fast layout.
    #[must_use]
    pub fn line_width(&self, line_number: usize) -> Option<f32> {
        self.line(line_number)?.monospace_width()
    }

    #[must_use]
    pub fn visible_range_for_columns(
        &self,
        line_number: usize,
        start_column: usize,
        end_column: usize,
    ) -> Option<HorizontalRange> {
        self.line(line_number)?
            .visible_range_for_columns(start_column, end_column)
    }

    /// Column under `position` on a visible line.
    #[must_use]
    pub fn column_at(&self, line_number: usize, position: RunPosition) -> Option<usize> {
        Some(self.line(line_number)?.column_of_run_offset(position))
    }

    #[must_use]
    pub fn line_is_rendered_rtl(&self, line_number: usize) -> bool {
        self.line(line_number).is_some_and(ViewLine::is_rendered_rtl)
    }
}

impl<T: RenderTarget<ViewLinePayload>> std::fmt::Debug for ViewLines<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewLines")
            .field("options", &self.options.get())
            .field("visible", &self.visible)
            .field("max_line_width", &self.max_line_width)
            .finish()
    }
}
