//! The rendered window plus the surface it is attached to.

use tracing::debug;

use super::collection::{LineRange, RenderedLinesCollection};
use super::line::RenderedLine;
use super::renderer::{RenderStats, RendererContext, ViewLayerRenderer};
use super::target::RenderTarget;
use super::viewport::ViewportData;

/// Owns the rendered window and its render target.
///
/// Document events adjust the window immediately and detach whatever falls
/// out of it; [`render_lines`](Self::render_lines) reconciles the window with
/// a viewport.
pub struct VisibleLines<L: RenderedLine, T: RenderTarget<L::Payload>> {
    lines: RenderedLinesCollection<L>,
    target: T,
    last_stats: RenderStats,
}

impl<L, T> VisibleLines<L, T>
where
    L: RenderedLine,
    T: RenderTarget<L::Payload>,
{
    pub fn new(create_line: impl FnMut() -> L + 'static, target: T) -> Self {
        Self {
            lines: RenderedLinesCollection::new(create_line),
            target,
            last_stats: RenderStats::default(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    #[must_use]
    pub fn lines(&self) -> &RenderedLinesCollection<L> {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut RenderedLinesCollection<L> {
        &mut self.lines
    }

    #[must_use]
    pub fn start_line_number(&self) -> usize {
        self.lines.start_line_number()
    }

    #[must_use]
    pub fn end_line_number(&self) -> usize {
        self.lines.end_line_number()
    }

    #[must_use]
    pub fn visible_line(&self, line_number: usize) -> Option<&L> {
        self.lines.get(line_number)
    }

    /// Statistics of the most recent [`render_lines`](Self::render_lines).
    #[must_use]
    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    fn detach(&mut self, lines: Vec<L>) {
        for node in lines.iter().filter_map(|line| line.node()) {
            self.target.detach(node);
        }
    }

    /// Drop every rendered line; the next render starts from scratch.
    pub fn on_flushed(&mut self) -> bool {
        let flushed = self.lines.flush();
        debug!(count = flushed.len(), "window flushed");
        self.detach(flushed);
        true
    }

    pub fn on_lines_changed(&mut self, from_line_number: usize, count: usize) -> bool {
        self.lines.on_lines_changed(from_line_number, count)
    }

    pub fn on_lines_deleted(&mut self, from_line_number: usize, to_line_number: usize) -> bool {
        let removed = self.lines.on_lines_deleted(from_line_number, to_line_number);
        self.detach(removed);
        true
    }

    pub fn on_lines_inserted(&mut self, from_line_number: usize, to_line_number: usize) -> bool {
        let removed = self.lines.on_lines_inserted(from_line_number, to_line_number);
        self.detach(removed);
        true
    }

    pub fn on_tokens_changed(&mut self, ranges: &[LineRange]) -> bool {
        self.lines.on_tokens_changed(ranges)
    }

    /// Reconcile the window with `viewport` and render what changed.
    pub fn render_lines(&mut self, viewport: &ViewportData<'_>) -> RenderStats {
        let (start, lines) = self.lines.take();
        let ctx = RendererContext::new(start, lines);
        let renderer = ViewLayerRenderer::new(&mut self.target, viewport, self.lines.line_factory());
        let (ctx, stats) = renderer.render(
            ctx,
            viewport.start_line_number,
            viewport.end_line_number,
            &viewport.relative_vertical_offset,
        );
        self.lines.set(ctx.rend_line_number_start, ctx.lines);
        self.last_stats = stats;
        stats
    }
}

impl<L, T> std::fmt::Debug for VisibleLines<L, T>
where
    L: RenderedLine,
    T: RenderTarget<L::Payload>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibleLines")
            .field("lines", &self.lines)
            .field("last_stats", &self.last_stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::options::ViewLineOptions;
    use crate::view::target::MemoryTarget;
    use crate::view::view_line::{ViewLine, ViewLinePayload};

    fn visible() -> VisibleLines<ViewLine, MemoryTarget<ViewLinePayload>> {
        VisibleLines::new(|| ViewLine::new(ViewLineOptions::default()), MemoryTarget::new())
    }

    fn texts(v: &VisibleLines<ViewLine, MemoryTarget<ViewLinePayload>>) -> Vec<String> {
        (v.start_line_number()..=v.end_line_number())
            .filter_map(|n| v.visible_line(n))
            .filter_map(|line| line.node())
            .filter_map(|node| v.target().payload(node))
            .map(|p| p.markup.text())
            .collect()
    }

    #[test]
    fn renders_viewport() {
        let doc = vec!["one", "two", "three", "four"];
        let mut v = visible();
        let stats = v.render_lines(&ViewportData::new(&doc, 2, 3, 19.0));
        assert!(stats.full_replace);
        assert_eq!(texts(&v), ["two", "three"]);
        assert_eq!(v.last_stats(), stats);
    }

    #[test]
    fn deleted_lines_are_detached_and_rerendered_on_demand() {
        let mut doc = vec!["a", "b", "c", "d", "e"];
        let mut v = visible();
        v.render_lines(&ViewportData::new(&doc, 1, 5, 19.0));
        assert_eq!(v.target().len(), 5);

        doc.remove(1);
        assert!(v.on_lines_deleted(2, 2));
        assert_eq!(v.target().len(), 4);
        assert_eq!(v.end_line_number(), 4);

        let stats = v.render_lines(&ViewportData::new(&doc, 1, 4, 19.0));
        assert_eq!(stats.lines_created, 0);
        assert_eq!(texts(&v), ["a", "c", "d", "e"]);
    }

    #[test]
    fn inserted_lines_get_fresh_slots() {
        let mut doc = vec!["a", "b", "c"];
        let mut v = visible();
        v.render_lines(&ViewportData::new(&doc, 1, 3, 19.0));

        doc.insert(1, "new");
        v.on_lines_inserted(2, 2);
        assert_eq!(v.target().len(), 2);

        let stats = v.render_lines(&ViewportData::new(&doc, 1, 3, 19.0));
        assert_eq!(stats.lines_rendered_new, 1);
        assert_eq!(texts(&v), ["a", "new", "b"]);
    }

    #[test]
    fn changed_lines_replace_in_place() {
        let mut doc = vec!["a", "b"];
        let mut v = visible();
        v.render_lines(&ViewportData::new(&doc, 1, 2, 19.0));
        doc[1] = "bee";
        assert!(v.on_lines_changed(2, 1));
        let stats = v.render_lines(&ViewportData::new(&doc, 1, 2, 19.0));
        assert_eq!(stats.lines_replaced, 1);
        assert_eq!(texts(&v), ["a", "bee"]);
    }

    #[test]
    fn flush_detaches_everything() {
        let doc = vec!["a", "b"];
        let mut v = visible();
        v.render_lines(&ViewportData::new(&doc, 1, 2, 19.0));
        assert!(v.on_flushed());
        assert!(v.target().is_empty());
        assert!(v.lines().is_empty());
        let stats = v.render_lines(&ViewportData::new(&doc, 1, 2, 19.0));
        assert!(stats.full_replace);
        assert_eq!(texts(&v), ["a", "b"]);
    }
}
