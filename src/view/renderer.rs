//! Bring a window of rendered lines in sync with a requested viewport.

use tracing::{debug, trace};

use super::line::RenderedLine;
use super::target::RenderTarget;
use super::viewport::ViewportData;

/// The window as seen by one reconcile pass.
#[derive(Debug)]
pub struct RendererContext<L> {
    pub rend_line_number_start: usize,
    pub lines: Vec<L>,
}

impl<L> RendererContext<L> {
    #[must_use]
    pub fn new(rend_line_number_start: usize, lines: Vec<L>) -> Self {
        Self {
            rend_line_number_start,
            lines,
        }
    }

    fn end_line_number(&self) -> usize {
        (self.rend_line_number_start + self.lines.len()).saturating_sub(1)
    }
}

/// What a reconcile pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// The old window was discarded wholesale.
    pub full_replace: bool,
    pub lines_created: usize,
    pub lines_removed: usize,
    /// Kept lines that were only repositioned.
    pub lines_relaid: usize,
    /// Render output attached as new nodes.
    pub lines_rendered_new: usize,
    /// Render output replacing an existing node.
    pub lines_replaced: usize,
}

/// One reconcile pass over a window.
///
/// Lines present in both the old window and the requested range keep their
/// identity and are only relaid; lines that fall out are detached; missing
/// lines are created. Every line then gets a chance to re-render.
pub struct ViewLayerRenderer<'a, L: RenderedLine, T: RenderTarget<L::Payload> + ?Sized> {
    target: &'a mut T,
    viewport: &'a ViewportData<'a>,
    create_line: &'a mut dyn FnMut() -> L,
    stats: RenderStats,
}

impl<'a, L, T> ViewLayerRenderer<'a, L, T>
where
    L: RenderedLine,
    T: RenderTarget<L::Payload> + ?Sized,
{
    pub fn new(
        target: &'a mut T,
        viewport: &'a ViewportData<'a>,
        create_line: &'a mut dyn FnMut() -> L,
    ) -> Self {
        Self {
            target,
            viewport,
            create_line,
            stats: RenderStats::default(),
        }
    }

    /// Reconcile `ctx` with `[start_line_number, stop_line_number]`.
    ///
    /// `delta_top[i]` is the top of line `start_line_number + i`.
    ///
    /// # Panics
    ///
    /// Panics if `delta_top` has fewer entries than the requested range.
    pub fn render(
        mut self,
        mut ctx: RendererContext<L>,
        start_line_number: usize,
        stop_line_number: usize,
        delta_top: &[f32],
    ) -> (RendererContext<L>, RenderStats) {
        let requested = (stop_line_number + 1).saturating_sub(start_line_number);
        assert!(
            delta_top.len() >= requested,
            "vertical offsets cover {} lines, {requested} requested",
            delta_top.len()
        );

        let rend_start = ctx.rend_line_number_start;
        let rend_end = ctx.end_line_number();
        let overlaps = !ctx.lines.is_empty()
            && requested > 0
            && rend_end >= start_line_number
            && stop_line_number >= rend_start;

        if !overlaps {
            debug!(
                old_start = rend_start,
                old_len = ctx.lines.len(),
                start_line_number,
                stop_line_number,
                "replacing rendered window"
            );
            self.stats.full_replace = true;
            let old = std::mem::take(&mut ctx.lines);
            self.detach_lines(old);
            ctx.rend_line_number_start = start_line_number;
            ctx.lines = self.create_lines(requested);
            self.finish_rendering(&mut ctx, delta_top);
            return (ctx, self.stats);
        }

        // Lines kept from the old window only move.
        let first_kept = start_line_number.saturating_sub(rend_start);
        let last_kept = (stop_line_number - rend_start).min(ctx.lines.len() - 1);
        for index in first_kept..=last_kept {
            let line_number = rend_start + index;
            let top = delta_top[line_number - start_line_number];
            self.layout(&mut ctx.lines[index], line_number, top);
        }

        if rend_start > start_line_number {
            let to_line_number = stop_line_number.min(rend_start - 1);
            if start_line_number <= to_line_number {
                let fresh = self.create_lines(to_line_number - start_line_number + 1);
                debug!(count = fresh.len(), "inserting lines before window");
                ctx.lines.splice(0..0, fresh);
            }
        } else if rend_start < start_line_number {
            let remove_count = ctx.lines.len().min(start_line_number - rend_start);
            if remove_count > 0 {
                debug!(count = remove_count, "removing lines before window");
                let removed: Vec<L> = ctx.lines.drain(..remove_count).collect();
                self.detach_lines(removed);
            }
        }
        ctx.rend_line_number_start = start_line_number;

        let rend_end = ctx.end_line_number();
        if rend_end < stop_line_number {
            let fresh = self.create_lines(stop_line_number - rend_end);
            debug!(count = fresh.len(), "inserting lines after window");
            ctx.lines.extend(fresh);
        } else if rend_end > stop_line_number {
            let keep = stop_line_number + 1 - start_line_number;
            debug!(count = ctx.lines.len() - keep, "removing lines after window");
            let removed = ctx.lines.split_off(keep);
            self.detach_lines(removed);
        }

        self.finish_rendering(&mut ctx, delta_top);
        (ctx, self.stats)
    }

    fn create_lines(&mut self, count: usize) -> Vec<L> {
        self.stats.lines_created += count;
        (0..count).map(|_| (self.create_line)()).collect()
    }

    fn detach_lines(&mut self, lines: Vec<L>) {
        self.stats.lines_removed += lines.len();
        for node in lines.iter().filter_map(|line| line.node()) {
            self.target.detach(node);
        }
    }

    fn layout(&mut self, line: &mut L, line_number: usize, top: f32) {
        let height = self.viewport.line_height;
        line.layout_line(line_number, top, height);
        if let Some(node) = line.node() {
            self.target.set_position(node, top, height);
        }
        self.stats.lines_relaid += 1;
    }

    /// Render every line that wants to; attach new output in one batch and
    /// replace existing output in place.
    fn finish_rendering(&mut self, ctx: &mut RendererContext<L>, delta_top: &[f32]) {
        let height = self.viewport.line_height;
        let mut fresh_indices = Vec::new();
        let mut fresh_payloads = Vec::new();
        let mut invalid = Vec::new();

        for (index, line) in ctx.lines.iter_mut().enumerate() {
            let line_number = ctx.rend_line_number_start + index;
            let existing = line.node();
            let Some(payload) = line.render_line(line_number, delta_top[index], height, self.viewport)
            else {
                continue;
            };
            trace!(line_number, new = existing.is_none(), "line rendered");
            match existing {
                Some(node) => invalid.push((node, payload)),
                None => {
                    fresh_indices.push(index);
                    fresh_payloads.push(payload);
                }
            }
        }

        if !fresh_payloads.is_empty() {
            self.stats.lines_rendered_new += fresh_payloads.len();
            let handles = self.target.attach_batch(fresh_payloads);
            for (index, node) in fresh_indices.into_iter().zip(handles) {
                ctx.lines[index].set_node(node);
            }
        }

        self.stats.lines_replaced += invalid.len();
        for (node, payload) in invalid {
            self.target.replace(node, payload);
        }
    }
}
