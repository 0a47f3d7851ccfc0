//! The capability every line in the rendered window provides.

use super::target::NodeHandle;
use super::viewport::ViewportData;

/// One materialized line of the window.
///
/// A line is created empty, rendered into a payload that a
/// [`RenderTarget`](super::RenderTarget) attaches, and moved or re-rendered
/// on later passes. Its identity is independent of the line number it shows.
pub trait RenderedLine {
    /// What a render produces for the target.
    type Payload;

    /// The node this line's output is attached to, if any.
    fn node(&self) -> Option<NodeHandle>;

    fn set_node(&mut self, node: NodeHandle);

    fn on_content_changed(&mut self);

    fn on_tokens_changed(&mut self);

    /// Record a new position without re-rendering.
    fn layout_line(&mut self, line_number: usize, top: f32, height: f32);

    /// Render if something relevant changed; `None` keeps the current output.
    fn render_line(
        &mut self,
        line_number: usize,
        top: f32,
        height: f32,
        viewport: &ViewportData<'_>,
    ) -> Option<Self::Payload>;
}
