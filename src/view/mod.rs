//! The window of rendered lines and its reconciliation with the viewport.
//!
//! A viewport asks for a contiguous range of lines. The window keeps one
//! [`RenderedLine`] per visible line number, adjusts itself on document
//! edits and, on each render, reuses every line it can: lines still visible
//! are only repositioned, lines that left the range are detached from the
//! [`RenderTarget`], and only dirty or new lines are rendered again.
//!
//! Key types:
//!
//! - [`ViewLines`]: editor-facing facade owning options, window and target
//! - [`VisibleLines`]: window plus target, routing document events
//! - [`RenderedLinesCollection`]: the window bookkeeping alone
//! - [`ViewLayerRenderer`]: one reconcile pass
//! - [`ViewLine`]: the concrete line that renders through [`crate::line`]
//!
//! # Example
//!
//! ```
//! use viewline::view::{MemoryTarget, ViewLineOptions, ViewLines, ViewportData};
//!
//! let document = vec!["fn main() {", "    println!(\"hi\");", "}"];
//! let mut view = ViewLines::new(ViewLineOptions::default(), MemoryTarget::new());
//!
//! let stats = view.render_lines(&ViewportData::new(&document, 1, 3, 19.0));
//! assert_eq!(stats.lines_rendered_new, 3);
//! assert_eq!(view.target().len(), 3);
//!
//! // Scrolling by one line keeps two rendered lines and creates one.
//! let document = vec!["fn main() {", "    println!(\"hi\");", "}", ""];
//! let stats = view.render_lines(&ViewportData::new(&document, 2, 4, 19.0));
//! assert_eq!(stats.lines_created, 1);
//! assert_eq!(stats.lines_removed, 1);
//! ```

mod collection;
mod line;
mod options;
mod renderer;
mod target;
mod view_line;
mod view_lines;
mod viewport;
mod visible;

pub use collection::{LineRange, RenderedLinesCollection};
pub use line::RenderedLine;
pub use options::{ViewLineOptions, ViewLineOptionsBuilder};
pub use renderer::{RenderStats, RendererContext, ViewLayerRenderer};
pub use target::{MemoryNode, MemoryTarget, NodeHandle, RenderTarget, TargetCounters};
pub use view_line::{HorizontalRange, VIEW_LINE_CLASS, ViewLine, ViewLinePayload};
pub use view_lines::ViewLines;
pub use viewport::{DEFAULT_TOKEN_CLASS, LineRenderingData, LineSource, ViewSelection, ViewportData};
pub use visible::VisibleLines;
