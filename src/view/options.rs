//! Rendering options shared by every view line of an editor.

use crate::error::{Error, Result};
use crate::line::RenderWhitespace;

/// Options a view line needs that do not come from the document.
///
/// Compared as a whole: any difference invalidates every rendered line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewLineOptions {
    /// Assume a monospace font for layout shortcuts.
    pub use_monospace_optimizations: bool,
    /// The font has a halfwidth rightwards arrow glyph.
    pub can_use_halfwidth_rightwards_arrow: bool,
    pub space_width: f32,
    pub middot_width: f32,
    pub wsmiddot_width: f32,
    /// Characters rendered per line before a "show more" marker; `None`
    /// renders everything.
    pub stop_rendering_line_after: Option<usize>,
    pub render_whitespace: RenderWhitespace,
    pub render_control_characters: bool,
    pub font_ligatures: bool,
    pub vertical_scrollbar_size: u32,
    pub line_height: f32,
    pub render_new_line_when_empty: bool,
}

impl Default for ViewLineOptions {
    fn default() -> Self {
        Self {
            use_monospace_optimizations: true,
            can_use_halfwidth_rightwards_arrow: true,
            space_width: 7.0,
            middot_width: 7.0,
            wsmiddot_width: 7.0,
            stop_rendering_line_after: Some(10_000),
            render_whitespace: RenderWhitespace::Selection,
            render_control_characters: false,
            font_ligatures: false,
            vertical_scrollbar_size: 14,
            line_height: 19.0,
            render_new_line_when_empty: false,
        }
    }
}

impl ViewLineOptions {
    /// Create a new options builder, starting from the defaults.
    #[must_use]
    pub fn builder() -> ViewLineOptionsBuilder {
        ViewLineOptionsBuilder::default()
    }
}

/// Builder for [`ViewLineOptions`] that validates on [`build`](Self::build).
#[derive(Clone, Debug, Default)]
pub struct ViewLineOptionsBuilder {
    options: ViewLineOptions,
}

impl ViewLineOptionsBuilder {
    #[must_use]
    pub fn monospace(mut self, monospace: bool) -> Self {
        self.options.use_monospace_optimizations = monospace;
        self
    }

    #[must_use]
    pub fn halfwidth_arrow(mut self, available: bool) -> Self {
        self.options.can_use_halfwidth_rightwards_arrow = available;
        self
    }

    /// Set the measured widths of a space, U+00B7 and U+2E31.
    #[must_use]
    pub fn font_widths(mut self, space: f32, middot: f32, wsmiddot: f32) -> Self {
        self.options.space_width = space;
        self.options.middot_width = middot;
        self.options.wsmiddot_width = wsmiddot;
        self
    }

    #[must_use]
    pub fn stop_rendering_line_after(mut self, stop: Option<usize>) -> Self {
        self.options.stop_rendering_line_after = stop;
        self
    }

    #[must_use]
    pub fn render_whitespace(mut self, mode: RenderWhitespace) -> Self {
        self.options.render_whitespace = mode;
        self
    }

    #[must_use]
    pub fn render_control_characters(mut self, render: bool) -> Self {
        self.options.render_control_characters = render;
        self
    }

    #[must_use]
    pub fn font_ligatures(mut self, ligatures: bool) -> Self {
        self.options.font_ligatures = ligatures;
        self
    }

    #[must_use]
    pub fn vertical_scrollbar_size(mut self, size: u32) -> Self {
        self.options.vertical_scrollbar_size = size;
        self
    }

    #[must_use]
    pub fn line_height(mut self, height: f32) -> Self {
        self.options.line_height = height;
        self
    }

    #[must_use]
    pub fn render_new_line_when_empty(mut self, render: bool) -> Self {
        self.options.render_new_line_when_empty = render;
        self
    }

    /// Validate and build the options.
    pub fn build(self) -> Result<ViewLineOptions> {
        let o = self.options;
        for (name, width) in [
            ("space_width", o.space_width),
            ("middot_width", o.middot_width),
            ("wsmiddot_width", o.wsmiddot_width),
        ] {
            if !width.is_finite() || width < 0.0 {
                return Err(Error::InvalidOption {
                    name,
                    reason: format!("must be a finite, non-negative width (got {width})"),
                });
            }
        }
        if !o.line_height.is_finite() || o.line_height <= 0.0 {
            return Err(Error::InvalidOption {
                name: "line_height",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = ViewLineOptions::default();
        assert_eq!(options.stop_rendering_line_after, Some(10_000));
        assert_eq!(options.render_whitespace, RenderWhitespace::Selection);
        assert!(options.use_monospace_optimizations);
        assert_eq!(ViewLineOptions::builder().build(), Ok(options));
    }

    #[test]
    fn builder_sets_fields() {
        let options = ViewLineOptions::builder()
            .monospace(false)
            .font_widths(8.0, 6.0, 7.0)
            .render_whitespace(RenderWhitespace::All)
            .stop_rendering_line_after(None)
            .line_height(20.0)
            .build()
            .unwrap();
        assert!(!options.use_monospace_optimizations);
        assert_eq!(options.render_whitespace, RenderWhitespace::All);
        assert_eq!(options.stop_rendering_line_after, None);
        assert!((options.middot_width - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn builder_rejects_bad_values() {
        let err = ViewLineOptions::builder().line_height(0.0).build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid option line_height: must be greater than zero"
        );

        let err = ViewLineOptions::builder()
            .font_widths(f32::NAN, 1.0, 1.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption { name: "space_width", .. }));
    }
}
