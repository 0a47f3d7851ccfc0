//! Render output of one line: styled spans plus an optional overflow marker.

use std::fmt::{self, Write as _};

use super::part::OVERFLOW_CLASS;

/// One emitted run.
///
/// `text` holds exactly the characters the character mapping counts, so
/// `char_len()` is the run length expected by
/// [`CharacterMapping::column`](super::CharacterMapping::column).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderedSpan {
    pub class_name: String,
    pub text: String,
    /// Isolate as right-to-left.
    pub rtl: bool,
    /// Explicit pixel width for sized whitespace.
    pub width: Option<f32>,
}

impl RenderedSpan {
    #[must_use]
    pub fn new(class_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            text: text.into(),
            rtl: false,
            width: None,
        }
    }

    /// Number of produced characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// The "show more" marker appended to a truncated line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverflowMarker {
    /// Characters that were not rendered.
    pub count: usize,
}

impl OverflowMarker {
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count }
    }

    /// Human readable label, e.g. `Show more (7 chars)` or `Show more (1.5 KB)`.
    #[must_use]
    pub fn label(&self) -> String {
        const KB: usize = 1024;
        const MB: usize = 1024 * 1024;
        let n = self.count;
        let amount = if n < KB {
            format!("{n} chars")
        } else if n < MB {
            format!("{:.1} KB", n as f64 / KB as f64)
        } else {
            format!("{:.1} MB", n as f64 / MB as f64)
        };
        format!("Show more ({amount})")
    }
}

/// Rendered line: spans in run order, then the overflow marker if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineMarkup {
    pub spans: Vec<RenderedSpan>,
    pub overflow: Option<OverflowMarker>,
}

impl LineMarkup {
    #[must_use]
    pub fn span(&self, index: usize) -> Option<&RenderedSpan> {
        self.spans.get(index)
    }

    /// Concatenated produced text of every span, without the overflow marker.
    #[must_use]
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '&' => f.write_str("&amp;")?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for RenderedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<span")?;
        if self.rtl {
            f.write_str(" dir=\"rtl\" style=\"unicode-bidi:isolate\"")?;
        }
        if !self.class_name.is_empty() {
            write!(f, " class=\"{}\"", self.class_name)?;
        }
        if let Some(width) = self.width {
            write!(f, " style=\"width:{width}px\"")?;
        }
        f.write_char('>')?;
        write_escaped(f, &self.text)?;
        f.write_str("</span>")
    }
}

impl fmt::Display for OverflowMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<span class=\"{OVERFLOW_CLASS}\">{}</span>", self.label())
    }
}

impl fmt::Display for LineMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<span>")?;
        for span in &self.spans {
            span.fmt(f)?;
        }
        if let Some(overflow) = &self.overflow {
            overflow.fmt(f)?;
        }
        f.write_str("</span>")
    }
}
