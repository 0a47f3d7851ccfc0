//! Visual runs: the atomic unit handed from the resolver to the emitter.

use bitflags::bitflags;

/// Style class of a run that visualizes whitespace.
pub const WHITESPACE_CLASS: &str = "ws";
/// Style class of a whitespace run that carries an explicit pixel width.
pub const SIZED_WHITESPACE_CLASS: &str = "ws-sized";
/// Style class of a run holding a single control character.
pub const CONTROL_CLASS: &str = "control";
/// Style class of the "show more" marker of a truncated line.
pub const OVERFLOW_CLASS: &str = "overflow";

bitflags! {
    /// Behavior bits carried by a visual run.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RunMetadata: u8 {
        /// The run renders visible whitespace glyphs.
        const WHITESPACE    = 0b001;
        /// The run carries a zero-width decoration anchored before content.
        const PSEUDO_BEFORE = 0b010;
        /// The run carries a zero-width decoration anchored after content.
        const PSEUDO_AFTER  = 0b100;
    }
}

bitflags! {
    /// Kinds of zero-width foreign elements present on a rendered line.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ForeignElements: u8 {
        const BEFORE = 0b01;
        const AFTER  = 0b10;
    }
}

/// A contiguous span of a line with uniform style and behavior.
///
/// The run starts where the previous run ended and ends at `end_index`
/// (exclusive). Zero-length runs are legal and carry decorations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualRun {
    pub end_index: usize,
    pub class_name: String,
    pub metadata: RunMetadata,
    pub contains_rtl: bool,
}

impl VisualRun {
    #[must_use]
    pub fn new(
        end_index: usize,
        class_name: impl Into<String>,
        metadata: RunMetadata,
        contains_rtl: bool,
    ) -> Self {
        Self {
            end_index,
            class_name: class_name.into(),
            metadata,
            contains_rtl,
        }
    }

    /// The same run ending at a different offset.
    #[must_use]
    pub fn ending_at(&self, end_index: usize) -> Self {
        Self {
            end_index,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.metadata.contains(RunMetadata::WHITESPACE)
    }

    #[must_use]
    pub fn is_pseudo_after(&self) -> bool {
        self.metadata.contains(RunMetadata::PSEUDO_AFTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_queries() {
        let ws = VisualRun::new(3, WHITESPACE_CLASS, RunMetadata::WHITESPACE, false);
        assert!(ws.is_whitespace());
        assert!(!ws.is_pseudo_after());

        let after = VisualRun::new(3, "ghost", RunMetadata::PSEUDO_AFTER, false);
        assert!(after.is_pseudo_after());
        assert!(!after.is_whitespace());
    }

    #[test]
    fn ending_at_keeps_style() {
        let run = VisualRun::new(10, "mtk4", RunMetadata::empty(), true);
        let cut = run.ending_at(4);
        assert_eq!(cut.end_index, 4);
        assert_eq!(cut.class_name, "mtk4");
        assert!(cut.contains_rtl);
    }
}
