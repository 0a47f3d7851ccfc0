//! Inline decorations and their normalization into non-overlapping segments.

use std::cmp::Ordering;

use super::part::RunMetadata;

/// How an inline decoration interacts with the text it covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InlineDecorationKind {
    /// Styles the covered characters.
    #[default]
    Regular,
    /// Zero-width element rendered before the anchor offset.
    Before,
    /// Zero-width element rendered after the anchor offset.
    After,
    /// Styles the covered characters and may change their advance width.
    RegularAffectingLetterSpacing,
}

impl InlineDecorationKind {
    /// Sort rank among decorations sharing the same range.
    const fn rank(self) -> u8 {
        match self {
            Self::Before => 0,
            Self::After => 1,
            Self::Regular => 2,
            Self::RegularAffectingLetterSpacing => 3,
        }
    }

    const fn metadata(self) -> RunMetadata {
        match self {
            Self::Before => RunMetadata::PSEUDO_BEFORE,
            Self::After => RunMetadata::PSEUDO_AFTER,
            Self::Regular | Self::RegularAffectingLetterSpacing => RunMetadata::empty(),
        }
    }

    const fn is_regular(self) -> bool {
        matches!(self, Self::Regular | Self::RegularAffectingLetterSpacing)
    }
}

/// A decoration over `[start_offset, end_offset)` of one line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InlineDecoration {
    pub start_offset: usize,
    pub end_offset: usize,
    pub class_name: String,
    pub kind: InlineDecorationKind,
}

impl InlineDecoration {
    #[must_use]
    pub fn new(
        start_offset: usize,
        end_offset: usize,
        class_name: impl Into<String>,
        kind: InlineDecorationKind,
    ) -> Self {
        Self {
            start_offset,
            end_offset,
            class_name: class_name.into(),
            kind,
        }
    }

    /// A regular decoration styling `[start_offset, end_offset)`.
    #[must_use]
    pub fn regular(start_offset: usize, end_offset: usize, class_name: impl Into<String>) -> Self {
        Self::new(
            start_offset,
            end_offset,
            class_name,
            InlineDecorationKind::Regular,
        )
    }

    /// A zero-width element rendered before the character at `offset`.
    #[must_use]
    pub fn before(offset: usize, class_name: impl Into<String>) -> Self {
        Self::new(offset, offset, class_name, InlineDecorationKind::Before)
    }

    /// A zero-width element rendered after the character preceding `offset`.
    #[must_use]
    pub fn after(offset: usize, class_name: impl Into<String>) -> Self {
        Self::new(offset, offset, class_name, InlineDecorationKind::After)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_offset >= self.end_offset
    }

    /// Render order: start, end, then kind rank. Ties keep input order
    /// under a stable sort.
    #[must_use]
    pub fn render_order(&self, other: &Self) -> Ordering {
        self.start_offset
            .cmp(&other.start_offset)
            .then(self.end_offset.cmp(&other.end_offset))
            .then(self.kind.rank().cmp(&other.kind.rank()))
    }
}

/// Sort decorations into render order, keeping input order among equals.
pub fn sort_decorations(decorations: &mut [InlineDecoration]) {
    decorations.sort_by(InlineDecoration::render_order);
}

/// Clip decorations to `[0, line_len]` and drop the ones that cannot render.
///
/// Inverted ranges are dropped, as are empty regular decorations; empty
/// `Before`/`After` decorations are anchors and survive. The result is sorted.
#[must_use]
pub fn clip_decorations(decorations: &[InlineDecoration], line_len: usize) -> Vec<InlineDecoration> {
    let mut result: Vec<InlineDecoration> = decorations
        .iter()
        .filter(|d| d.start_offset <= d.end_offset)
        .map(|d| InlineDecoration {
            start_offset: d.start_offset.min(line_len),
            end_offset: d.end_offset.min(line_len),
            ..d.clone()
        })
        .filter(|d| !(d.is_empty() && d.kind.is_regular()))
        .collect();
    sort_decorations(&mut result);
    result
}

/// A non-overlapping slice of one or more decorations.
///
/// `end_offset` is inclusive and may be `start_offset - 1` for zero-width
/// anchors, which is why offsets are signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DecorationSegment {
    pub start_offset: isize,
    pub end_offset: isize,
    pub class_name: String,
    pub metadata: RunMetadata,
}

struct StackEntry<'a> {
    stop_offset: isize,
    class_name: &'a str,
    metadata: RunMetadata,
}

/// Open decorations ordered by their (inclusive) stop offset.
#[derive(Default)]
struct Stack<'a> {
    entries: Vec<StackEntry<'a>>,
}

impl<'a> Stack<'a> {
    fn joined_class_names(&self) -> String {
        let names: Vec<&str> = self.entries.iter().map(|e| e.class_name).collect();
        names.join(" ")
    }

    fn combined_metadata(&self) -> RunMetadata {
        self.entries
            .iter()
            .fold(RunMetadata::empty(), |acc, e| acc | e.metadata)
    }

    /// Emit segments for every open decoration that stops before
    /// `max_stop_offset`, then a segment up to it if any remain open.
    fn consume_lower_than(
        &mut self,
        max_stop_offset: isize,
        mut next_start_offset: isize,
        result: &mut Vec<DecorationSegment>,
    ) -> isize {
        while let Some(first) = self.entries.first() {
            if first.stop_offset >= max_stop_offset {
                break;
            }
            let mut i = 0;
            while i + 1 < self.entries.len()
                && self.entries[i].stop_offset == self.entries[i + 1].stop_offset
            {
                i += 1;
            }
            let stop_offset = self.entries[i].stop_offset;
            result.push(DecorationSegment {
                start_offset: next_start_offset,
                end_offset: stop_offset,
                class_name: self.joined_class_names(),
                metadata: self.combined_metadata(),
            });
            next_start_offset = stop_offset + 1;
            self.entries.drain(..=i);
        }

        if !self.entries.is_empty() && next_start_offset < max_stop_offset {
            result.push(DecorationSegment {
                start_offset: next_start_offset,
                end_offset: max_stop_offset - 1,
                class_name: self.joined_class_names(),
                metadata: self.combined_metadata(),
            });
            next_start_offset = max_stop_offset;
        }

        next_start_offset
    }

    fn insert(&mut self, stop_offset: isize, class_name: &'a str, metadata: RunMetadata) {
        let entry = StackEntry {
            stop_offset,
            class_name,
            metadata,
        };
        match self.entries.last() {
            Some(last) if last.stop_offset > stop_offset => {
                let index = self
                    .entries
                    .iter()
                    .position(|e| e.stop_offset >= stop_offset)
                    .unwrap_or(self.entries.len());
                self.entries.insert(index, entry);
            }
            _ => self.entries.push(entry),
        }
    }
}

/// Split overlapping decorations into non-overlapping segments.
///
/// `decorations` must be sorted in render order. Where ranges overlap, the
/// overlap becomes its own segment whose class is the space-joined class list
/// of every open decoration and whose metadata is their union.
pub(crate) fn normalize_decorations(decorations: &[InlineDecoration]) -> Vec<DecorationSegment> {
    let mut result = Vec::new();
    if decorations.is_empty() {
        return result;
    }

    let mut stack = Stack::default();
    let mut next_start_offset: isize = 0;

    for decoration in decorations {
        let start_offset = decoration.start_offset as isize;
        let stop_offset = decoration.end_offset as isize - 1;

        next_start_offset = stack.consume_lower_than(start_offset, next_start_offset, &mut result);
        if stack.entries.is_empty() {
            next_start_offset = start_offset;
        }
        stack.insert(
            stop_offset,
            &decoration.class_name,
            decoration.kind.metadata(),
        );
    }

    stack.consume_lower_than(isize::MAX, next_start_offset, &mut result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: isize, end: isize, class: &str, metadata: RunMetadata) -> DecorationSegment {
        DecorationSegment {
            start_offset: start,
            end_offset: end,
            class_name: class.to_string(),
            metadata,
        }
    }

    #[test]
    fn single_decoration_is_one_segment() {
        let decorations = [InlineDecoration::regular(1, 3, "d")];
        assert_eq!(
            normalize_decorations(&decorations),
            vec![seg(1, 2, "d", RunMetadata::empty())]
        );
    }

    #[test]
    fn partial_overlap_splits_into_three() {
        let mut decorations = vec![
            InlineDecoration::regular(0, 4, "a"),
            InlineDecoration::regular(2, 6, "b"),
        ];
        sort_decorations(&mut decorations);
        assert_eq!(
            normalize_decorations(&decorations),
            vec![
                seg(0, 1, "a", RunMetadata::empty()),
                seg(2, 3, "a b", RunMetadata::empty()),
                seg(4, 5, "b", RunMetadata::empty()),
            ]
        );
    }

    #[test]
    fn nested_decoration_keeps_outer_remainder() {
        let mut decorations = vec![
            InlineDecoration::regular(0, 10, "outer"),
            InlineDecoration::regular(3, 5, "inner"),
        ];
        sort_decorations(&mut decorations);
        assert_eq!(
            normalize_decorations(&decorations),
            vec![
                seg(0, 2, "outer", RunMetadata::empty()),
                seg(3, 4, "inner outer", RunMetadata::empty()),
                seg(5, 9, "outer", RunMetadata::empty()),
            ]
        );
    }

    #[test]
    fn zero_width_anchor_is_not_split() {
        let mut decorations = vec![
            InlineDecoration::regular(0, 3, "r"),
            InlineDecoration::before(0, "b"),
        ];
        sort_decorations(&mut decorations);
        assert_eq!(decorations[0].kind, InlineDecorationKind::Before);
        assert_eq!(
            normalize_decorations(&decorations),
            vec![
                seg(0, -1, "b", RunMetadata::PSEUDO_BEFORE),
                seg(0, 2, "r", RunMetadata::empty()),
            ]
        );
    }

    #[test]
    fn anchors_at_same_offset_keep_input_order() {
        let decorations = vec![
            InlineDecoration::after(5, "zeta"),
            InlineDecoration::after(5, "alpha"),
            InlineDecoration::before(5, "omega"),
            InlineDecoration::before(5, "beta"),
        ];
        let segments = normalize_decorations(&clip_decorations(&decorations, 5));
        let classes: Vec<_> = segments.iter().map(|s| s.class_name.as_str()).collect();
        assert_eq!(classes, ["omega", "beta", "zeta", "alpha"]);
    }

    #[test]
    fn equal_regular_decorations_keep_input_order() {
        let mut decorations = vec![
            InlineDecoration::regular(1, 3, "zeta"),
            InlineDecoration::regular(1, 3, "alpha"),
        ];
        sort_decorations(&mut decorations);
        let classes: Vec<_> = decorations.iter().map(|d| d.class_name.as_str()).collect();
        assert_eq!(classes, ["zeta", "alpha"]);
    }

    #[test]
    fn clip_drops_inverted_and_empty_regular() {
        let decorations = vec![
            InlineDecoration::regular(4, 2, "inverted"),
            InlineDecoration::regular(3, 3, "empty"),
            InlineDecoration::regular(2, 40, "long"),
            InlineDecoration::after(40, "eol"),
        ];
        let clipped = clip_decorations(&decorations, 8);
        assert_eq!(
            clipped,
            vec![
                InlineDecoration::regular(2, 8, "long"),
                InlineDecoration::after(8, "eol"),
            ]
        );
    }

    #[test]
    fn render_order_prefers_before_then_after() {
        let mut decorations = vec![
            InlineDecoration::regular(2, 2, "r"),
            InlineDecoration::after(2, "a"),
            InlineDecoration::before(2, "b"),
        ];
        sort_decorations(&mut decorations);
        let kinds: Vec<_> = decorations.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            [
                InlineDecorationKind::Before,
                InlineDecorationKind::After,
                InlineDecorationKind::Regular,
            ]
        );
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(normalize_decorations(&[]).is_empty());
    }
}
