//! Turn a render configuration into the final list of visual runs.
//!
//! Passes run in a fixed order: overflow truncation and token clipping,
//! control-character extraction, whitespace visualization, inline
//! decorations, then either oversized-run splitting (left-to-right lines) or
//! leading-whitespace isolation (lines with right-to-left text).

use tracing::trace;

use super::decoration::{InlineDecoration, InlineDecorationKind, clip_decorations, normalize_decorations};
use super::input::{OffsetRange, RenderLineConfig, RenderWhitespace};
use super::part::{CONTROL_CLASS, ForeignElements, RunMetadata, VisualRun, WHITESPACE_CLASS};
use super::tokens::LineTokens;
use crate::unicode::{
    char_columns, first_non_whitespace_index, is_control_character, is_rtl_char,
    last_non_whitespace_index,
};

/// Runs longer than this are split so the layout engine never measures
/// very long spans.
pub const LONG_RUN_LENGTH: usize = 50;

/// A line ready for emission.
#[derive(Clone, Debug)]
pub struct ResolvedRenderLine<'a> {
    pub config: &'a RenderLineConfig,
    pub chars: Vec<char>,
    /// Number of characters that will be rendered.
    pub len: usize,
    /// Characters cut off by `stop_rendering_line_after`.
    pub overflowing_char_count: usize,
    /// Contiguous runs; the last one ends at `len`.
    pub runs: Vec<VisualRun>,
    pub foreign_elements: ForeignElements,
    /// Tab size, at least one.
    pub tab_size: usize,
    /// Faux indent length, at most `len`.
    pub faux_indent_length: usize,
}

impl ResolvedRenderLine<'_> {
    #[must_use]
    pub fn is_overflowing(&self) -> bool {
        self.overflowing_char_count > 0
    }
}

/// Resolve `config` into visual runs. Pure and deterministic.
#[must_use]
pub fn resolve(config: &RenderLineConfig) -> ResolvedRenderLine<'_> {
    let chars: Vec<char> = config.line_content.chars().collect();
    let content_len = chars.len();

    let (len, overflowing_char_count) = match config.stop_rendering_line_after {
        Some(stop) if stop < content_len => (stop, content_len - stop),
        _ => (content_len, 0),
    };
    if overflowing_char_count > 0 {
        trace!(len, overflowing_char_count, "truncating long line");
    }

    let tab_size = config.tab_size.max(1);
    let faux_indent_length = config.faux_indent_length.min(len);

    let mut runs = transform_and_remove_overflowing(
        &chars,
        config.contains_rtl,
        &config.line_tokens,
        faux_indent_length,
        len,
    );

    if config.render_control_characters && !config.is_basic_ascii {
        runs = extract_control_characters(&chars, runs);
    }

    let renders_whitespace = match config.render_whitespace {
        RenderWhitespace::All | RenderWhitespace::Boundary => true,
        RenderWhitespace::Selection => config.selections_on_line.is_some(),
        RenderWhitespace::Trailing => !config.continues_with_wrapped_line,
        RenderWhitespace::None => false,
    };
    if renders_whitespace {
        runs = apply_render_whitespace(config, &chars, len, tab_size, faux_indent_length, &runs);
    }

    let decorations = clip_decorations(&config.line_decorations, content_len);
    let mut foreign_elements = ForeignElements::empty();
    if !decorations.is_empty() {
        for decoration in &decorations {
            match decoration.kind {
                InlineDecorationKind::Before | InlineDecorationKind::RegularAffectingLetterSpacing => {
                    foreign_elements |= ForeignElements::BEFORE;
                }
                InlineDecorationKind::After => foreign_elements |= ForeignElements::AFTER,
                InlineDecorationKind::Regular => {}
            }
        }
        runs = apply_inline_decorations(&runs, &decorations);
    }

    runs = if config.contains_rtl {
        split_leading_whitespace_from_rtl(&chars, runs)
    } else {
        split_large_runs(&chars, runs, !config.is_basic_ascii || config.font_ligatures)
    };

    ResolvedRenderLine {
        config,
        chars,
        len,
        overflowing_char_count,
        runs,
        foreign_elements,
        tab_size,
        faux_indent_length,
    }
}

fn slice_contains_rtl(chars: &[char]) -> bool {
    chars.iter().any(|&c| is_rtl_char(c))
}

/// Clip token runs to `len`, collapse the faux indent into one unstyled run
/// and make sure the last run ends exactly at `len`.
fn transform_and_remove_overflowing(
    chars: &[char],
    line_contains_rtl: bool,
    tokens: &LineTokens,
    faux_indent_length: usize,
    len: usize,
) -> Vec<VisualRun> {
    let mut result = Vec::with_capacity(tokens.len() + 1);
    if faux_indent_length > 0 {
        result.push(VisualRun::new(faux_indent_length, "", RunMetadata::empty(), false));
    }

    let mut start_offset = faux_indent_length;
    for token in tokens.iter() {
        let end_index = token.end_index;
        if end_index <= faux_indent_length {
            continue;
        }
        if end_index >= len {
            let rtl = line_contains_rtl && slice_contains_rtl(&chars[start_offset..len]);
            result.push(VisualRun::new(len, token.class_name.as_str(), RunMetadata::empty(), rtl));
            break;
        }
        let rtl = line_contains_rtl && slice_contains_rtl(&chars[start_offset..end_index]);
        result.push(VisualRun::new(end_index, token.class_name.as_str(), RunMetadata::empty(), rtl));
        start_offset = end_index;
    }

    if result.last().is_none_or(|run| run.end_index < len) {
        let start = result.last().map_or(0, |run| run.end_index);
        let rtl = line_contains_rtl && slice_contains_rtl(&chars[start..len]);
        result.push(VisualRun::new(len, "", RunMetadata::empty(), rtl));
    }
    result
}

/// Carve every control character into a one-character run of its own.
///
/// Zero-length runs are dropped, so this must run before decorations add
/// their anchors.
fn extract_control_characters(chars: &[char], runs: Vec<VisualRun>) -> Vec<VisualRun> {
    let mut result = Vec::with_capacity(runs.len());
    let mut last_end = 0;
    let mut char_offset = 0;

    for run in &runs {
        let end_index = run.end_index;
        while char_offset < end_index {
            if is_control_character(chars[char_offset]) {
                if char_offset > last_end {
                    result.push(run.ending_at(char_offset));
                }
                result.push(VisualRun::new(char_offset + 1, CONTROL_CLASS, run.metadata, false));
                last_end = char_offset + 1;
            }
            char_offset += 1;
        }
        if char_offset > last_end {
            result.push(run.ending_at(end_index));
            last_end = end_index;
        }
    }

    if result.is_empty() { runs } else { result }
}

fn whitespace_run(end_index: usize) -> VisualRun {
    VisualRun::new(end_index, WHITESPACE_CLASS, RunMetadata::WHITESPACE, false)
}

/// Close a whitespace stretch ending at `end_index`, either as one run or as
/// one run per character.
fn push_whitespace(result: &mut Vec<VisualRun>, end_index: usize, faux_indent_length: usize, per_character: bool) {
    if per_character {
        let last_end = result.last().map_or(faux_indent_length, |run| run.end_index);
        for i in last_end + 1..=end_index {
            result.push(whitespace_run(i));
        }
    } else {
        result.push(whitespace_run(end_index));
    }
}

/// Replace visualized whitespace with dedicated whitespace runs.
///
/// With a proportional font every tab stop starts a new whitespace run, and
/// when the whitespace glyph is narrower or wider than a space each
/// whitespace character gets its own run so it can be sized.
fn apply_render_whitespace(
    config: &RenderLineConfig,
    chars: &[char],
    len: usize,
    tab_size: usize,
    faux_indent_length: usize,
    runs: &[VisualRun],
) -> Vec<VisualRun> {
    let selections: Option<&[OffsetRange]> = config.selections_on_line.as_deref();
    let only_boundary = config.render_whitespace == RenderWhitespace::Boundary;
    let only_trailing = config.render_whitespace == RenderWhitespace::Trailing;
    #[allow(clippy::float_cmp)]
    let per_character = config.render_space_width != config.space_width;
    let monospace = config.use_monospace_optimizations;

    let mut result = Vec::with_capacity(runs.len() * 2);
    let mut run_index = 0;
    let mut current = &runs[0];

    let (line_is_blank, first_non_ws, last_non_ws) =
        match (first_non_whitespace_index(chars), last_non_whitespace_index(chars)) {
            (Some(first), Some(last)) => (false, first, last),
            _ => (true, len, len),
        };

    let mut was_in_whitespace = false;
    let mut selection_index = 0;
    let mut current_selection = selections.and_then(|s| s.first());
    let mut tmp_indent = config.start_visible_column % tab_size;

    for char_index in faux_indent_length..len {
        let ch = chars[char_index];

        if current_selection.is_some_and(|sel| sel.end_exclusive <= char_index) {
            selection_index += 1;
            current_selection = selections.and_then(|s| s.get(selection_index));
        }

        let mut is_in_whitespace = if char_index < first_non_ws || char_index > last_non_ws {
            true
        } else if ch == '\t' {
            true
        } else if ch == ' ' {
            if only_boundary {
                was_in_whitespace
                    || (char_index + 1 < len && matches!(chars.get(char_index + 1), Some(' ' | '\t')))
            } else {
                true
            }
        } else {
            false
        };

        if is_in_whitespace && selections.is_some() {
            is_in_whitespace = current_selection.is_some_and(|sel| sel.contains(char_index));
        }

        if is_in_whitespace && only_trailing {
            is_in_whitespace = line_is_blank || char_index > last_non_ws;
        }

        // Splitting a right-to-left run in the middle of the line would
        // change its bidi layout.
        if is_in_whitespace
            && current.contains_rtl
            && char_index >= first_non_ws
            && char_index <= last_non_ws
        {
            is_in_whitespace = false;
        }

        if was_in_whitespace {
            if !is_in_whitespace || (!monospace && tmp_indent >= tab_size) {
                push_whitespace(&mut result, char_index, faux_indent_length, per_character);
                tmp_indent %= tab_size;
            }
        } else if char_index == current.end_index || (is_in_whitespace && char_index > faux_indent_length) {
            result.push(VisualRun::new(
                char_index,
                current.class_name.as_str(),
                RunMetadata::empty(),
                current.contains_rtl,
            ));
            tmp_indent %= tab_size;
        }

        if ch == '\t' {
            tmp_indent = tab_size;
        } else {
            tmp_indent += char_columns(ch);
        }

        was_in_whitespace = is_in_whitespace;

        while char_index == current.end_index {
            run_index += 1;
            match runs.get(run_index) {
                Some(next) => current = next,
                None => break,
            }
        }
    }

    let generate_whitespace = was_in_whitespace
        && if config.continues_with_wrapped_line && only_boundary {
            // A single space before the wrap point is a word separator.
            let last = len.checked_sub(1).map(|i| chars[i]);
            let prev = len.checked_sub(2).map(|i| chars[i]);
            let is_single_trailing_space = last == Some(' ') && !matches!(prev, Some(' ' | '\t'));
            !is_single_trailing_space
        } else {
            true
        };

    if generate_whitespace {
        push_whitespace(&mut result, len, faux_indent_length, per_character);
    } else {
        result.push(VisualRun::new(
            len,
            current.class_name.as_str(),
            RunMetadata::empty(),
            current.contains_rtl,
        ));
    }
    result
}

fn join_classes(run_class: &str, decoration_class: &str) -> String {
    if run_class.is_empty() {
        decoration_class.to_string()
    } else {
        format!("{run_class} {decoration_class}")
    }
}

/// Merge normalized decoration segments into the run boundaries.
fn apply_inline_decorations(runs: &[VisualRun], decorations: &[InlineDecoration]) -> Vec<VisualRun> {
    let segments = normalize_decorations(decorations);
    let mut segment_index = 0;
    let mut result = Vec::with_capacity(runs.len() + segments.len() * 2);
    let mut last_end = 0;

    for run in runs {
        let run_end = run.end_index;
        while let Some(segment) = segments.get(segment_index) {
            if segment.start_offset >= run_end as isize {
                break;
            }
            let segment_start = segment.start_offset as usize;
            if segment_start > last_end {
                last_end = segment_start;
                result.push(run.ending_at(last_end));
            }

            let class_name = join_classes(&run.class_name, &segment.class_name);
            let metadata = run.metadata | segment.metadata;
            let segment_stop = (segment.end_offset + 1) as usize;
            if segment_stop <= run_end {
                last_end = segment_stop;
                result.push(VisualRun::new(last_end, class_name, metadata, run.contains_rtl));
                segment_index += 1;
            } else {
                // Continues into the next run.
                last_end = run_end;
                result.push(VisualRun::new(last_end, class_name, metadata, run.contains_rtl));
                break;
            }
        }

        // A line truncated to nothing still keeps its single empty run.
        if run_end > last_end || result.is_empty() {
            last_end = run_end;
            result.push(run.ending_at(run_end));
        }
    }

    let last_run_end = runs.last().map_or(0, |run| run.end_index) as isize;
    while let Some(segment) = segments.get(segment_index) {
        if segment.start_offset != last_run_end {
            break;
        }
        result.push(VisualRun::new(
            last_end,
            segment.class_name.as_str(),
            segment.metadata,
            false,
        ));
        segment_index += 1;
    }

    result
}

/// Split runs longer than [`LONG_RUN_LENGTH`].
///
/// With `only_at_spaces` the cut lands after the last space seen, so
/// ligatures and clusters stay whole; runs without spaces stay whole too.
fn split_large_runs(chars: &[char], runs: Vec<VisualRun>, only_at_spaces: bool) -> Vec<VisualRun> {
    let mut last_end = 0;
    let mut result = Vec::with_capacity(runs.len());

    for run in runs {
        let run_end = run.end_index;
        if only_at_spaces {
            if last_end + LONG_RUN_LENGTH < run_end {
                let mut last_space: Option<usize> = None;
                let mut piece_start = last_end;
                for (j, &ch) in chars.iter().enumerate().take(run_end).skip(last_end) {
                    if ch == ' ' {
                        last_space = Some(j);
                    }
                    if let Some(space) = last_space {
                        if j - piece_start >= LONG_RUN_LENGTH {
                            result.push(run.ending_at(space + 1));
                            piece_start = space + 1;
                            last_space = None;
                        }
                    }
                }
                if piece_start != run_end {
                    result.push(run);
                }
            } else {
                result.push(run);
            }
        } else {
            let diff = run_end.saturating_sub(last_end);
            if diff > LONG_RUN_LENGTH {
                let pieces = diff.div_ceil(LONG_RUN_LENGTH);
                for j in 1..pieces {
                    result.push(run.ending_at(last_end + j * LONG_RUN_LENGTH));
                }
            }
            result.push(run);
        }
        last_end = run_end;
    }

    result
}

/// Split leading spaces and tabs off a first run that holds right-to-left
/// text, so the whitespace keeps the line's base direction.
fn split_leading_whitespace_from_rtl(chars: &[char], mut runs: Vec<VisualRun>) -> Vec<VisualRun> {
    let Some(first) = runs.first() else {
        return runs;
    };
    if !first.contains_rtl {
        return runs;
    }

    let first_non_ws = chars[..first.end_index]
        .iter()
        .position(|&c| c != ' ' && c != '\t')
        .unwrap_or(0);
    if first_non_ws == 0 {
        return runs;
    }

    let mut leading = first.ending_at(first_non_ws);
    leading.contains_rtl = false;
    runs.insert(0, leading);
    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::decoration::InlineDecoration;

    fn ends_and_classes(runs: &[VisualRun]) -> Vec<(usize, String)> {
        runs.iter().map(|r| (r.end_index, r.class_name.clone())).collect()
    }

    fn pairs(expected: &[(usize, &str)]) -> Vec<(usize, String)> {
        expected.iter().map(|&(e, c)| (e, c.to_string())).collect()
    }

    #[test]
    fn plain_line_is_one_run() {
        let config = RenderLineConfig::new("hello", LineTokens::single(5, "t"));
        let resolved = resolve(&config);
        assert_eq!(ends_and_classes(&resolved.runs), pairs(&[(5, "t")]));
        assert!(!resolved.is_overflowing());
        assert!(resolved.foreign_elements.is_empty());
    }

    #[test]
    fn overflow_truncates_runs() {
        let config = RenderLineConfig::new("Hello, world!", LineTokens::from_ends([(5, "a"), (13, "b")]))
            .with_stop_rendering_line_after(Some(6));
        let resolved = resolve(&config);
        assert_eq!(resolved.len, 6);
        assert_eq!(resolved.overflowing_char_count, 7);
        assert_eq!(ends_and_classes(&resolved.runs), pairs(&[(5, "a"), (6, "b")]));
    }

    #[test]
    fn missing_tokens_are_padded_to_line_end() {
        let config = RenderLineConfig::new("abcdef", LineTokens::single(3, "t"));
        let resolved = resolve(&config);
        assert_eq!(ends_and_classes(&resolved.runs), pairs(&[(3, "t"), (6, "")]));

        let config = RenderLineConfig::new("abc", LineTokens::default());
        assert_eq!(ends_and_classes(&resolve(&config).runs), pairs(&[(3, "")]));
    }

    #[test]
    fn faux_indent_collapses_into_unstyled_run() {
        let config = RenderLineConfig::new("    code", LineTokens::from_ends([(2, "a"), (4, "b"), (8, "c")]))
            .with_faux_indent(4);
        let resolved = resolve(&config);
        assert_eq!(ends_and_classes(&resolved.runs), pairs(&[(4, ""), (8, "c")]));
    }

    #[test]
    fn control_characters_get_their_own_runs() {
        let config = RenderLineConfig::new("a\u{1}b", LineTokens::single(3, "t")).with_control_characters(true);
        let resolved = resolve(&config);
        assert_eq!(
            ends_and_classes(&resolved.runs),
            pairs(&[(1, "t"), (2, CONTROL_CLASS), (3, "t")])
        );
    }

    #[test]
    fn control_characters_ignored_for_basic_ascii() {
        let config = RenderLineConfig::new("a\u{1}b", LineTokens::single(3, "t"))
            .with_control_characters(true)
            .with_content_flags(true, false);
        assert_eq!(ends_and_classes(&resolve(&config).runs), pairs(&[(3, "t")]));
    }

    #[test]
    fn boundary_whitespace() {
        let config = RenderLineConfig::new("  x  y  ", LineTokens::single(8, "t"))
            .with_render_whitespace(RenderWhitespace::Boundary)
            .with_monospace(false);
        let resolved = resolve(&config);
        assert_eq!(
            ends_and_classes(&resolved.runs),
            pairs(&[(2, "ws"), (3, "t"), (4, "ws"), (5, "ws"), (6, "t"), (8, "ws")])
        );
        assert!(resolved.runs[0].is_whitespace());
        assert!(!resolved.runs[1].is_whitespace());
    }

    #[test]
    fn boundary_skips_single_spaces_between_words() {
        let config = RenderLineConfig::new("a b  c", LineTokens::single(6, "t"))
            .with_render_whitespace(RenderWhitespace::Boundary);
        assert_eq!(
            ends_and_classes(&resolve(&config).runs),
            pairs(&[(3, "t"), (5, "ws"), (6, "t")])
        );
    }

    #[test]
    fn trailing_mode_only_marks_trailing() {
        let config = RenderLineConfig::new("  a  ", LineTokens::single(5, "t"))
            .with_render_whitespace(RenderWhitespace::Trailing);
        assert_eq!(ends_and_classes(&resolve(&config).runs), pairs(&[(3, "t"), (5, "ws")]));
    }

    #[test]
    fn selection_mode_needs_selections() {
        let config = RenderLineConfig::new("a  b", LineTokens::single(4, "t"))
            .with_render_whitespace(RenderWhitespace::Selection);
        assert_eq!(ends_and_classes(&resolve(&config).runs), pairs(&[(4, "t")]));

        let config = config.with_selections(Some(vec![OffsetRange::new(2, 4)]));
        assert_eq!(
            ends_and_classes(&resolve(&config).runs),
            pairs(&[(2, "t"), (3, "ws"), (4, "t")])
        );
    }

    #[test]
    fn differing_glyph_width_emits_run_per_whitespace() {
        let config = RenderLineConfig::new("a   ", LineTokens::single(4, "t"))
            .with_render_whitespace(RenderWhitespace::All)
            .with_font_widths(10.0, 8.0, 9.0);
        assert_eq!(
            ends_and_classes(&resolve(&config).runs),
            pairs(&[(1, "t"), (2, "ws"), (3, "ws"), (4, "ws")])
        );
    }

    #[test]
    fn regular_decoration_overlays_run() {
        let config = RenderLineConfig::new("hello", LineTokens::single(5, "t"))
            .with_decorations(vec![InlineDecoration::regular(1, 3, "d")]);
        assert_eq!(
            ends_and_classes(&resolve(&config).runs),
            pairs(&[(1, "t"), (3, "t d"), (5, "t")])
        );
    }

    #[test]
    fn decoration_spanning_runs_is_split() {
        let config = RenderLineConfig::new("abcd", LineTokens::from_ends([(2, "a"), (4, "b")]))
            .with_decorations(vec![InlineDecoration::regular(1, 3, "d")]);
        assert_eq!(
            ends_and_classes(&resolve(&config).runs),
            pairs(&[(1, "a"), (2, "a d"), (3, "b d"), (4, "b")])
        );
    }

    #[test]
    fn before_and_after_anchors() {
        let config = RenderLineConfig::new("hello", LineTokens::single(5, "t")).with_decorations(vec![
            InlineDecoration::after(5, "a"),
            InlineDecoration::before(0, "b"),
        ]);
        let resolved = resolve(&config);
        assert_eq!(
            ends_and_classes(&resolved.runs),
            pairs(&[(0, "t b"), (5, "t"), (5, "a")])
        );
        assert_eq!(resolved.runs[0].metadata, RunMetadata::PSEUDO_BEFORE);
        assert!(resolved.runs[2].is_pseudo_after());
        assert_eq!(resolved.foreign_elements, ForeignElements::BEFORE | ForeignElements::AFTER);
    }

    #[test]
    fn anchors_sharing_an_offset_render_in_input_order() {
        let config = RenderLineConfig::new("hello", LineTokens::single(5, "t")).with_decorations(vec![
            InlineDecoration::after(5, "zeta"),
            InlineDecoration::after(5, "alpha"),
        ]);
        assert_eq!(
            ends_and_classes(&resolve(&config).runs),
            pairs(&[(5, "t"), (5, "zeta"), (5, "alpha")])
        );
    }

    #[test]
    fn line_truncated_to_nothing_keeps_a_run_under_decorations() {
        let config = RenderLineConfig::new("hello", LineTokens::single(5, "t"))
            .with_stop_rendering_line_after(Some(0))
            .with_decorations(vec![
                InlineDecoration::regular(1, 3, "d"),
                InlineDecoration::before(0, "b"),
            ]);
        let resolved = resolve(&config);
        assert_eq!(ends_and_classes(&resolved.runs), pairs(&[(0, "t"), (0, "b")]));
        assert!(resolved.is_overflowing());
    }

    #[test]
    fn letter_spacing_decoration_counts_as_foreign() {
        let config = RenderLineConfig::new("hello", LineTokens::single(5, "t")).with_decorations(vec![
            InlineDecoration::new(0, 2, "s", InlineDecorationKind::RegularAffectingLetterSpacing),
        ]);
        assert_eq!(resolve(&config).foreign_elements, ForeignElements::BEFORE);
    }

    #[test]
    fn long_run_split_at_fixed_stride() {
        let content = "a".repeat(101);
        let config = RenderLineConfig::new(content, LineTokens::single(101, "t"));
        let ends: Vec<_> = resolve(&config).runs.iter().map(|r| r.end_index).collect();
        assert_eq!(ends, [50, 100, 101]);
    }

    #[test]
    fn long_run_split_at_spaces_with_ligatures() {
        let content = format!("{} {} {}", "x".repeat(30), "y".repeat(30), "z".repeat(30));
        let config = RenderLineConfig::new(content, LineTokens::single(92, "t")).with_font_ligatures(true);
        let ends: Vec<_> = resolve(&config).runs.iter().map(|r| r.end_index).collect();
        assert_eq!(ends, [31, 62, 92]);
    }

    #[test]
    fn long_run_without_spaces_stays_whole_with_ligatures() {
        let content = "x".repeat(80);
        let config = RenderLineConfig::new(content, LineTokens::single(80, "t")).with_font_ligatures(true);
        let ends: Vec<_> = resolve(&config).runs.iter().map(|r| r.end_index).collect();
        assert_eq!(ends, [80]);
    }

    #[test]
    fn rtl_leading_whitespace_is_isolated() {
        let config = RenderLineConfig::new("  שלום", LineTokens::single(6, "t"));
        let resolved = resolve(&config);
        let shape: Vec<_> = resolved.runs.iter().map(|r| (r.end_index, r.contains_rtl)).collect();
        assert_eq!(shape, [(2, false), (6, true)]);
    }

    #[test]
    fn rtl_lines_are_never_split_by_length() {
        let content = "ש".repeat(120);
        let config = RenderLineConfig::new(content, LineTokens::single(120, "t"));
        assert_eq!(resolve(&config).runs.len(), 1);
    }

    #[test]
    fn empty_line_has_single_empty_run() {
        let config = RenderLineConfig::new("", LineTokens::default());
        let resolved = resolve(&config);
        assert_eq!(resolved.len, 0);
        assert_eq!(ends_and_classes(&resolved.runs), pairs(&[(0, "")]));
    }
}
