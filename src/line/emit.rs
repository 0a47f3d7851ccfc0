//! Walk resolved runs once, producing markup and the character mapping.

use tracing::trace;

use super::decoration::InlineDecorationKind;
use super::input::{RenderLineConfig, RenderWhitespace};
use super::mapping::CharacterMapping;
use super::markup::{LineMarkup, OverflowMarker, RenderedSpan};
use super::part::{ForeignElements, SIZED_WHITESPACE_CLASS, WHITESPACE_CLASS};
use super::resolve::{ResolvedRenderLine, resolve};
use crate::unicode::{char_columns, is_control_character};

const NBSP: char = '\u{A0}';
const ZWNJ: char = '\u{200C}';
const RIGHTWARDS_ARROW: char = '\u{2192}';
const HALFWIDTH_RIGHTWARDS_ARROW: char = '\u{FFEB}';
const REPLACEMENT: char = '\u{FFFD}';
/// First glyph of the Control Pictures block.
const CONTROL_PICTURES: u32 = 0x2400;
const DEL_PICTURE: char = '\u{2421}';

/// Result of rendering one line.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderLineOutput {
    pub markup: LineMarkup,
    pub character_mapping: CharacterMapping,
    pub foreign_elements: ForeignElements,
}

impl RenderLineOutput {
    #[must_use]
    pub fn contains_foreign_elements(&self) -> bool {
        !self.foreign_elements.is_empty()
    }
}

/// Render a line: resolve its runs, then emit them.
#[must_use]
pub fn render_view_line(config: &RenderLineConfig) -> RenderLineOutput {
    if config.line_content.is_empty() {
        return render_empty_line(config);
    }
    let output = emit(&resolve(config));
    trace!(
        runs = output.markup.spans.len(),
        columns = output.character_mapping.len(),
        foreign = output.foreign_elements.bits(),
        "rendered line"
    );
    output
}

/// An empty line still shows its before/after anchors and keeps a
/// one-column mapping for the end-of-line position.
fn render_empty_line(config: &RenderLineConfig) -> RenderLineOutput {
    let mut spans = Vec::new();
    let mut foreign_elements = ForeignElements::empty();
    let mut before_count = 0;

    for decoration in &config.line_decorations {
        match decoration.kind {
            InlineDecorationKind::Before => {
                foreign_elements |= ForeignElements::BEFORE;
                before_count += 1;
            }
            InlineDecorationKind::After => foreign_elements |= ForeignElements::AFTER,
            _ => continue,
        }
        spans.push(RenderedSpan::new(decoration.class_name.as_str(), ""));
    }

    if spans.is_empty() {
        let text = if config.render_new_line_when_empty { "\n" } else { "" };
        spans.push(RenderedSpan::new("", text));
    }

    let mut character_mapping = CharacterMapping::new(1);
    character_mapping.set_column_info(1, before_count, 0, 0);

    RenderLineOutput {
        markup: LineMarkup {
            spans,
            overflow: None,
        },
        character_mapping,
        foreign_elements,
    }
}

/// Glyphs for a character outside a whitespace run, with the number of
/// columns it occupies.
fn push_regular_char(
    text: &mut String,
    ch: char,
    tab_columns: usize,
    render_control_characters: bool,
) -> (usize, usize) {
    let mut produced = 1;
    let mut width = char_columns(ch);
    match ch {
        '\t' => {
            produced = tab_columns;
            width = produced;
            text.extend(std::iter::repeat_n(NBSP, produced));
        }
        ' ' => text.push(NBSP),
        '\0' => text.push(if render_control_characters {
            char::from_u32(CONTROL_PICTURES).unwrap_or(REPLACEMENT)
        } else {
            REPLACEMENT
        }),
        '\u{FEFF}' | '\u{2028}' | '\u{2029}' | '\u{85}' => text.push(REPLACEMENT),
        _ => {
            let code = ch as u32;
            if render_control_characters && code < 32 {
                text.push(char::from_u32(CONTROL_PICTURES + code).unwrap_or(REPLACEMENT));
            } else if render_control_characters && code == 127 {
                text.push(DEL_PICTURE);
            } else if render_control_characters && is_control_character(ch) {
                let escape = format!("[U+{code:04X}]");
                produced = escape.chars().count();
                width = produced;
                text.push_str(&escape);
            } else {
                text.push(ch);
            }
        }
    }
    (produced, width)
}

/// Emit the resolved runs.
#[must_use]
pub fn emit(resolved: &ResolvedRenderLine<'_>) -> RenderLineOutput {
    let config = resolved.config;
    let chars = &resolved.chars;
    let len = resolved.len;
    let runs = &resolved.runs;
    let tab_size = resolved.tab_size;
    let faux_indent_length = resolved.faux_indent_length;
    let foreign_elements = resolved.foreign_elements;
    let render_control_characters = config.render_control_characters;

    let mut character_mapping = CharacterMapping::new(len + 1);
    let mut last_mapping_defined = false;
    let mut char_index = 0;
    let mut visible_column = config.start_visible_column;
    let mut char_offset_in_run = 0;
    let mut horizontal_offset: u32 = 0;
    let mut run_displacement = 0;
    let mut spans = Vec::with_capacity(runs.len());

    for (run_index, run) in runs.iter().enumerate() {
        let run_end = run.end_index;
        let renders_whitespace = config.render_whitespace != RenderWhitespace::None && run.is_whitespace();
        let renders_whitespace_with_width = renders_whitespace
            && !config.use_monospace_optimizations
            && (run.class_name == WHITESPACE_CLASS || foreign_elements.is_empty());
        let is_empty_pseudo_after = char_index == run_end && run.is_pseudo_after();
        char_offset_in_run = 0;

        let mut span = RenderedSpan {
            class_name: if renders_whitespace_with_width {
                SIZED_WHITESPACE_CLASS.to_string()
            } else {
                run.class_name.clone()
            },
            text: String::new(),
            rtl: run.contains_rtl,
            width: None,
        };

        if renders_whitespace {
            if renders_whitespace_with_width {
                let mut run_columns = 0;
                let mut column = visible_column;
                for (i, &ch) in chars.iter().enumerate().take(run_end).skip(char_index) {
                    let char_width = if ch == '\t' { tab_size - column % tab_size } else { 1 };
                    run_columns += char_width;
                    if i >= faux_indent_length {
                        column += char_width;
                    }
                }
                span.width = Some(config.space_width * run_columns as f32);
            }

            while char_index < run_end {
                character_mapping.set_column_info(
                    char_index + 1,
                    run_index - run_displacement,
                    char_offset_in_run,
                    horizontal_offset,
                );
                run_displacement = 0;

                let (produced, char_width) = if chars[char_index] == '\t' {
                    let columns = tab_size - visible_column % tab_size;
                    if config.can_use_halfwidth_rightwards_arrow && columns == 1 {
                        span.text.push(HALFWIDTH_RIGHTWARDS_ARROW);
                    } else {
                        span.text.push(RIGHTWARDS_ARROW);
                    }
                    span.text.extend(std::iter::repeat_n(NBSP, columns - 1));
                    (columns, columns)
                } else {
                    span.text.push(config.render_space_char);
                    span.text.push(ZWNJ);
                    (2, 1)
                };

                char_offset_in_run += produced;
                horizontal_offset += char_width as u32;
                if char_index >= faux_indent_length {
                    visible_column += char_width;
                }
                char_index += 1;
            }
        } else {
            while char_index < run_end {
                character_mapping.set_column_info(
                    char_index + 1,
                    run_index - run_displacement,
                    char_offset_in_run,
                    horizontal_offset,
                );
                run_displacement = 0;

                let tab_columns = tab_size - visible_column % tab_size;
                let (produced, char_width) = push_regular_char(
                    &mut span.text,
                    chars[char_index],
                    tab_columns,
                    render_control_characters,
                );

                char_offset_in_run += produced;
                horizontal_offset += char_width as u32;
                if char_index >= faux_indent_length {
                    visible_column += char_width;
                }
                char_index += 1;
            }
        }

        // An empty pseudo-after run owns the next column's position.
        if is_empty_pseudo_after {
            run_displacement += 1;
        } else {
            run_displacement = 0;
        }

        if char_index >= len && !last_mapping_defined && run.is_pseudo_after() {
            last_mapping_defined = true;
            character_mapping.set_column_info(char_index + 1, run_index, char_offset_in_run, horizontal_offset);
        }

        spans.push(span);
    }

    if !last_mapping_defined {
        // End of line sits at the end of the last run, not the start of a next one.
        character_mapping.set_column_info(
            len + 1,
            runs.len() - 1,
            char_offset_in_run,
            horizontal_offset,
        );
    }

    let overflow = resolved
        .is_overflowing()
        .then(|| OverflowMarker::new(resolved.overflowing_char_count));

    RenderLineOutput {
        markup: LineMarkup { spans, overflow },
        character_mapping,
        foreign_elements,
    }
}
