//! Fuzz target for single-line rendering.
//!
//! Renders arbitrary content with arbitrary tokens, decorations and options
//! and checks that the character mapping covers every rendered column.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use viewline::line::{
    InlineDecoration, LineTokens, OffsetRange, RenderLineConfig, RenderWhitespace, TextDirection,
    render_view_line,
};

#[derive(Arbitrary, Debug)]
struct Input {
    content: String,
    token_ends: Vec<u8>,
    decorations: Vec<(u8, u8, u8)>,
    selections: Option<Vec<(u8, u8)>>,
    whitespace: u8,
    tab_size: u8,
    start_visible_column: u8,
    stop_after: Option<u8>,
    monospace: bool,
    ligatures: bool,
    control_characters: bool,
    rtl: bool,
}

fuzz_target!(|input: Input| {
    let len = input.content.chars().count();

    // Tokens must be increasing and end at the line end.
    let mut ends: Vec<usize> = input
        .token_ends
        .iter()
        .map(|&e| usize::from(e))
        .filter(|&e| e > 0 && e < len)
        .collect();
    ends.sort_unstable();
    ends.dedup();
    ends.push(len);
    let tokens = LineTokens::from_ends(ends.into_iter().map(|e| (e, "tok")));

    let decorations = input
        .decorations
        .iter()
        .map(|&(start, end, kind)| {
            let (start, end) = (usize::from(start), usize::from(end));
            match kind % 3 {
                0 => InlineDecoration::regular(start, end, "deco"),
                1 => InlineDecoration::before(start, "before"),
                _ => InlineDecoration::after(start, "after"),
            }
        })
        .collect();

    let whitespace = match input.whitespace % 5 {
        0 => RenderWhitespace::None,
        1 => RenderWhitespace::Boundary,
        2 => RenderWhitespace::Selection,
        3 => RenderWhitespace::Trailing,
        _ => RenderWhitespace::All,
    };
    let selections = input.selections.map(|ranges| {
        ranges
            .into_iter()
            .map(|(a, b)| OffsetRange::new(usize::from(a.min(b)), usize::from(a.max(b))))
            .collect()
    });

    let config = RenderLineConfig::new(input.content.clone(), tokens)
        .with_decorations(decorations)
        .with_render_whitespace(whitespace)
        .with_selections(selections)
        .with_tab_size(usize::from(input.tab_size))
        .with_start_visible_column(usize::from(input.start_visible_column))
        .with_stop_rendering_line_after(input.stop_after.map(usize::from))
        .with_monospace(input.monospace)
        .with_font_ligatures(input.ligatures)
        .with_control_characters(input.control_characters)
        .with_text_direction(if input.rtl { TextDirection::Rtl } else { TextDirection::Ltr });

    let output = render_view_line(&config);
    let mapping = &output.character_mapping;
    assert!(!mapping.is_empty());
    // An empty line with only before-anchors places its end position just
    // past the last span.
    for column in 1..=mapping.len() {
        let position = mapping.position(column);
        assert!(position.run_index <= output.markup.spans.len());
    }
    if !input.content.is_empty() {
        let rendered = input.stop_after.map_or(len, |stop| len.min(usize::from(stop)));
        assert_eq!(mapping.len(), rendered + 1);
    }
});
