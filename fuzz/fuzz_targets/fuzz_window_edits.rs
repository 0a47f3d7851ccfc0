//! Fuzz target for the rendered-line window.
//!
//! Replays arbitrary scrolls and line edits against a view and checks that
//! the target holds exactly one node per rendered visible line.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use viewline::view::{LineRange, MemoryTarget, RenderedLine, ViewLineOptions, ViewLines, ViewportData};

#[derive(Arbitrary, Debug)]
enum Step {
    Render { start: u8, count: u8 },
    Delete { from: u8, count: u8 },
    Insert { from: u8, count: u8 },
    Change { from: u8, count: u8 },
    Tokens { from: u8, count: u8 },
    Flush,
}

fuzz_target!(|steps: Vec<Step>| {
    let mut doc: Vec<String> = (1..=64).map(|i| format!("line {i}\twith  text")).collect();
    let mut view = ViewLines::new(ViewLineOptions::default(), MemoryTarget::new());

    for step in steps.into_iter().take(64) {
        match step {
            Step::Render { start, count } => {
                let start = usize::from(start).max(1);
                let end = start + usize::from(count % 40);
                view.render_lines(&ViewportData::new(&doc, start, end, 19.0));
            }
            Step::Delete { from, count } => {
                let from = usize::from(from).max(1);
                let to = from + usize::from(count % 8);
                if to <= doc.len() {
                    doc.drain(from - 1..to);
                    view.on_lines_deleted(from, to);
                }
            }
            Step::Insert { from, count } => {
                let from = usize::from(from).max(1);
                let to = from + usize::from(count % 8);
                if from <= doc.len() + 1 {
                    for n in from..=to {
                        doc.insert(n - 1, format!("new {n}"));
                    }
                    view.on_lines_inserted(from, to);
                }
            }
            Step::Change { from, count } => {
                let from = usize::from(from).max(1);
                view.on_lines_changed(from, usize::from(count % 8) + 1);
            }
            Step::Tokens { from, count } => {
                let from = usize::from(from).max(1);
                view.on_tokens_changed(&[LineRange::new(from, from + usize::from(count % 8))]);
            }
            Step::Flush => {
                view.on_flushed();
            }
        }

        let lines = view.visible_lines();
        let attached = if lines.lines().is_empty() {
            0
        } else {
            (lines.start_line_number()..=lines.end_line_number())
                .filter(|&n| view.line(n).is_some_and(|l| l.node().is_some()))
                .count()
        };
        assert_eq!(view.target().len(), attached);
    }
});
