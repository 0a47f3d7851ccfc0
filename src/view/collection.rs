//! The window of rendered lines and its response to document edits.

use tracing::debug;

use super::line::RenderedLine;

/// Inclusive range of 1-based line numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineRange {
    pub from_line_number: usize,
    pub to_line_number: usize,
}

impl LineRange {
    #[must_use]
    pub const fn new(from_line_number: usize, to_line_number: usize) -> Self {
        Self {
            from_line_number,
            to_line_number,
        }
    }
}

/// A contiguous run of rendered lines starting at `start_line_number`.
///
/// `lines[i]` always shows line `start_line_number + i`.
pub struct RenderedLinesCollection<L> {
    create_line: Box<dyn FnMut() -> L>,
    lines: Vec<L>,
    start_line_number: usize,
}

impl<L: RenderedLine> RenderedLinesCollection<L> {
    /// An empty window; `create_line` builds fresh slots on demand.
    pub fn new(create_line: impl FnMut() -> L + 'static) -> Self {
        Self {
            create_line: Box::new(create_line),
            lines: Vec::new(),
            start_line_number: 1,
        }
    }

    pub(crate) fn create_line(&mut self) -> L {
        (self.create_line)()
    }

    pub(crate) fn line_factory(&mut self) -> &mut dyn FnMut() -> L {
        &mut *self.create_line
    }

    /// Empty the window, returning the lines it held.
    pub fn flush(&mut self) -> Vec<L> {
        self.start_line_number = 1;
        std::mem::take(&mut self.lines)
    }

    pub(crate) fn take(&mut self) -> (usize, Vec<L>) {
        (self.start_line_number, std::mem::take(&mut self.lines))
    }

    pub(crate) fn set(&mut self, start_line_number: usize, lines: Vec<L>) {
        self.start_line_number = start_line_number;
        self.lines = lines;
    }

    #[must_use]
    pub fn start_line_number(&self) -> usize {
        self.start_line_number
    }

    /// Last line in the window; `start_line_number() - 1` when empty.
    #[must_use]
    pub fn end_line_number(&self) -> usize {
        (self.start_line_number + self.lines.len()).saturating_sub(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn contains(&self, line_number: usize) -> bool {
        !self.lines.is_empty()
            && line_number >= self.start_line_number
            && line_number <= self.end_line_number()
    }

    #[must_use]
    pub fn get(&self, line_number: usize) -> Option<&L> {
        line_number
            .checked_sub(self.start_line_number)
            .and_then(|index| self.lines.get(index))
    }

    pub fn get_mut(&mut self, line_number: usize) -> Option<&mut L> {
        line_number
            .checked_sub(self.start_line_number)
            .and_then(|index| self.lines.get_mut(index))
    }

    /// The line showing `line_number`, which must be in the window.
    #[must_use]
    pub fn line(&self, line_number: usize) -> &L {
        assert!(
            self.contains(line_number),
            "line {line_number} outside rendered window {}..={}",
            self.start_line_number,
            self.end_line_number()
        );
        &self.lines[line_number - self.start_line_number]
    }

    /// Mutable access to the line showing `line_number`, which must be in the
    /// window.
    pub fn line_mut(&mut self, line_number: usize) -> &mut L {
        assert!(
            self.contains(line_number),
            "line {line_number} outside rendered window {}..={}",
            self.start_line_number,
            self.end_line_number()
        );
        let index = line_number - self.start_line_number;
        &mut self.lines[index]
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut L> {
        self.lines.iter_mut()
    }

    /// Mark lines `[from, from + count - 1]` dirty. Returns whether any
    /// rendered line was affected.
    pub fn on_lines_changed(&mut self, from_line_number: usize, count: usize) -> bool {
        if self.lines.is_empty() || count == 0 {
            return false;
        }
        let to_line_number = from_line_number + count - 1;
        let first = from_line_number.max(self.start_line_number);
        let last = to_line_number.min(self.end_line_number());
        if first > last {
            return false;
        }
        for line in &mut self.lines[first - self.start_line_number..=last - self.start_line_number] {
            line.on_content_changed();
        }
        true
    }

    /// Lines `[from, to]` were removed from the document. Returns the
    /// rendered lines that left the window.
    pub fn on_lines_deleted(&mut self, from_line_number: usize, to_line_number: usize) -> Vec<L> {
        if self.lines.is_empty() || to_line_number < from_line_number {
            return Vec::new();
        }
        let start = self.start_line_number;
        let end = self.end_line_number();
        let delete_count = to_line_number - from_line_number + 1;

        if to_line_number < start {
            self.start_line_number -= delete_count;
            return Vec::new();
        }
        if from_line_number > end {
            return Vec::new();
        }

        let first = from_line_number.max(start);
        let last = to_line_number.min(end);
        if from_line_number < start {
            self.start_line_number -= start - from_line_number;
        }

        let removed: Vec<L> = self
            .lines
            .drain(first - start..=last - start)
            .collect();
        debug!(
            from_line_number,
            to_line_number,
            removed = removed.len(),
            start_line_number = self.start_line_number,
            "lines deleted inside window"
        );
        removed
    }

    /// Lines `[from, to]` were inserted into the document. Returns the
    /// rendered lines pushed out of the window.
    pub fn on_lines_inserted(&mut self, from_line_number: usize, to_line_number: usize) -> Vec<L> {
        if self.lines.is_empty() || to_line_number < from_line_number {
            return Vec::new();
        }
        let insert_count = to_line_number - from_line_number + 1;
        let start = self.start_line_number;
        let end = self.end_line_number();

        if from_line_number <= start {
            self.start_line_number += insert_count;
            return Vec::new();
        }
        if from_line_number > end {
            return Vec::new();
        }

        let insert_index = from_line_number - start;
        if insert_count + from_line_number > end {
            // Every line from the insertion point on is pushed out.
            let removed: Vec<L> = self.lines.drain(insert_index..).collect();
            debug!(
                from_line_number,
                to_line_number,
                removed = removed.len(),
                "insert pushed window tail out"
            );
            return removed;
        }

        let evicted = self.lines.split_off(self.lines.len() - insert_count);
        let fresh: Vec<L> = (0..insert_count).map(|_| self.create_line()).collect();
        self.lines.splice(insert_index..insert_index, fresh);
        debug!(
            from_line_number,
            to_line_number,
            inserted = insert_count,
            evicted = evicted.len(),
            "lines inserted inside window"
        );
        evicted
    }

    /// Mark lines in `ranges` as having new tokens. Returns whether any
    /// rendered line was affected.
    pub fn on_tokens_changed(&mut self, ranges: &[LineRange]) -> bool {
        if self.lines.is_empty() {
            return false;
        }
        let start = self.start_line_number;
        let end = self.end_line_number();
        let mut notified = false;
        for range in ranges {
            if range.to_line_number < start || range.from_line_number > end {
                continue;
            }
            let from = range.from_line_number.max(start);
            let to = range.to_line_number.min(end);
            for line in &mut self.lines[from - start..=to - start] {
                line.on_tokens_changed();
                notified = true;
            }
        }
        notified
    }
}

impl<L> std::fmt::Debug for RenderedLinesCollection<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedLinesCollection")
            .field("start_line_number", &self.start_line_number)
            .field("len", &self.lines.len())
            .finish_non_exhaustive()
    }
}
