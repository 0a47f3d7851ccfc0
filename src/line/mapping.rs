//! Bidirectional map between line columns and positions in rendered runs.
//!
//! Columns are 1-based and include one sentinel column past the last
//! rendered character. A position is the index of a rendered run plus an
//! offset into the characters that run produced.

/// Position inside the rendered output of a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunPosition {
    pub run_index: usize,
    pub char_index: usize,
}

impl RunPosition {
    #[must_use]
    pub const fn new(run_index: usize, char_index: usize) -> Self {
        Self {
            run_index,
            char_index,
        }
    }
}

/// One row of [`CharacterMapping::inflate`]: run index, offset in run,
/// horizontal offset in columns.
pub type InflatedEntry = (usize, usize, u32);

/// Fixed-size column to run-position index with horizontal offsets.
///
/// Built once per render; entries are non-decreasing in position order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterMapping {
    positions: Vec<RunPosition>,
    horizontal_offsets: Vec<u32>,
}

impl CharacterMapping {
    /// A mapping with `length` columns, all at the origin.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self {
            positions: vec![RunPosition::default(); length],
            horizontal_offsets: vec![0; length],
        }
    }

    /// Number of columns, including the end-of-line sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub(crate) fn set_column_info(
        &mut self,
        column: usize,
        run_index: usize,
        char_index: usize,
        horizontal_offset: u32,
    ) {
        self.positions[column - 1] = RunPosition::new(run_index, char_index);
        self.horizontal_offsets[column - 1] = horizontal_offset;
    }

    /// Horizontal offset, in columns, of the start of `column`.
    ///
    /// Columns out of range are clamped.
    #[must_use]
    pub fn horizontal_offset(&self, column: usize) -> u32 {
        if self.horizontal_offsets.is_empty() {
            return 0;
        }
        let index = column.clamp(1, self.horizontal_offsets.len()) - 1;
        self.horizontal_offsets[index]
    }

    /// Rendered position of `column`. Columns out of range are clamped.
    #[must_use]
    pub fn position(&self, column: usize) -> RunPosition {
        if self.positions.is_empty() {
            return RunPosition::default();
        }
        let index = column.clamp(1, self.positions.len()) - 1;
        self.positions[index]
    }

    /// Column closest to `position`.
    ///
    /// `run_length` is the number of characters the run at
    /// `position.run_index` produced; it measures the distance to the next
    /// run when the position falls between two mapped entries. Equal
    /// distances resolve to the earlier column.
    #[must_use]
    pub fn column(&self, position: RunPosition, run_length: usize) -> usize {
        if self.positions.is_empty() {
            return 1;
        }

        let mut min = 0;
        let mut max = self.positions.len() - 1;
        while min + 1 < max {
            let mid = (min + max) / 2;
            match self.positions[mid].cmp(&position) {
                std::cmp::Ordering::Equal => return mid + 1,
                std::cmp::Ordering::Greater => max = mid,
                std::cmp::Ordering::Less => min = mid,
            }
        }

        if min == max {
            return min + 1;
        }

        let min_entry = self.positions[min];
        let max_entry = self.positions[max];
        if min_entry == position {
            return min + 1;
        }
        if max_entry == position {
            return max + 1;
        }

        let max_char_index = if min_entry.run_index == max_entry.run_index {
            max_entry.char_index
        } else {
            run_length
        };
        let min_distance = position.char_index as isize - min_entry.char_index as isize;
        let max_distance = max_char_index as isize - position.char_index as isize;
        if min_distance <= max_distance {
            min + 1
        } else {
            max + 1
        }
    }

    /// Every column as `(run index, offset in run, horizontal offset)`.
    #[must_use]
    pub fn inflate(&self) -> Vec<InflatedEntry> {
        self.positions
            .iter()
            .zip(&self.horizontal_offsets)
            .map(|(p, &h)| (p.run_index, p.char_index, h))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: &[InflatedEntry]) -> CharacterMapping {
        let mut m = CharacterMapping::new(entries.len());
        for (i, &(run, ch, h)) in entries.iter().enumerate() {
            m.set_column_info(i + 1, run, ch, h);
        }
        m
    }

    #[test]
    fn position_clamps_columns() {
        let m = mapping(&[(0, 0, 0), (0, 1, 1), (1, 0, 2)]);
        assert_eq!(m.position(0), RunPosition::new(0, 0));
        assert_eq!(m.position(2), RunPosition::new(0, 1));
        assert_eq!(m.position(99), RunPosition::new(1, 0));
        assert_eq!(m.horizontal_offset(99), 2);
    }

    #[test]
    fn empty_mapping_is_neutral() {
        let m = CharacterMapping::default();
        assert!(m.is_empty());
        assert_eq!(m.position(5), RunPosition::default());
        assert_eq!(m.column(RunPosition::new(3, 3), 0), 1);
        assert_eq!(m.horizontal_offset(1), 0);
    }

    #[test]
    fn exact_positions_find_their_column() {
        let m = mapping(&[(0, 0, 0), (0, 1, 1), (1, 0, 2), (1, 1, 3), (2, 0, 4)]);
        for column in 1..=m.len() {
            assert_eq!(m.column(m.position(column), 0), column);
        }
    }

    #[test]
    fn position_inside_tab_snaps_to_nearest_edge() {
        // "x\t" with tab size 4: the tab produces four characters.
        let m = mapping(&[(0, 0, 0), (0, 1, 1), (0, 4, 4)]);
        assert_eq!(m.column(RunPosition::new(0, 2), 4), 2);
        assert_eq!(m.column(RunPosition::new(0, 3), 4), 3);
    }

    #[test]
    fn equal_distance_prefers_earlier_column() {
        // "\t" with tab size 4.
        let m = mapping(&[(0, 0, 0), (0, 4, 4)]);
        assert_eq!(m.column(RunPosition::new(0, 2), 4), 1);
        assert_eq!(m.column(RunPosition::new(0, 3), 4), 2);
    }

    #[test]
    fn between_runs_uses_run_length() {
        let m = mapping(&[(0, 0, 0), (1, 0, 1), (1, 1, 2)]);
        // Past the end of run 0, which produced one character.
        assert_eq!(m.column(RunPosition::new(0, 1), 1), 2);
    }

    #[test]
    fn inflate_lists_every_column() {
        let entries = [(0, 0, 0), (0, 2, 1), (1, 0, 2)];
        assert_eq!(mapping(&entries).inflate(), entries.to_vec());
    }
}
