//! Line table and bingo evaluation.
//!
//! Lines are listed rows first (top to bottom), then columns (left to right),
//! then the main diagonal and the anti-diagonal. Cell indices inside each line
//! are increasing.

use serde::Serialize;

use crate::card::{BOARD_SIZE, FREE_SPACE_INDEX, TOTAL_CELLS};

pub type Line = [usize; BOARD_SIZE];

pub const LINE_COUNT: usize = 2 * BOARD_SIZE + 2;

/// All 12 winning patterns, computed at compile time.
pub const LINES: [Line; LINE_COUNT] = build_lines();

const fn build_lines() -> [Line; LINE_COUNT] {
    let mut lines = [[0; BOARD_SIZE]; LINE_COUNT];
    let mut i = 0;
    while i < BOARD_SIZE {
        let mut k = 0;
        while k < BOARD_SIZE {
            lines[i][k] = i * BOARD_SIZE + k;
            lines[BOARD_SIZE + i][k] = k * BOARD_SIZE + i;
            k += 1;
        }
        lines[2 * BOARD_SIZE][i] = i * BOARD_SIZE + i;
        lines[2 * BOARD_SIZE + 1][i] = (i + 1) * BOARD_SIZE - 1 - i;
        i += 1;
    }
    lines
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BingoStatus {
    pub has_bingo: bool,
    pub bingo_lines: Vec<Line>,
}

/// Every fully marked line. The free space always counts as marked.
pub fn evaluate(marked: &[bool; TOTAL_CELLS]) -> BingoStatus {
    let mut effective = *marked;
    effective[FREE_SPACE_INDEX] = true;

    let bingo_lines: Vec<Line> = LINES
        .iter()
        .filter(|line| line.iter().all(|&cell| effective[cell]))
        .copied()
        .collect();

    BingoStatus {
        has_bingo: !bingo_lines.is_empty(),
        bingo_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn marks(cells: &[usize]) -> [bool; TOTAL_CELLS] {
        let mut m = [false; TOTAL_CELLS];
        for &c in cells {
            m[c] = true;
        }
        m
    }

    #[test]
    fn test_line_table() {
        assert_eq!(LINES[0], [0, 1, 2, 3, 4]);
        assert_eq!(LINES[4], [20, 21, 22, 23, 24]);
        assert_eq!(LINES[5], [0, 5, 10, 15, 20]);
        assert_eq!(LINES[9], [4, 9, 14, 19, 24]);
        assert_eq!(LINES[10], [0, 6, 12, 18, 24]);
        assert_eq!(LINES[11], [4, 8, 12, 16, 20]);
    }

    #[test]
    fn test_empty_card_has_no_bingo() {
        let status = evaluate(&[false; TOTAL_CELLS]);
        assert!(!status.has_bingo);
        assert!(status.bingo_lines.is_empty());
    }

    #[test]
    fn test_top_row() {
        let status = evaluate(&marks(&[0, 1, 2, 3, 4]));
        assert!(status.has_bingo);
        assert_eq!(status.bingo_lines, vec![[0, 1, 2, 3, 4]]);
    }

    #[test]
    fn test_free_space_forced_even_if_unmarked() {
        // middle row without index 12
        let status = evaluate(&marks(&[10, 11, 13, 14]));
        assert_eq!(status.bingo_lines, vec![[10, 11, 12, 13, 14]]);
    }

    #[test]
    fn test_all_complete_lines_reported() {
        let status = evaluate(&marks(&[0, 6, 18, 24, 4, 8, 16, 20, 1, 2, 3]));
        assert_eq!(
            status.bingo_lines,
            vec![[0, 1, 2, 3, 4], [0, 6, 12, 18, 24], [4, 8, 12, 16, 20]]
        );
    }

    #[test]
    fn test_full_card_yields_every_line() {
        let status = evaluate(&[true; TOTAL_CELLS]);
        assert_eq!(status.bingo_lines.len(), LINE_COUNT);
        assert_eq!(status.bingo_lines, LINES.to_vec());
    }

    #[test]
    fn test_column() {
        let status = evaluate(&marks(&[2, 7, 17, 22]));
        assert_eq!(status.bingo_lines, vec![[2, 7, 12, 17, 22]]);
    }

    proptest! {
        #[test]
        fn evaluate_is_deterministic_and_consistent(bits in proptest::collection::vec(any::<bool>(), TOTAL_CELLS)) {
            let mut marked = [false; TOTAL_CELLS];
            marked.copy_from_slice(&bits);
            let first = evaluate(&marked);
            let second = evaluate(&marked);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.has_bingo, !first.bingo_lines.is_empty());

            let mut effective = marked;
            effective[FREE_SPACE_INDEX] = true;
            for line in LINES {
                let complete = line.iter().all(|&c| effective[c]);
                prop_assert_eq!(complete, first.bingo_lines.contains(&line));
            }
        }
    }
}
