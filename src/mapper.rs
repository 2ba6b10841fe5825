//! Logical grid coordinates to WS2812 strip positions.
//!
//! The matrix is wired as a serpentine starting at the bottom-right corner:
//! even rows run left-to-right, odd rows right-to-left, and the whole index
//! space is reversed. The mapping is its own inverse.

use crate::config::{CELL_COUNT, GRID_SIZE};

/// Strip index for `(column, row)`. Both must be below [`GRID_SIZE`].
pub const fn physical_index(column: usize, row: usize) -> usize {
    let offset = if row % 2 == 0 {
        row * GRID_SIZE + column
    } else {
        row * GRID_SIZE + (GRID_SIZE - 1 - column)
    };
    CELL_COUNT - 1 - offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_and_row_examples() {
        assert_eq!(physical_index(0, 0), 24);
        assert_eq!(physical_index(4, 0), 20);
        assert_eq!(physical_index(0, 1), 15);
        assert_eq!(physical_index(4, 1), 19);
        assert_eq!(physical_index(0, 4), 4);
        assert_eq!(physical_index(4, 4), 0);
    }

    #[test]
    fn every_strip_position_is_hit_once() {
        let mut seen = [0u8; CELL_COUNT];
        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                seen[physical_index(column, row)] += 1;
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn matches_the_row_formulas() {
        for row in 0..GRID_SIZE {
            for column in 0..GRID_SIZE {
                let expected = if row % 2 == 0 {
                    24 - (row * 5 + column)
                } else {
                    24 - (row * 5 + (4 - column))
                };
                assert_eq!(physical_index(column, row), expected);
            }
        }
    }

    #[test]
    fn applying_twice_is_identity() {
        for linear in 0..CELL_COUNT {
            let (column, row) = (linear % GRID_SIZE, linear / GRID_SIZE);
            let mapped = physical_index(column, row);
            assert_eq!(physical_index(mapped % GRID_SIZE, mapped / GRID_SIZE), linear);
        }
    }
}
