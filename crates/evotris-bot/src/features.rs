use evotris_engine::Board;

/// Number of board measurements, and therefore the required genome length.
pub const FEATURE_COUNT: usize = 7;

/// Shape measurements of a board's visible field.
///
/// Column height is counted from the floor to the highest occupied cell;
/// empty columns have height 0. The hidden buffer never contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    /// Height of the tallest column.
    pub max_height: u32,
    /// Sum of all column heights.
    pub cumulative_height: u32,
    /// Difference between the tallest and the shortest column.
    pub relative_height: u32,
    /// Empty cells with at least one occupied cell above them in the same
    /// column.
    pub holes: u32,
    /// Sum of absolute height differences between adjacent columns.
    pub roughness: u32,
    /// Longest vertical run of well cells in a single column.
    pub max_well: u32,
    /// Total number of well cells on the board.
    pub cumulative_well: u32,
}

impl BoardFeatures {
    /// Measures the visible field of `board`.
    #[must_use]
    pub fn extract(board: &Board) -> Self {
        let width = board.width();
        let visible_height = board.visible_height();

        let mut heights = vec![0_u32; width];
        let mut holes = 0;
        for col in 0..width {
            let mut top_found = false;
            for (depth_from_top, row) in board.visible_rows().enumerate() {
                if row[col] > 0 {
                    if !top_found {
                        top_found = true;
                        heights[col] = u32::try_from(visible_height - depth_from_top).unwrap();
                    }
                } else if top_found {
                    holes += 1;
                }
            }
        }

        let max_height = heights.iter().copied().max().unwrap_or(0);
        let min_height = heights.iter().copied().min().unwrap_or(0);
        let cumulative_height = heights.iter().sum();
        let roughness = heights
            .windows(2)
            .map(|pair| pair[0].abs_diff(pair[1]))
            .sum();

        // A well cell is an empty cell whose horizontal neighbors are both
        // occupied, treating the board edges as occupied.
        let mut cumulative_well = 0;
        let mut max_well = 0;
        for col in 0..width {
            let mut run = 0_u32;
            for row in board.visible_rows() {
                let flanked_left = col == 0 || row[col - 1] > 0;
                let flanked_right = col == width - 1 || row[col + 1] > 0;
                if row[col] == 0 && flanked_left && flanked_right {
                    run += 1;
                    cumulative_well += 1;
                    max_well = max_well.max(run);
                } else {
                    run = 0;
                }
            }
        }

        Self {
            max_height,
            cumulative_height,
            relative_height: max_height - min_height,
            holes,
            roughness,
            max_well,
            cumulative_well,
        }
    }

    /// The measurements in genome order.
    #[must_use]
    pub fn to_array(self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.max_height),
            f64::from(self.cumulative_height),
            f64::from(self.relative_height),
            f64::from(self.holes),
            f64::from(self.roughness),
            f64::from(self.max_well),
            f64::from(self.cumulative_well),
        ]
    }
}

#[cfg(test)]
mod tests {
    use evotris_engine::PieceKind;

    use super::*;

    #[test]
    fn test_flat_board_has_zero_features() {
        let board = Board::new(12, 6).unwrap();
        assert_eq!(BoardFeatures::extract(&board), BoardFeatures::default());
    }

    #[test]
    fn test_single_column() {
        let board = Board::from_ascii(
            "..
             #.
             #.
             #.",
        );
        let features = BoardFeatures::extract(&board);
        assert_eq!(
            features,
            BoardFeatures {
                max_height: 3,
                cumulative_height: 3,
                relative_height: 3,
                holes: 0,
                roughness: 3,
                max_well: 3,
                cumulative_well: 3,
            }
        );
    }

    #[test]
    fn test_holes_under_overhang() {
        let board = Board::from_ascii(
            "....
             ##..
             .#..
             ##..",
        );
        let features = BoardFeatures::extract(&board);
        assert_eq!(features.holes, 1);
        assert_eq!(features.max_height, 3);
        assert_eq!(features.cumulative_height, 6);
        assert_eq!(features.relative_height, 3);
        assert_eq!(features.roughness, 3);
    }

    #[test]
    fn test_interior_well_between_columns() {
        let board = Board::from_ascii(
            "#.#
             #.#
             ###",
        );
        let features = BoardFeatures::extract(&board);
        // Two well cells sit between the flanking columns; the run stops at
        // the filled row below them.
        assert_eq!(features.cumulative_well, 2);
        assert_eq!(features.max_well, 2);
        assert_eq!(features.holes, 0);
    }

    #[test]
    fn test_drop_then_extract() {
        let mut board = Board::new(8, 4).unwrap();
        let shape = &PieceKind::O.shapes()[0];
        assert!(!board.drop_piece(shape, 0));
        let features = BoardFeatures::extract(&board);
        assert_eq!(
            features,
            BoardFeatures {
                max_height: 2,
                cumulative_height: 4,
                relative_height: 2,
                holes: 0,
                roughness: 2,
                max_well: 0,
                cumulative_well: 0,
            }
        );
    }

    #[test]
    fn test_to_array_order() {
        let features = BoardFeatures {
            max_height: 1,
            cumulative_height: 2,
            relative_height: 3,
            holes: 4,
            roughness: 5,
            max_well: 6,
            cumulative_well: 7,
        };
        assert_eq!(features.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }
}
