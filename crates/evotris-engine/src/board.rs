use std::ops::RangeInclusive;

use derive_more::{Display, Error};

use crate::piece::PieceShape;

/// Rows above the visible field where a piece may not come to rest.
///
/// The buffer is as tall as the tallest piece, so collision scanning can
/// always start below it without indexing above the board.
pub const HIDDEN_ROWS: usize = 4;

/// Error indicating a board was constructed with a zero dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid board dimensions: {visible_height} x {width}")]
pub struct BoardDimensionError {
    /// Requested visible height.
    pub visible_height: usize,
    /// Requested width.
    pub width: usize,
}

/// The playing field.
///
/// Cells hold `0` when empty or the frozen piece's cell value (1-7). Rows are
/// indexed from the top; the first [`HIDDEN_ROWS`] rows are the hidden buffer
/// and the visible field starts at row `HIDDEN_ROWS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    visible_height: usize,
    width: usize,
    rows: Vec<Vec<u8>>,
}

impl Board {
    /// Creates an empty board with the given visible dimensions.
    pub fn new(visible_height: usize, width: usize) -> Result<Self, BoardDimensionError> {
        if visible_height == 0 || width == 0 {
            return Err(BoardDimensionError {
                visible_height,
                width,
            });
        }
        let rows = vec![vec![0; width]; visible_height + HIDDEN_ROWS];
        Ok(Self {
            visible_height,
            width,
            rows,
        })
    }

    /// Constructs a board from ASCII art of the visible field.
    ///
    /// `'#'` is a filled cell and `'.'` an empty one. The width is taken from
    /// the first line and every line must match it. Filled cells are stored
    /// with value `1`; the engine never distinguishes frozen piece kinds.
    ///
    /// # Panics
    ///
    /// Panics if the art is empty, ragged, or contains other characters.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().map(str::trim).filter(|s| !s.is_empty()).collect();
        let width = lines.first().map_or(0, |line| line.len());
        let mut board = Self::new(lines.len(), width).unwrap();
        for (visible_row, line) in lines.iter().enumerate() {
            assert_eq!(line.len(), width, "ragged board art");
            for (col, ch) in line.chars().enumerate() {
                board.rows[HIDDEN_ROWS + visible_row][col] = match ch {
                    '#' => 1,
                    '.' => 0,
                    _ => panic!("invalid board art character: {ch:?}"),
                };
            }
        }
        board
    }

    /// Height of the visible field in rows.
    #[must_use]
    pub fn visible_height(&self) -> usize {
        self.visible_height
    }

    /// Width of the field in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total height including the hidden buffer.
    #[must_use]
    pub fn total_height(&self) -> usize {
        self.rows.len()
    }

    /// Cell value at an absolute position (hidden buffer included).
    ///
    /// `row` must be below [`total_height`](Self::total_height) and `col`
    /// below [`width`](Self::width); out-of-range positions panic.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.rows[row][col]
    }

    /// Iterates over the visible rows, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.rows[HIDDEN_ROWS..].iter().map(Vec::as_slice)
    }

    /// Tests whether the shape overlaps a frozen cell with its bottom row at
    /// `row_offset` and its left edge at `col_offset`.
    ///
    /// Hard-drop semantics: per shape column only the lowest occupied cell is
    /// tested, since no cell above it can touch a frozen cell first.
    ///
    /// The caller must keep the shape on the board: `row_offset` at least
    /// `shape.height() - 1` and below [`total_height`](Self::total_height),
    /// and `col_offset + shape.width() <= width`. The drop scan satisfies
    /// this by construction since it starts below the hidden buffer, which
    /// is as tall as any piece.
    #[must_use]
    pub fn collides(&self, shape: &PieceShape, row_offset: usize, col_offset: usize) -> bool {
        debug_assert!(row_offset >= shape.height() - 1 && row_offset < self.rows.len());
        debug_assert!(col_offset + shape.width() <= self.width);
        for col in 0..shape.width() {
            for depth in 0..shape.height() {
                let piece_row = shape.height() - 1 - depth;
                if shape.cell(piece_row, col) > 0 {
                    if self.rows[row_offset - depth][col_offset + col] > 0 {
                        return true;
                    }
                    break;
                }
            }
        }
        false
    }

    /// Hard-drops the shape at `col_offset` and resolves line clears.
    ///
    /// The shape falls until its lowest cells touch a frozen cell or the
    /// floor. Returns `true` (game over) when any cell of the shape would
    /// freeze into the hidden buffer; the board is left untouched in that
    /// case. The caller must keep `col_offset + shape.width() <= width`.
    pub fn drop_piece(&mut self, shape: &PieceShape, col_offset: usize) -> bool {
        let rest_row = (HIDDEN_ROWS..self.rows.len())
            .find(|&row| self.collides(shape, row, col_offset))
            .map_or(self.rows.len() - 1, |row| row - 1);
        if (rest_row + 1).saturating_sub(shape.height()) < HIDDEN_ROWS {
            return true;
        }
        self.freeze(shape, rest_row, col_offset);
        self.clear_full_lines(rest_row - shape.height()..=rest_row);
        false
    }

    fn freeze(&mut self, shape: &PieceShape, row_offset: usize, col_offset: usize) {
        for piece_row in 0..shape.height() {
            let depth = shape.height() - 1 - piece_row;
            for col in 0..shape.width() {
                let cell = shape.cell(piece_row, col);
                if cell > 0 {
                    self.rows[row_offset - depth][col_offset + col] = cell;
                }
            }
        }
    }

    /// Removes every full row in `candidates` and reinserts that many empty
    /// rows at the top, keeping the dimensions fixed. Returns the number of
    /// rows cleared.
    ///
    /// Removal runs bottom-most first so a deletion only shifts rows above
    /// the ones still to be checked.
    pub fn clear_full_lines(&mut self, candidates: RangeInclusive<usize>) -> usize {
        let mut cleared = 0;
        for row in candidates.rev() {
            if self.is_line_full(row) {
                self.rows.remove(row);
                cleared += 1;
            }
        }
        for _ in 0..cleared {
            self.rows.insert(0, vec![0; self.width]);
        }
        cleared
    }

    /// Returns `true` when every cell of the row is occupied.
    #[must_use]
    pub fn is_line_full(&self, row: usize) -> bool {
        self.rows[row].iter().all(|&cell| cell > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::piece::PieceKind;

    use super::*;

    fn occupied_cells(board: &Board) -> usize {
        board
            .visible_rows()
            .map(|row| row.iter().filter(|&&c| c > 0).count())
            .sum()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(12, 6).unwrap();
        assert_eq!(board.visible_height(), 12);
        assert_eq!(board.width(), 6);
        assert_eq!(board.total_height(), 16);
        assert_eq!(occupied_cells(&board), 0);
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(Board::new(0, 6).is_err());
        assert!(Board::new(12, 0).is_err());
    }

    #[test]
    fn test_from_ascii() {
        let board = Board::from_ascii(
            "....
             #...
             ##.#",
        );
        assert_eq!(board.visible_height(), 3);
        assert_eq!(board.width(), 4);
        assert_eq!(board.cell(HIDDEN_ROWS + 1, 0), 1);
        assert_eq!(board.cell(HIDDEN_ROWS + 2, 3), 1);
        assert_eq!(board.cell(HIDDEN_ROWS, 0), 0);
        assert_eq!(occupied_cells(&board), 4);
    }

    #[test]
    fn test_drop_on_empty_board_rests_on_floor() {
        let mut board = Board::new(6, 4).unwrap();
        let shape = &PieceKind::O.shapes()[0];
        assert!(!board.drop_piece(shape, 1));
        let bottom = board.total_height() - 1;
        assert_eq!(board.cell(bottom, 1), PieceKind::O.cell_value());
        assert_eq!(board.cell(bottom, 2), PieceKind::O.cell_value());
        assert_eq!(board.cell(bottom - 1, 1), PieceKind::O.cell_value());
        assert_eq!(board.cell(bottom - 1, 2), PieceKind::O.cell_value());
        assert_eq!(occupied_cells(&board), 4);
    }

    #[test]
    fn test_dropped_pieces_stack() {
        let mut board = Board::new(6, 4).unwrap();
        let shape = &PieceKind::O.shapes()[0];
        assert!(!board.drop_piece(shape, 0));
        assert!(!board.drop_piece(shape, 0));
        let bottom = board.total_height() - 1;
        for row in (bottom - 3)..=bottom {
            assert_eq!(board.cell(row, 0), PieceKind::O.cell_value());
            assert_eq!(board.cell(row, 1), PieceKind::O.cell_value());
        }
        assert_eq!(occupied_cells(&board), 8);
    }

    #[test]
    fn test_collides_on_lowest_cell_per_column() {
        let board = Board::from_ascii(
            "...
             ...
             #..",
        );
        let shape = &PieceKind::S.shapes()[0]; // [[0,4,4],[4,4,0]]
        let bottom = board.total_height() - 1;
        assert!(board.collides(shape, bottom, 0));
        assert!(!board.collides(shape, bottom - 1, 0));
    }

    #[test]
    fn test_collides_at_minimum_row_offset() {
        // The smallest legal row offset puts the shape's top row at row 0.
        let board = Board::new(3, 4).unwrap();
        let shape = &PieceKind::O.shapes()[0];
        assert!(!board.collides(shape, shape.height() - 1, 0));
        assert!(!board.collides(shape, board.total_height() - 1, 2));
    }

    #[test]
    fn test_overhang_nests_over_occupied_cell() {
        // The S-piece's right column is occupied only in its top row, so a
        // frozen cell below the overhang must not register as a collision.
        let mut board = Board::from_ascii(
            "...
             ...
             ..#",
        );
        let shape = &PieceKind::S.shapes()[0];
        assert!(!board.drop_piece(shape, 0));
        let bottom = board.total_height() - 1;
        assert_eq!(board.cell(bottom, 0), PieceKind::S.cell_value());
        assert_eq!(board.cell(bottom, 1), PieceKind::S.cell_value());
        assert_eq!(board.cell(bottom - 1, 1), PieceKind::S.cell_value());
        assert_eq!(board.cell(bottom - 1, 2), PieceKind::S.cell_value());
        assert_eq!(board.cell(bottom, 2), 1);
        assert_eq!(occupied_cells(&board), 5);
    }

    #[test]
    fn test_drop_completing_a_row_clears_it() {
        let mut board = Board::from_ascii(
            "....
             ....
             ##..",
        );
        let shape = &PieceKind::O.shapes()[0];
        assert!(!board.drop_piece(shape, 2));
        // The full bottom row is cleared; the O-piece's upper row survives.
        let bottom = board.total_height() - 1;
        assert_eq!(occupied_cells(&board), 2);
        assert_eq!(board.cell(bottom, 2), PieceKind::O.cell_value());
        assert_eq!(board.cell(bottom, 3), PieceKind::O.cell_value());
        assert_eq!(board.total_height(), board.visible_height() + HIDDEN_ROWS);
    }

    #[test]
    fn test_row_with_gap_survives() {
        let mut board = Board::from_ascii(
            "....
             ....
             #.#.
             #.##",
        );
        let shape = &PieceKind::I.shapes()[0]; // vertical I
        assert!(!board.drop_piece(shape, 1));
        // The bottom row completes and clears; the row with a gap at the
        // right edge survives and settles on the floor.
        assert_eq!(occupied_cells(&board), 5);
        let bottom = board.total_height() - 1;
        assert_eq!(board.cell(bottom, 0), 1);
        assert_eq!(board.cell(bottom, 3), 0);
    }

    #[test]
    fn test_vertical_i_clears_single_gap_row() {
        let mut board = Board::from_ascii(
            "....
             ....
             ....
             #.##",
        );
        let shape = &PieceKind::I.shapes()[0];
        assert!(!board.drop_piece(shape, 1));
        assert_eq!(occupied_cells(&board), 3);
        let bottom = board.total_height() - 1;
        for row in (bottom - 2)..=bottom {
            assert_eq!(board.cell(row, 1), PieceKind::I.cell_value());
        }
    }

    #[test]
    fn test_multiple_lines_clear_at_once() {
        let mut board = Board::from_ascii(
            "....
             ....
             ##.#
             ##.#",
        );
        let shape = &PieceKind::I.shapes()[0];
        assert!(!board.drop_piece(shape, 2));
        // Both completed rows vanish; two I cells are left above them.
        assert_eq!(occupied_cells(&board), 2);
        let bottom = board.total_height() - 1;
        assert_eq!(board.cell(bottom, 2), PieceKind::I.cell_value());
        assert_eq!(board.cell(bottom - 1, 2), PieceKind::I.cell_value());
    }

    #[test]
    fn test_clear_preserves_rows_above() {
        let mut board = Board::from_ascii(
            "#...
             ####",
        );
        let bottom = board.total_height() - 1;
        assert_eq!(board.clear_full_lines(bottom - 1..=bottom), 1);
        assert_eq!(occupied_cells(&board), 1);
        assert_eq!(board.cell(bottom, 0), 1);
    }

    #[test]
    fn test_topping_out_returns_game_over_and_leaves_board_unchanged() {
        let mut board = Board::new(2, 4).unwrap();
        let shape = &PieceKind::O.shapes()[0];
        assert!(!board.drop_piece(shape, 0));
        let before = board.clone();
        // A second O in the same columns would freeze into the hidden rows.
        assert!(board.drop_piece(shape, 0));
        assert_eq!(board, before);
    }

    #[test]
    fn test_game_over_when_stack_reaches_hidden_rows() {
        let mut board = Board::new(4, 4).unwrap();
        let shape = &PieceKind::I.shapes()[0];
        assert!(!board.drop_piece(shape, 0));
        assert!(board.drop_piece(shape, 0));
    }
}
