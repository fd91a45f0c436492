use rand::{Rng, distr::StandardUniform, prelude::Distribution};

/// One rotation state of a tetromino.
///
/// The shape is a minimal bounding matrix: each cell is either `0` (empty)
/// or the owning piece's cell value (1-7). Shapes are static data owned by
/// the piece catalog for the process lifetime; they are never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    cells: &'static [&'static [u8]],
}

impl PieceShape {
    const fn new(cells: &'static [&'static [u8]]) -> Self {
        Self { cells }
    }

    /// Height of the bounding matrix in rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Width of the bounding matrix in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    /// Cell value at (row, col) within the bounding matrix; `0` is empty.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    /// Iterates over the shape's rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'static [u8]> {
        self.cells.iter().copied()
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        match rng.random_range(0..=6) {
            0 => PieceKind::I,
            1 => PieceKind::O,
            2 => PieceKind::T,
            3 => PieceKind::S,
            4 => PieceKind::Z,
            5 => PieceKind::J,
            _ => PieceKind::L,
        }
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in catalog order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// The value this piece freezes into board cells (1-7).
    #[must_use]
    pub const fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Returns the ordered list of geometrically distinct rotation states.
    ///
    /// Rotation counts are 2 for I/S/Z, 1 for O, and 4 for T/J/L; only
    /// distinct orientations are stored.
    #[must_use]
    pub fn shapes(self) -> &'static [PieceShape] {
        PIECE_SHAPES[self as usize]
    }
}

static PIECE_SHAPES: [&[PieceShape]; PieceKind::LEN] = [
    // I-piece
    &[
        PieceShape::new(&[&[1], &[1], &[1], &[1]]),
        PieceShape::new(&[&[1, 1, 1, 1]]),
    ],
    // O-piece
    &[PieceShape::new(&[&[2, 2], &[2, 2]])],
    // T-piece
    &[
        PieceShape::new(&[&[3, 3, 3], &[0, 3, 0]]),
        PieceShape::new(&[&[0, 3], &[3, 3], &[0, 3]]),
        PieceShape::new(&[&[0, 3, 0], &[3, 3, 3]]),
        PieceShape::new(&[&[3, 0], &[3, 3], &[3, 0]]),
    ],
    // S-piece
    &[
        PieceShape::new(&[&[0, 4, 4], &[4, 4, 0]]),
        PieceShape::new(&[&[4, 0], &[4, 4], &[0, 4]]),
    ],
    // Z-piece
    &[
        PieceShape::new(&[&[5, 5, 0], &[0, 5, 5]]),
        PieceShape::new(&[&[0, 5], &[5, 5], &[5, 0]]),
    ],
    // J-piece
    &[
        PieceShape::new(&[&[0, 6], &[0, 6], &[6, 6]]),
        PieceShape::new(&[&[6, 0, 0], &[6, 6, 6]]),
        PieceShape::new(&[&[6, 6], &[6, 0], &[6, 0]]),
        PieceShape::new(&[&[6, 6, 6], &[0, 0, 6]]),
    ],
    // L-piece
    &[
        PieceShape::new(&[&[7, 0], &[7, 0], &[7, 7]]),
        PieceShape::new(&[&[7, 7, 7], &[7, 0, 0]]),
        PieceShape::new(&[&[7, 7], &[0, 7], &[0, 7]]),
        PieceShape::new(&[&[0, 0, 7], &[7, 7, 7]]),
    ],
];
