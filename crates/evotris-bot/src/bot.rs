use derive_more::{Display, Error};
use evotris_engine::{Board, BoardDimensionError, PieceKind};
use rand::Rng;

use crate::features::{BoardFeatures, FEATURE_COUNT};

/// Error constructing a [`Bot`].
#[derive(Debug, Display, Error)]
pub enum BotError {
    /// The requested board dimensions are invalid.
    #[display("{_0}")]
    Board(BoardDimensionError),
    /// The genome does not have one weight per feature.
    #[display("genome has {actual} weights, expected {expected}")]
    GenomeLength {
        /// Required genome length.
        expected: usize,
        /// Provided genome length.
        actual: usize,
    },
}

/// A committed placement: the board after the drop and the score that made
/// the search pick it.
///
/// With lookahead enabled the score is the best follow-up score of the
/// preview piece, `-inf` when the preview piece cannot be placed at all.
#[derive(Debug, Clone)]
pub struct Move {
    /// Board state after the placement and its line clears.
    pub board: Board,
    /// Evaluation the search maximized.
    pub score: f64,
}

/// A Tetris player driven by a fixed weight genome.
#[derive(Debug, Clone)]
pub struct Bot {
    empty_board: Board,
    genome: Vec<f64>,
    lookahead: bool,
}

impl Bot {
    /// Creates a bot playing on `visible_height` x `width` boards.
    pub fn new(
        visible_height: usize,
        width: usize,
        genome: Vec<f64>,
        lookahead: bool,
    ) -> Result<Self, BotError> {
        let empty_board = Board::new(visible_height, width).map_err(BotError::Board)?;
        if genome.len() != FEATURE_COUNT {
            return Err(BotError::GenomeLength {
                expected: FEATURE_COUNT,
                actual: genome.len(),
            });
        }
        Ok(Self {
            empty_board,
            genome,
            lookahead,
        })
    }

    /// The weight genome.
    #[must_use]
    pub fn genome(&self) -> &[f64] {
        &self.genome
    }

    /// Whether the bot plays with a one-piece preview.
    #[must_use]
    pub fn lookahead(&self) -> bool {
        self.lookahead
    }

    fn score_board(&self, board: &Board) -> f64 {
        let features = BoardFeatures::extract(board).to_array();
        self.genome
            .iter()
            .zip(features)
            .map(|(weight, feature)| weight * feature)
            .sum()
    }

    /// Finds the highest-scoring placement of `kind` on `board`.
    ///
    /// Every rotation in catalog order and every column offset that keeps
    /// the piece inside the board is tried on a copy; placements that would
    /// top the game out are discarded. Ties keep the first candidate found.
    /// Returns `None` when every placement tops out.
    #[must_use]
    pub fn best_move(&self, board: &Board, kind: PieceKind) -> Option<Move> {
        let mut best: Option<Move> = None;
        for shape in kind.shapes() {
            if shape.width() > board.width() {
                continue;
            }
            for col_offset in 0..=board.width() - shape.width() {
                let mut candidate = board.clone();
                if candidate.drop_piece(shape, col_offset) {
                    continue;
                }
                let score = self.score_board(&candidate);
                if best.as_ref().is_none_or(|b| score > b.score) {
                    best = Some(Move {
                        board: candidate,
                        score,
                    });
                }
            }
        }
        best
    }

    /// Finds the placement of `current` that leaves the best follow-up for
    /// `next`.
    ///
    /// Each surviving placement of `current` is scored by the best score
    /// achievable when `next` is then placed optimally; a candidate on which
    /// `next` cannot be placed scores `-inf` but stays eligible. The
    /// simulated placement of `next` is discarded.
    #[must_use]
    pub fn best_move_with_lookahead(
        &self,
        board: &Board,
        current: PieceKind,
        next: PieceKind,
    ) -> Option<Move> {
        let mut best: Option<Move> = None;
        for shape in current.shapes() {
            if shape.width() > board.width() {
                continue;
            }
            for col_offset in 0..=board.width() - shape.width() {
                let mut candidate = board.clone();
                if candidate.drop_piece(shape, col_offset) {
                    continue;
                }
                let score = self
                    .best_move(&candidate, next)
                    .map_or(f64::NEG_INFINITY, |follow_up| follow_up.score);
                if best.as_ref().is_none_or(|b| score > b.score) {
                    best = Some(Move {
                        board: candidate,
                        score,
                    });
                }
            }
        }
        best
    }

    /// Plays one game from an empty board and returns the number of pieces
    /// successfully placed.
    ///
    /// Piece kinds are drawn uniformly and independently from `rng`. The
    /// game ends when the current piece has no surviving placement; that
    /// piece is not counted.
    pub fn play_game<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let mut board = self.empty_board.clone();
        let mut pieces_placed = 0;
        let mut current: PieceKind = rng.random();
        loop {
            let next: PieceKind = rng.random();
            let chosen = if self.lookahead {
                self.best_move_with_lookahead(&board, current, next)
            } else {
                self.best_move(&board, current)
            };
            let Some(chosen) = chosen else {
                return pieces_placed;
            };
            board = chosen.board;
            pieces_placed += 1;
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg64Mcg;

    use super::*;

    // Penalizes height and holes, rewards nothing. Enough signal for a bot
    // to survive a while on a small board.
    fn tidy_genome() -> Vec<f64> {
        vec![-1.0, -1.0, -1.0, -10.0, -1.0, 0.0, -1.0]
    }

    #[test]
    fn test_new_rejects_wrong_genome_length() {
        assert!(matches!(
            Bot::new(12, 6, vec![0.0; 3], false),
            Err(BotError::GenomeLength {
                expected: FEATURE_COUNT,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_new_rejects_zero_board() {
        assert!(matches!(
            Bot::new(0, 6, vec![0.0; FEATURE_COUNT], false),
            Err(BotError::Board(_))
        ));
    }

    #[test]
    fn test_best_move_prefers_flat_placement() {
        // With only max_height penalized, a horizontal I (height 1) must
        // beat every vertical I placement (height 4).
        let mut genome = vec![0.0; FEATURE_COUNT];
        genome[0] = -1.0;
        let bot = Bot::new(12, 6, genome, false).unwrap();
        let board = Board::new(12, 6).unwrap();
        let chosen = bot.best_move(&board, PieceKind::I).unwrap();
        let features = BoardFeatures::extract(&chosen.board);
        assert_eq!(features.max_height, 1);
        assert!((chosen.score - (-1.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_best_move_never_returns_topped_out_board() {
        let bot = Bot::new(2, 2, tidy_genome(), false).unwrap();
        let mut board = Board::new(2, 2).unwrap();
        // Fill the whole visible field.
        assert!(!board.drop_piece(&PieceKind::O.shapes()[0], 0));
        assert!(bot.best_move(&board, PieceKind::O).is_none());
    }

    #[test]
    fn test_ties_keep_first_candidate() {
        // All-zero weights score every placement 0.0; the first candidate
        // (first rotation, column 0) must win.
        let bot = Bot::new(12, 6, vec![0.0; FEATURE_COUNT], false).unwrap();
        let board = Board::new(12, 6).unwrap();
        let chosen = bot.best_move(&board, PieceKind::I).unwrap();
        let bottom = chosen.board.total_height() - 1;
        for row in (bottom - 3)..=bottom {
            assert_eq!(chosen.board.cell(row, 0), PieceKind::I.cell_value());
        }
    }

    #[test]
    fn test_lookahead_scores_by_follow_up() {
        let bot = Bot::new(12, 6, tidy_genome(), true).unwrap();
        let board = Board::new(12, 6).unwrap();
        let chosen = bot
            .best_move_with_lookahead(&board, PieceKind::O, PieceKind::O)
            .unwrap();
        // Exactly one piece is frozen on the returned board.
        let occupied: usize = chosen
            .board
            .visible_rows()
            .map(|row| row.iter().filter(|&&c| c > 0).count())
            .sum();
        assert_eq!(occupied, 4);
    }

    #[test]
    fn test_play_game_places_pieces_and_terminates() {
        let bot = Bot::new(8, 4, tidy_genome(), false).unwrap();
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let pieces_placed = bot.play_game(&mut rng);
        assert!(pieces_placed > 0);
    }

    #[test]
    fn test_play_game_is_reproducible() {
        let bot = Bot::new(8, 4, tidy_genome(), false).unwrap();
        let a = bot.play_game(&mut Pcg64Mcg::seed_from_u64(3));
        let b = bot.play_game(&mut Pcg64Mcg::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
