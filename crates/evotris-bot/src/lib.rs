//! Heuristic Tetris player.
//!
//! The bot reduces a board to a fixed vector of shape measurements
//! ([`BoardFeatures`]) and scores candidate placements by the dot product of
//! that vector with a weight genome. [`Bot::best_move`] exhaustively tries
//! every rotation and column of the current piece; the optional one-piece
//! lookahead re-scores each candidate by the best follow-up placement of the
//! preview piece.
//!
//! # Example
//!
//! ```
//! use evotris_bot::Bot;
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64Mcg;
//!
//! let genome = vec![-1.0, 0.0, 0.0, -5.0, 0.0, 0.0, 0.0];
//! let bot = Bot::new(12, 6, genome, false).unwrap();
//! let mut rng = Pcg64Mcg::seed_from_u64(42);
//! let pieces_placed = bot.play_game(&mut rng);
//! assert!(pieces_placed > 0);
//! ```

pub use self::{bot::*, features::*};

pub mod bot;
pub mod features;
