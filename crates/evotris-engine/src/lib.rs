//! Deterministic Tetris simulation engine.
//!
//! This crate provides the two leaf components every other part of the system
//! builds on:
//!
//! - [`PieceKind`] / [`PieceShape`] - the static catalog of the 7 tetrominoes
//!   and their geometrically distinct rotation states
//! - [`Board`] - the playing field with hard-drop physics: collision testing,
//!   freezing a piece in place, and line clearing
//!
//! # Board Layout
//!
//! A board is `visible_height + 4` rows by `width` columns, row 0 at the top.
//! The 4 extra rows at the top are a hidden buffer: a piece that would freeze
//! any cell into them tops the game out before the visible field can be
//! corrupted. The hidden rows are never rendered and never contain frozen
//! cells of a live game.
//!
//! # Example
//!
//! ```
//! use evotris_engine::{Board, PieceKind};
//!
//! let mut board = Board::new(12, 6).unwrap();
//! let shape = &PieceKind::I.shapes()[1]; // horizontal I
//! let game_over = board.drop_piece(shape, 0);
//! assert!(!game_over);
//! ```

pub use self::{board::*, piece::*};

pub mod board;
pub mod piece;
