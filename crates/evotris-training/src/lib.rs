//! Evolutionary optimizer for Tetris bot genomes.
//!
//! A genome is a vector of feature weights for [`evotris_bot::Bot`]. The
//! [`Trainer`] evolves a population of genomes with tournament selection,
//! two-point crossover and multiplicative Gaussian mutation, scoring each
//! genome by the mean number of pieces placed over a fixed number of games.
//!
//! Fitness playouts are dispatched through a [`PopulationEvaluator`], either
//! in-process ([`SequentialEvaluator`]) or on a fixed-size thread pool
//! ([`ParallelEvaluator`]). Both produce identical fitness tables for the
//! same master seed: the trainer draws one playout seed per genome up front,
//! so results never depend on scheduling.

pub use self::{config::*, evaluate::*, genome::*, log::*, summary::*, trainer::*};

pub mod config;
pub mod evaluate;
pub mod genome;
pub mod log;
pub mod summary;
pub mod trainer;
