use std::{num::NonZeroUsize, ops::RangeInclusive, thread};

use derive_more::{Display, Error};
use evotris_bot::FEATURE_COUNT;

/// Parameters of an evolutionary run.
///
/// The defaults are the tuning the system was originally trained with:
/// 100 individuals over 40 generations, 5 games per fitness on a 12 x 6
/// board. Call [`validate`](Self::validate) before use; the trainer does so
/// on construction.
#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    /// Number of individuals per generation. Must be positive and even.
    pub population_size: usize,
    /// Number of generations to run.
    pub generations: usize,
    /// Per-gene mutation probability.
    pub mutation_rate: f64,
    /// Probability that a parent pair is crossed over.
    pub crossover_rate: f64,
    /// Participants per tournament, drawn without replacement.
    pub tournament_size: usize,
    /// Genes per genome. Must equal [`FEATURE_COUNT`].
    pub genome_len: usize,
    /// Inclusive integer bounds for initial-population weights.
    pub init_weight_range: RangeInclusive<i32>,
    /// Games played per fitness evaluation.
    pub games_per_fitness: usize,
    /// Visible board height for playouts.
    pub board_height: usize,
    /// Board width for playouts.
    pub board_width: usize,
    /// Whether bots play with a one-piece preview.
    pub lookahead: bool,
    /// Worker threads for parallel evaluation.
    pub workers: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 40,
            mutation_rate: 0.2,
            crossover_rate: 1.0,
            tournament_size: 3,
            genome_len: FEATURE_COUNT,
            init_weight_range: -100..=100,
            games_per_fitness: 5,
            board_height: 12,
            board_width: 6,
            lookahead: false,
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

/// Error indicating an invalid [`EvolutionConfig`].
#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ConfigError {
    /// Population size is zero or odd.
    #[display("population size must be positive and even, got {size}")]
    PopulationSize {
        /// Rejected size.
        size: usize,
    },
    /// Generation count is zero.
    #[display("generation count must be positive")]
    Generations,
    /// Mutation probability is outside `[0, 1]`.
    #[display("mutation rate must be within [0, 1], got {rate}")]
    MutationRate {
        /// Rejected rate.
        rate: f64,
    },
    /// Crossover probability is outside `[0, 1]`.
    #[display("crossover rate must be within [0, 1], got {rate}")]
    CrossoverRate {
        /// Rejected rate.
        rate: f64,
    },
    /// Tournament size is zero or exceeds the population.
    #[display("tournament size must be within 1..={population}, got {size}")]
    TournamentSize {
        /// Rejected size.
        size: usize,
        /// Configured population size.
        population: usize,
    },
    /// Genome length does not allow two interior crossover cut points.
    #[display("genome length must be at least 4, got {len}")]
    GenomeTooShort {
        /// Rejected length.
        len: usize,
    },
    /// Genome length does not match the feature vector.
    #[display("genome length must be {FEATURE_COUNT}, got {len}")]
    GenomeLength {
        /// Rejected length.
        len: usize,
    },
    /// Initial weight range is empty.
    #[display("initial weight range is empty: [{low}, {high}]")]
    InitWeightRange {
        /// Lower bound.
        low: i32,
        /// Upper bound.
        high: i32,
    },
    /// Games per fitness evaluation is zero.
    #[display("games per fitness must be positive")]
    GamesPerFitness,
    /// A board dimension is zero.
    #[display("board dimensions must be nonzero: {height} x {width}")]
    BoardDimensions {
        /// Rejected visible height.
        height: usize,
        /// Rejected width.
        width: usize,
    },
    /// Worker count is zero.
    #[display("worker count must be positive")]
    Workers,
}

impl EvolutionConfig {
    /// Checks every parameter, so no randomized operation can fail mid-run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 || self.population_size % 2 != 0 {
            return Err(ConfigError::PopulationSize {
                size: self.population_size,
            });
        }
        if self.generations == 0 {
            return Err(ConfigError::Generations);
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::MutationRate {
                rate: self.mutation_rate,
            });
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(ConfigError::CrossoverRate {
                rate: self.crossover_rate,
            });
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::TournamentSize {
                size: self.tournament_size,
                population: self.population_size,
            });
        }
        if self.genome_len < 4 {
            return Err(ConfigError::GenomeTooShort {
                len: self.genome_len,
            });
        }
        if self.genome_len != FEATURE_COUNT {
            return Err(ConfigError::GenomeLength {
                len: self.genome_len,
            });
        }
        if self.init_weight_range.is_empty() {
            return Err(ConfigError::InitWeightRange {
                low: *self.init_weight_range.start(),
                high: *self.init_weight_range.end(),
            });
        }
        if self.games_per_fitness == 0 {
            return Err(ConfigError::GamesPerFitness);
        }
        if self.board_height == 0 || self.board_width == 0 {
            return Err(ConfigError::BoardDimensions {
                height: self.board_height,
                width: self.board_width,
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::Workers);
        }
        Ok(())
    }
}
