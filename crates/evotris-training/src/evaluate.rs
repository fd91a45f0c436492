use std::thread;

use derive_more::{Display, Error};
use evotris_bot::{Bot, BotError};
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use crate::genome::Genome;

/// Playout parameters shared by every fitness evaluation of a run.
#[derive(Debug, Clone, Copy)]
pub struct PlayoutSettings {
    /// Visible board height.
    pub board_height: usize,
    /// Board width.
    pub board_width: usize,
    /// Games played per genome.
    pub games_per_fitness: usize,
    /// Whether bots play with a one-piece preview.
    pub lookahead: bool,
}

/// Error from evaluating a population.
#[derive(Debug, Display, Error)]
pub enum EvaluationError {
    /// A genome could not be turned into a bot.
    #[display("{_0}")]
    Bot(BotError),
    /// A worker thread panicked; the generation is abandoned.
    #[display("a fitness worker panicked")]
    WorkerPanicked,
}

/// Scores a population of genomes.
///
/// Implementations return one score list per genome, ordered by population
/// index. Results are re-associated by index, never by completion order, so
/// a parallel implementation is interchangeable with a sequential one.
pub trait PopulationEvaluator {
    /// Plays every genome's games and returns the raw per-playout scores.
    ///
    /// `seeds` holds one RNG seed per genome; `seeds[i]` fully determines
    /// genome `i`'s playouts.
    fn evaluate_population(
        &self,
        population: &[Genome],
        seeds: &[u64],
    ) -> Result<Vec<Vec<usize>>, EvaluationError>;
}

impl<T> PopulationEvaluator for Box<T>
where
    T: PopulationEvaluator + ?Sized,
{
    fn evaluate_population(
        &self,
        population: &[Genome],
        seeds: &[u64],
    ) -> Result<Vec<Vec<usize>>, EvaluationError> {
        (**self).evaluate_population(population, seeds)
    }
}

fn evaluate_genome(
    settings: PlayoutSettings,
    genome: &[f64],
    seed: u64,
) -> Result<Vec<usize>, EvaluationError> {
    let bot = Bot::new(
        settings.board_height,
        settings.board_width,
        genome.to_vec(),
        settings.lookahead,
    )
    .map_err(EvaluationError::Bot)?;
    let mut rng = Pcg64Mcg::seed_from_u64(seed);
    Ok((0..settings.games_per_fitness)
        .map(|_| bot.play_game(&mut rng))
        .collect())
}

/// Evaluates the population one genome at a time on the calling thread.
#[derive(Debug, Clone, Copy)]
pub struct SequentialEvaluator {
    settings: PlayoutSettings,
}

impl SequentialEvaluator {
    /// Creates a sequential evaluator.
    #[must_use]
    pub fn new(settings: PlayoutSettings) -> Self {
        Self { settings }
    }
}

impl PopulationEvaluator for SequentialEvaluator {
    fn evaluate_population(
        &self,
        population: &[Genome],
        seeds: &[u64],
    ) -> Result<Vec<Vec<usize>>, EvaluationError> {
        assert_eq!(population.len(), seeds.len());
        population
            .iter()
            .zip(seeds)
            .map(|(genome, &seed)| evaluate_genome(self.settings, genome, seed))
            .collect()
    }
}

/// Evaluates the population on a fixed-size pool of scoped worker threads.
///
/// The population is split into contiguous chunks, one per worker, which
/// keeps each score list associated with its population index without any
/// reordering step. Workers only read their genomes and seeds and return
/// score lists; they share no mutable state.
#[derive(Debug, Clone, Copy)]
pub struct ParallelEvaluator {
    settings: PlayoutSettings,
    workers: usize,
}

impl ParallelEvaluator {
    /// Creates a parallel evaluator with `workers` threads.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero.
    #[must_use]
    pub fn new(settings: PlayoutSettings, workers: usize) -> Self {
        assert!(workers > 0);
        Self { settings, workers }
    }
}

impl PopulationEvaluator for ParallelEvaluator {
    fn evaluate_population(
        &self,
        population: &[Genome],
        seeds: &[u64],
    ) -> Result<Vec<Vec<usize>>, EvaluationError> {
        assert_eq!(population.len(), seeds.len());
        if population.is_empty() {
            return Ok(Vec::new());
        }
        let chunk_size = population.len().div_ceil(self.workers);
        let settings = self.settings;
        let mut scores = Vec::with_capacity(population.len());
        thread::scope(|scope| {
            let handles: Vec<_> = population
                .chunks(chunk_size)
                .zip(seeds.chunks(chunk_size))
                .map(|(genomes, seeds)| {
                    scope.spawn(move || {
                        genomes
                            .iter()
                            .zip(seeds)
                            .map(|(genome, &seed)| evaluate_genome(settings, genome, seed))
                            .collect::<Result<Vec<_>, _>>()
                    })
                })
                .collect();
            for handle in handles {
                let chunk = handle
                    .join()
                    .map_err(|_| EvaluationError::WorkerPanicked)??;
                scores.extend(chunk);
            }
            Ok(())
        })?;
        Ok(scores)
    }
}
