use std::io::{self, Write};

use derive_more::{Display, Error};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{
    config::{ConfigError, EvolutionConfig},
    evaluate::{EvaluationError, PopulationEvaluator},
    genome::{Genome, mutate, random_genome, tournament_select, two_point_crossover},
    log::TrainingLog,
    summary::{GenerationSummary, mean},
};

/// The best genome seen so far and its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedGenome {
    /// The weight vector.
    pub genome: Genome,
    /// Mean pieces placed over its fitness games.
    pub fitness: f64,
}

/// Error from a training run.
#[derive(Debug, Display, Error)]
pub enum TrainError {
    /// The configuration failed validation.
    #[display("{_0}")]
    Config(ConfigError),
    /// A generation's fitness evaluation failed.
    #[display("{_0}")]
    Evaluation(EvaluationError),
    /// The training log could not be written.
    #[display("failed to write training log: {_0}")]
    Log(io::Error),
}

/// Drives the evolutionary loop.
///
/// The trainer owns the master RNG. Every randomized step (initial
/// population, playout seeds, selection, crossover, mutation) draws from it
/// in a fixed order, so a seeded run is fully reproducible regardless of the
/// evaluator used.
#[derive(Debug)]
pub struct Trainer<E> {
    config: EvolutionConfig,
    evaluator: E,
    rng: Pcg64Mcg,
    population: Vec<Genome>,
    fitnesses: Vec<f64>,
    generation: usize,
    best: Option<TrainedGenome>,
}

impl<E: PopulationEvaluator> Trainer<E> {
    /// Validates the configuration and draws the initial population.
    ///
    /// `seed` fixes the master RNG; `None` seeds it from OS entropy.
    pub fn new(config: EvolutionConfig, evaluator: E, seed: Option<u64>) -> Result<Self, TrainError> {
        config.validate().map_err(TrainError::Config)?;
        let mut rng = seed.map_or_else(Pcg64Mcg::from_os_rng, Pcg64Mcg::seed_from_u64);
        let population = (0..config.population_size)
            .map(|_| random_genome(&mut rng, config.init_weight_range.clone(), config.genome_len))
            .collect();
        Ok(Self {
            config,
            evaluator,
            rng,
            population,
            fitnesses: Vec::new(),
            generation: 0,
            best: None,
        })
    }

    /// The configuration the trainer was built with.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// The current population.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Fitnesses of the most recently evaluated generation.
    pub fn fitnesses(&self) -> &[f64] {
        &self.fitnesses
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The best individual seen so far, once a generation has run.
    pub fn best(&self) -> Option<&TrainedGenome> {
        self.best.as_ref()
    }

    /// Evaluates the current population and breeds the next one.
    ///
    /// One playout seed per genome is drawn from the master RNG before
    /// dispatch, so the fitness table does not depend on the evaluator's
    /// scheduling. The old population is only read during breeding and is
    /// replaced wholesale.
    pub fn run_generation<W: Write>(
        &mut self,
        log: &mut TrainingLog<W>,
    ) -> Result<GenerationSummary, TrainError> {
        log.begin_generation(self.generation).map_err(TrainError::Log)?;
        let seeds: Vec<u64> = (0..self.population.len())
            .map(|_| self.rng.random())
            .collect();
        let scores = self
            .evaluator
            .evaluate_population(&self.population, &seeds)
            .map_err(TrainError::Evaluation)?;
        self.fitnesses = scores.iter().map(|playouts| mean(playouts)).collect();
        for ((genome, playouts), &fitness) in
            self.population.iter().zip(&scores).zip(&self.fitnesses)
        {
            log.record_individual(genome, playouts).map_err(TrainError::Log)?;
            if self.best.as_ref().is_none_or(|b| fitness > b.fitness) {
                self.best = Some(TrainedGenome {
                    genome: genome.clone(),
                    fitness,
                });
            }
        }
        let summary = GenerationSummary::from_scores(self.generation, &scores);
        self.breed_next_population();
        self.generation += 1;
        Ok(summary)
    }

    /// Runs the configured number of generations.
    pub fn run<W: Write>(
        &mut self,
        log: &mut TrainingLog<W>,
    ) -> Result<Vec<GenerationSummary>, TrainError> {
        (0..self.config.generations)
            .map(|_| self.run_generation(log))
            .collect()
    }

    fn breed_next_population(&mut self) {
        let mut next = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size / 2 {
            let parent1 = tournament_select(&mut self.rng, &self.fitnesses, self.config.tournament_size);
            let parent2 = tournament_select(&mut self.rng, &self.fitnesses, self.config.tournament_size);
            let (mut child1, mut child2) = two_point_crossover(
                &mut self.rng,
                &self.population[parent1],
                &self.population[parent2],
                self.config.crossover_rate,
            );
            mutate(&mut self.rng, &mut child1, self.config.mutation_rate);
            mutate(&mut self.rng, &mut child2, self.config.mutation_rate);
            next.push(child1);
            next.push(child2);
        }
        self.population = next;
    }
}
