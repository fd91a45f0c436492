use std::{fs, fs::File, io::BufWriter, path::PathBuf};

use anyhow::Context;
use chrono::Utc;
use evotris_training::{
    EvolutionConfig, ParallelEvaluator, PlayoutSettings, PopulationEvaluator, SequentialEvaluator,
    Trainer, TrainingLog,
};

use crate::model::TrainedModel;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of individuals per generation
    #[arg(long, default_value_t = 100)]
    population: usize,
    /// Number of generations
    #[arg(long, default_value_t = 40)]
    generations: usize,
    /// Per-gene mutation probability
    #[arg(long, default_value_t = 0.2)]
    mutation_rate: f64,
    /// Probability that a parent pair is crossed over
    #[arg(long, default_value_t = 1.0)]
    crossover_rate: f64,
    /// Participants per tournament selection
    #[arg(long, default_value_t = 3)]
    tournament: usize,
    /// Lower bound for initial weights
    #[arg(long, default_value_t = -100)]
    init_low: i32,
    /// Upper bound for initial weights
    #[arg(long, default_value_t = 100)]
    init_high: i32,
    /// Games played per fitness evaluation
    #[arg(long, default_value_t = 5)]
    games: usize,
    /// Visible board height
    #[arg(long, default_value_t = 12)]
    board_height: usize,
    /// Board width
    #[arg(long, default_value_t = 6)]
    board_width: usize,
    /// Play with a one-piece preview
    #[arg(long)]
    lookahead: bool,
    /// Evaluate fitnesses on the calling thread instead of a worker pool
    #[arg(long)]
    sequential: bool,
    /// Worker threads for parallel evaluation (defaults to all cores)
    #[arg(long)]
    workers: Option<usize>,
    /// Master RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Training log path
    #[arg(long)]
    log: Option<PathBuf>,
    /// Output file path for the trained model
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let mut config = EvolutionConfig {
        population_size: arg.population,
        generations: arg.generations,
        mutation_rate: arg.mutation_rate,
        crossover_rate: arg.crossover_rate,
        tournament_size: arg.tournament,
        init_weight_range: arg.init_low..=arg.init_high,
        games_per_fitness: arg.games,
        board_height: arg.board_height,
        board_width: arg.board_width,
        lookahead: arg.lookahead,
        ..EvolutionConfig::default()
    };
    if let Some(workers) = arg.workers {
        config.workers = workers;
    }
    config.validate().context("Invalid training configuration")?;

    let settings = PlayoutSettings {
        board_height: config.board_height,
        board_width: config.board_width,
        games_per_fitness: config.games_per_fitness,
        lookahead: config.lookahead,
    };
    let evaluator: Box<dyn PopulationEvaluator> = if arg.sequential {
        Box::new(SequentialEvaluator::new(settings))
    } else {
        Box::new(ParallelEvaluator::new(settings, config.workers))
    };

    let log_path = arg.log.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "logs/run-{}.log",
            Utc::now().format("%Y%m%d-%H%M%S")
        ))
    });
    if let Some(parent) = log_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let log_file = File::create(&log_path)
        .with_context(|| format!("Failed to create log file: {}", log_path.display()))?;
    let mut log = TrainingLog::new(BufWriter::new(log_file));

    let board_height = config.board_height;
    let board_width = config.board_width;
    let lookahead = config.lookahead;
    let generations = config.generations;

    let mut trainer = Trainer::new(config, evaluator, arg.seed)?;
    for _ in 0..generations {
        let summary = trainer.run_generation(&mut log)?;
        eprintln!(
            "Generation #{}: mean {:.2}, best individual {:.2}, best single game {}",
            summary.generation,
            summary.mean_score,
            summary.best_individual_mean,
            summary.best_single_game
        );
    }
    log.flush().context("Failed to flush training log")?;

    let best = trainer.best().context("No generations were run")?;
    eprintln!("Training completed.");

    let model = TrainedModel {
        trained_at: Utc::now(),
        board_height,
        board_width,
        lookahead,
        final_fitness: best.fitness,
        weights: best.genome.clone(),
    };
    model.save(arg.output.as_deref())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {:.3}", model.final_fitness);
    eprintln!("  Log: {}", log_path.display());

    Ok(())
}
