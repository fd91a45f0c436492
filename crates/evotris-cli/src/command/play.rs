use std::path::PathBuf;

use anyhow::Context;
use evotris_bot::Bot;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

use crate::model::TrainedModel;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Trained model JSON file
    #[arg(long)]
    model: PathBuf,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    games: usize,
    /// RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let model = TrainedModel::open(&arg.model)?;
    let bot = Bot::new(
        model.board_height,
        model.board_width,
        model.weights.clone(),
        model.lookahead,
    )
    .context("Model is not playable")?;

    let mut rng = arg
        .seed
        .map_or_else(Pcg64Mcg::from_os_rng, Pcg64Mcg::seed_from_u64);
    let mut total = 0;
    for game in 0..arg.games {
        let pieces_placed = bot.play_game(&mut rng);
        total += pieces_placed;
        println!("Game {game}: {pieces_placed} pieces placed");
    }
    if arg.games > 1 {
        #[expect(clippy::cast_precision_loss)]
        let mean = total as f64 / arg.games as f64;
        println!("Mean: {mean:.2}");
    }

    Ok(())
}
