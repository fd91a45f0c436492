/// Per-generation statistics for progress reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSummary {
    /// Zero-based generation index.
    pub generation: usize,
    /// Mean fitness over the whole population.
    pub mean_score: f64,
    /// Fitness of the best individual.
    pub best_individual_mean: f64,
    /// Highest single-game score anywhere in the generation.
    pub best_single_game: usize,
}

impl GenerationSummary {
    /// Derives the statistics from a generation's raw per-playout scores.
    #[must_use]
    pub fn from_scores(generation: usize, scores: &[Vec<usize>]) -> Self {
        let fitnesses: Vec<f64> = scores.iter().map(|playouts| mean(playouts)).collect();
        let best_individual_mean = fitnesses.iter().copied().fold(0.0, f64::max);
        let best_single_game = scores.iter().flatten().copied().max().unwrap_or(0);
        Self {
            generation,
            mean_score: mean_f64(&fitnesses),
            best_individual_mean,
            best_single_game,
        }
    }
}

/// Arithmetic mean of playout scores; `0.0` for an empty slice.
#[must_use]
#[expect(clippy::cast_precision_loss)]
pub fn mean(scores: &[usize]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<usize>() as f64 / scores.len() as f64
}

#[expect(clippy::cast_precision_loss)]
fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1, 2, 3, 4]), 2.5);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_from_scores() {
        let scores = vec![vec![10, 20], vec![40, 60], vec![0, 0]];
        let summary = GenerationSummary::from_scores(3, &scores);
        assert_eq!(summary.generation, 3);
        assert_eq!(summary.mean_score, 130.0 / 6.0);
        assert_eq!(summary.best_individual_mean, 50.0);
        assert_eq!(summary.best_single_game, 60);
    }
}
