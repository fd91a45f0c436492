use std::ops::RangeInclusive;

use rand::{Rng, seq::index::sample};
use rand_distr::{Distribution as _, Normal};

/// A weight vector, one gene per board feature.
pub type Genome = Vec<f64>;

/// Draws a genome of independent uniform integer weights, stored as `f64`.
pub fn random_genome<R: Rng + ?Sized>(
    rng: &mut R,
    range: RangeInclusive<i32>,
    len: usize,
) -> Genome {
    (0..len)
        .map(|_| f64::from(rng.random_range(range.clone())))
        .collect()
}

/// Two-point crossover.
///
/// With probability `crossover_rate`, picks two distinct interior cut points
/// `i < j` uniformly from `1..len - 1` and swaps the segment `[i, j)`
/// between the parents; otherwise the children are copies of the parents.
/// The end genes never move, so both parents must have at least 4 genes.
///
/// # Panics
///
/// Panics if the parents differ in length or are shorter than 4 genes.
pub fn two_point_crossover<R: Rng + ?Sized>(
    rng: &mut R,
    parent1: &[f64],
    parent2: &[f64],
    crossover_rate: f64,
) -> (Genome, Genome) {
    assert_eq!(parent1.len(), parent2.len());
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    if rng.random::<f64>() < crossover_rate {
        let picked = sample(rng, parent1.len() - 2, 2);
        let (a, b) = (picked.index(0) + 1, picked.index(1) + 1);
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        child1[i..j].copy_from_slice(&parent2[i..j]);
        child2[i..j].copy_from_slice(&parent1[i..j]);
    }
    (child1, child2)
}

/// Mutates each gene independently with probability `mutation_rate` by
/// multiplying it by a draw from `N(1.0, 0.5)`.
///
/// Multiplicative noise scales a gene relative to its magnitude and may flip
/// its sign; a zero gene stays zero.
pub fn mutate<R: Rng + ?Sized>(rng: &mut R, genome: &mut [f64], mutation_rate: f64) {
    let scale = Normal::new(1.0, 0.5).unwrap();
    for gene in genome {
        if rng.random::<f64>() < mutation_rate {
            *gene *= scale.sample(rng);
        }
    }
}

/// Tournament selection: draws `k` distinct population indices and returns
/// the index with the highest fitness. Ties keep the earliest-drawn index.
///
/// # Panics
///
/// Panics if `k` is zero or exceeds the population size.
pub fn tournament_select<R: Rng + ?Sized>(rng: &mut R, fitnesses: &[f64], k: usize) -> usize {
    let mut best: Option<usize> = None;
    for index in sample(rng, fitnesses.len(), k) {
        if best.is_none_or(|b| fitnesses[index] > fitnesses[b]) {
            best = Some(index);
        }
    }
    best.unwrap()
}
