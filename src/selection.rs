use rand::Rng;

/// k-way tournament over precomputed fitness values.
///
/// Draws `size` candidates uniformly with replacement and returns the index
/// of the fittest. A challenger only replaces the current winner when it is
/// strictly fitter, so ties keep the earlier draw. `size` is treated as at
/// least 1. `fitnesses` must not be empty.
pub fn tournament_index<R: Rng + ?Sized>(fitnesses: &[f64], size: usize, rng: &mut R) -> usize {
    debug_assert!(!fitnesses.is_empty(), "tournament over an empty population");

    let mut best = rng.gen_range(0..fitnesses.len());
    for _ in 1..size {
        let challenger = rng.gen_range(0..fitnesses.len());
        if fitnesses[challenger] > fitnesses[best] {
            best = challenger;
        }
    }

    best
}

/// Same as [`tournament_index`], returning the winning individual.
pub fn tournament_pick<'a, T, R: Rng + ?Sized>(
    population: &'a [T],
    fitnesses: &[f64],
    size: usize,
    rng: &mut R,
) -> &'a T {
    debug_assert_eq!(population.len(), fitnesses.len());
    &population[tournament_index(fitnesses, size, rng)]
}
