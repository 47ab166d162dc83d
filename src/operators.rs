use crate::individual::Individual;
use rand::Rng;

/// Probabilistic single-point crossover.
///
/// A uniform draw is taken first; when it is not below `rate`, or the
/// parents are shorter than two genes, the children are plain copies of the
/// parents. Otherwise a cut point is drawn from `1..len` and the tails are
/// swapped. The boolean reports whether a cut happened.
pub fn single_point_crossover<R: Rng + ?Sized>(
    parent_1: &Individual,
    parent_2: &Individual,
    rate: f64,
    rng: &mut R,
) -> (Individual, Individual, bool) {
    let draw: f64 = rng.gen();
    let len = parent_1.len();

    if draw >= rate || len < 2 {
        return (parent_1.clone(), parent_2.clone(), false);
    }

    let point = rng.gen_range(1..len);

    let mut genes_1 = Vec::with_capacity(len);
    let mut genes_2 = Vec::with_capacity(len);

    genes_1.extend_from_slice(&parent_1.genes()[..point]);
    genes_2.extend_from_slice(&parent_2.genes()[..point]);
    genes_1.extend_from_slice(&parent_2.genes()[point..]);
    genes_2.extend_from_slice(&parent_1.genes()[point..]);

    (Individual::from(genes_1), Individual::from(genes_2), true)
}

/// Independent bit-flip mutation. Returns the number of flipped genes.
pub fn bit_flip_mutation<R: Rng + ?Sized>(
    individual: &mut Individual,
    rate: f64,
    rng: &mut R,
) -> usize {
    let mut flips = 0;
    for gene in individual.genes_mut() {
        if rng.gen::<f64>() < rate {
            *gene = !*gene;
            flips += 1;
        }
    }
    flips
}
