use crate::problem::{Item, KnapsackProblem};
use rand::Rng;
use rand_distr::StandardNormal;

const MAX_WEIGHT: u64 = 30;
const VALUE_PER_WEIGHT: f64 = 1.5;
const VALUE_NOISE: f64 = 5.0;

/// Random items whose values loosely follow their weights.
pub fn random_items<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let weight = rng.gen_range(1..=MAX_WEIGHT);
            let noise: f64 = rng.sample(StandardNormal);
            let value = (weight as f64 * VALUE_PER_WEIGHT + noise * VALUE_NOISE)
                .round()
                .max(1.0) as u64;

            Item::named(format!("Item_{}", i + 1), weight, value)
        })
        .collect()
}

/// Random instance whose capacity fits roughly half of the total weight.
pub fn random_problem<R: Rng + ?Sized>(count: usize, rng: &mut R) -> KnapsackProblem {
    let items = random_items(count, rng);
    let total_weight: u64 = items.iter().map(|item| item.weight).sum();
    KnapsackProblem::new(items, (total_weight / 2).max(1))
}
