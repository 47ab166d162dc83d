use serde::{Deserialize, Serialize};

/// Fitness assigned to any selection that exceeds the capacity.
pub const INFEASIBLE_FITNESS: f64 = -1e9;

/// Default penalty factor. Kept as configuration only, the fitness formula
/// uses a hard cutoff instead.
pub const DEFAULT_PENALTY_FACTOR: f64 = 10.0;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: Option<String>,
    pub weight: u64,
    pub value: u64,
}

impl Item {
    pub fn new(weight: u64, value: u64) -> Self {
        Self {
            name: None,
            weight,
            value,
        }
    }

    pub fn named(name: impl Into<String>, weight: u64, value: u64) -> Self {
        Self {
            name: Some(name.into()),
            weight,
            value,
        }
    }

    /// Value per unit of weight. Weightless items rank as infinitely dense.
    pub fn ratio(&self) -> f64 {
        if self.weight > 0 {
            self.value as f64 / self.weight as f64
        } else {
            f64::INFINITY
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub fitness: f64,
    pub total_value: u64,
    pub total_weight: u64,
}

impl Evaluation {
    pub fn is_feasible(&self) -> bool {
        self.fitness > INFEASIBLE_FITNESS
    }
}

/// An immutable 0/1 knapsack instance. Item order is significant: the index
/// of an item is the gene position that includes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnapsackProblem {
    items: Vec<Item>,
    capacity: u64,
    penalty_factor: f64,
}

impl KnapsackProblem {
    pub fn new(items: Vec<Item>, capacity: u64) -> Self {
        Self::with_penalty_factor(items, capacity, DEFAULT_PENALTY_FACTOR)
    }

    pub fn with_penalty_factor(items: Vec<Item>, capacity: u64, penalty_factor: f64) -> Self {
        Self {
            items,
            capacity,
            penalty_factor,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn penalty_factor(&self) -> f64 {
        self.penalty_factor
    }

    /// Exact total weight of the items selected by `genes`. Summed in `u128`
    /// so any number of `u64` weights fits.
    pub fn total_weight(&self, genes: &[bool]) -> u128 {
        genes
            .iter()
            .zip(self.items.iter())
            .filter(|(gene, _)| **gene)
            .map(|(_, item)| u128::from(item.weight))
            .sum()
    }

    /// Scores a selection. Feasible selections score their total value,
    /// anything over capacity scores `INFEASIBLE_FITNESS`. Reported totals
    /// saturate at `u64::MAX`.
    pub fn evaluate(&self, genes: &[bool]) -> Evaluation {
        let mut total_weight: u128 = 0;
        let mut total_value: u128 = 0;

        for (&gene, item) in genes.iter().zip(self.items.iter()) {
            if gene {
                total_weight += u128::from(item.weight);
                total_value += u128::from(item.value);
            }
        }

        let fitness = if total_weight <= u128::from(self.capacity) {
            total_value as f64
        } else {
            INFEASIBLE_FITNESS
        };

        Evaluation {
            fitness,
            total_value: saturate(total_value),
            total_weight: saturate(total_weight),
        }
    }
}

fn saturate(total: u128) -> u64 {
    u64::try_from(total).unwrap_or(u64::MAX)
}
