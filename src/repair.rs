use crate::individual::Individual;
use crate::problem::KnapsackProblem;

/// Greedy feasibility repair.
///
/// While the selection is over capacity, drop the included item with the
/// lowest value/weight ratio (first one wins on ties). Weightless items have
/// an infinite ratio and are only dropped once nothing else is left. Removed
/// items are never reconsidered.
pub fn repair(problem: &KnapsackProblem, individual: &mut Individual) {
    let items = problem.items();
    let mut total_weight = problem.total_weight(individual.genes());

    let capacity = u128::from(problem.capacity());

    while total_weight > capacity {
        let mut worst: Option<(usize, f64)> = None;
        for index in individual.selected() {
            let ratio = items[index].ratio();
            match worst {
                Some((_, worst_ratio)) if ratio >= worst_ratio => {}
                _ => worst = Some((index, ratio)),
            }
        }

        let Some((index, _)) = worst else {
            break;
        };

        individual.genes_mut()[index] = false;
        total_weight -= u128::from(items[index].weight);
    }
}
