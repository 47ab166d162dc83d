use crate::config::KnapsackConfig;
use crate::error::GaError;
use crate::genetic_optimizer::solve;
use crate::problem::KnapsackProblem;
use crate::termination::StopReason;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::iter::Sum;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunResult {
    pub run: usize,
    pub seed: u64,
    pub total_value: u64,
    pub total_weight: u64,
    pub generations: usize,
    pub runtime: f64,
    pub reason: StopReason,
}

#[derive(Clone, Debug, Serialize)]
pub struct BatchSummary {
    pub runs: Vec<RunResult>,
    pub best_value: u64,
    pub mean_value: f64,
    pub var_value: f64,
    pub mean_runtime: f64,
    pub var_runtime: f64,
    pub mean_generations: f64,
    pub var_generations: f64,
}

pub fn mean_variance<T: Copy + Into<f64> + Sum<T>>(values: &[T]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }

    let n = values.len() as f64;
    let sum: f64 = values.iter().map(|&v| v.into()).sum();
    let mean = sum / n;

    let variance = values
        .iter()
        .map(|&v| {
            let diff = v.into() - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    (mean, variance)
}

/// Runs `runs` independent engines in parallel. Run `i` is seeded with
/// `base_seed + i`, so a batch is reproducible regardless of scheduling.
pub fn run_batch(
    problem: &KnapsackProblem,
    config: &KnapsackConfig,
    runs: usize,
    base_seed: u64,
) -> Result<BatchSummary, GaError> {
    config.validate()?;

    let results = (0..runs)
        .into_par_iter()
        .map(|run| {
            let seed = base_seed.wrapping_add(run as u64);
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = solve(problem, config, &mut rng)?;

            Ok(RunResult {
                run,
                seed,
                total_value: outcome.total_value(),
                total_weight: outcome.total_weight(),
                generations: outcome.generations,
                runtime: outcome.elapsed.as_secs_f64(),
                reason: outcome.reason,
            })
        })
        .collect::<Result<Vec<_>, GaError>>()?;

    let values: Vec<f64> = results.iter().map(|r| r.total_value as f64).collect();
    let runtimes: Vec<f64> = results.iter().map(|r| r.runtime).collect();
    let generations: Vec<f64> = results.iter().map(|r| r.generations as f64).collect();

    let (mean_value, var_value) = mean_variance(&values);
    let (mean_runtime, var_runtime) = mean_variance(&runtimes);
    let (mean_generations, var_generations) = mean_variance(&generations);

    Ok(BatchSummary {
        best_value: results.iter().map(|r| r.total_value).max().unwrap_or(0),
        runs: results,
        mean_value,
        var_value,
        mean_runtime,
        var_runtime,
        mean_generations,
        var_generations,
    })
}
