//! End-to-end runs of the engine on small problems with known answers.

use knapsack_ga::demo_data::random_problem;
use knapsack_ga::{solve, Item, KnapsackConfig, KnapsackProblem, StopReason};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn classic_problem() -> KnapsackProblem {
    KnapsackProblem::new(
        vec![
            Item::new(2, 3),
            Item::new(3, 4),
            Item::new(4, 5),
            Item::new(5, 6),
            Item::new(9, 10),
        ],
        10,
    )
}

fn brute_force(problem: &KnapsackProblem) -> u64 {
    let n = problem.len();
    (0u32..1 << n)
        .map(|mask| {
            let genes: Vec<bool> = (0..n).map(|i| mask & (1 << i) != 0).collect();
            problem.evaluate(&genes)
        })
        .filter(|evaluation| evaluation.is_feasible())
        .map(|evaluation| evaluation.total_value)
        .max()
        .unwrap_or(0)
}

#[test]
fn test_classic_problem_reaches_optimum() {
    let problem = classic_problem();
    assert_eq!(brute_force(&problem), 13);

    let config = KnapsackConfig {
        population_size: 30,
        generations: 50,
        ..Default::default()
    };

    let values: Vec<u64> = (0..5)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = solve(&problem, &config, &mut rng).unwrap();
            assert!(outcome.total_weight() <= 10);
            outcome.total_value()
        })
        .collect();

    assert!(values.iter().all(|&value| value <= 13));
    assert!(values.contains(&13), "no run found the optimum: {:?}", values);
}

#[test]
fn test_classic_problem_with_default_parameters() {
    let problem = classic_problem();
    let config = KnapsackConfig::default();
    assert!(config.population_size >= 100 && config.generations >= 200);

    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let outcome = solve(&problem, &config, &mut rng).unwrap();

        assert_eq!(outcome.total_value(), 13, "seed {}", seed);
        assert!(outcome.total_weight() <= 10);
        assert_eq!(outcome.generations, 200);
    }
}

#[test]
fn test_random_problems_stay_feasible_and_near_optimal() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..5 {
        let problem = random_problem(12, &mut rng);
        let optimum = brute_force(&problem);

        let config = KnapsackConfig {
            population_size: 60,
            generations: 120,
            ..Default::default()
        };
        let outcome = solve(&problem, &config, &mut rng).unwrap();

        assert!(outcome.evaluation.is_feasible());
        assert!(outcome.total_value() <= optimum);
        assert!(outcome.total_value() * 10 >= optimum * 8);
    }
}

#[test]
fn test_stability_mode_on_flat_landscape() {
    let problem = KnapsackProblem::new((0..6).map(|_| Item::new(1, 0)).collect(), 3);
    let config = KnapsackConfig {
        population_size: 10,
        generations: 10_000,
        stable_limit: Some(4),
        ..Default::default()
    };

    let mut rng = StdRng::seed_from_u64(5);
    let outcome = solve(&problem, &config, &mut rng).unwrap();

    assert_eq!(outcome.reason, StopReason::StabilityLimitReached);
    assert_eq!(outcome.generations, 5);
    assert_eq!(outcome.total_value(), 0);
}

#[test]
fn test_zero_time_budget_runs_no_generation() {
    let problem = classic_problem();
    let config = KnapsackConfig {
        max_time: Some(0.0),
        stable_limit: Some(10),
        ..Default::default()
    };

    let mut rng = StdRng::seed_from_u64(3);
    let outcome = solve(&problem, &config, &mut rng).unwrap();

    assert_eq!(outcome.reason, StopReason::TimeBudgetExhausted);
    assert_eq!(outcome.generations, 0);
    assert!(outcome.best.is_zeroed());
    assert_eq!(outcome.evaluation, problem.evaluate(outcome.best.genes()));
}

#[test]
fn test_same_seed_same_result() {
    let problem = random_problem(25, &mut StdRng::seed_from_u64(11));
    let config = KnapsackConfig {
        population_size: 40,
        generations: 60,
        record_history: true,
        ..Default::default()
    };

    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        solve(&problem, &config, &mut rng).unwrap()
    };
    let first = run(77);
    let second = run(77);

    assert_eq!(first.best, second.best);
    assert_eq!(first.evaluation, second.evaluation);
    assert_eq!(first.generations, second.generations);

    let strip = |outcome: &knapsack_ga::Outcome<knapsack_ga::Individual>| {
        outcome
            .history
            .as_ref()
            .unwrap()
            .records()
            .iter()
            .map(|r| (r.gen, r.best_value, r.best_weight, r.mutations, r.crossovers))
            .collect::<Vec<_>>()
    };
    assert_eq!(strip(&first), strip(&second));
}

#[test]
fn test_history_best_fitness_never_decreases() {
    let problem = random_problem(30, &mut StdRng::seed_from_u64(8));
    let config = KnapsackConfig {
        population_size: 30,
        generations: 80,
        mutation_rate: 0.05,
        record_history: true,
        ..Default::default()
    };

    let mut rng = StdRng::seed_from_u64(8);
    let outcome = solve(&problem, &config, &mut rng).unwrap();
    let history = outcome.history.unwrap();

    assert_eq!(history.len(), 80);
    for pair in history.records().windows(2) {
        assert!(pair[1].best_fitness >= pair[0].best_fitness);
        assert!(pair[1].best_weight <= problem.capacity());
    }
    for (index, record) in history.records().iter().enumerate() {
        assert_eq!(record.gen, index);
        assert!(record.avg_fitness <= record.best_fitness);
    }
}

#[test]
fn test_weights_near_u64_max_stay_feasible() {
    let problem = KnapsackProblem::new(
        vec![
            Item::new(u64::MAX, 1),
            Item::new(u64::MAX, 1),
            Item::new(4, 7),
            Item::new(5, 2),
        ],
        10,
    );

    let mut rng = StdRng::seed_from_u64(6);
    let outcome = solve(&problem, &KnapsackConfig::default(), &mut rng).unwrap();

    assert!(outcome.evaluation.is_feasible());
    assert_eq!(outcome.total_value(), 9);
    assert_eq!(outcome.total_weight(), 9);
}

#[test]
fn test_best_has_one_gene_per_item() {
    let problem = random_problem(17, &mut StdRng::seed_from_u64(4));
    let config = KnapsackConfig {
        population_size: 7,
        generations: 5,
        tournament_size: 50,
        crossover_rate: 1.0,
        mutation_rate: 1.0,
        ..Default::default()
    };

    let mut rng = StdRng::seed_from_u64(4);
    let outcome = solve(&problem, &config, &mut rng).unwrap();

    assert_eq!(outcome.best.len(), 17);
    assert!(outcome.evaluation.is_feasible());
}
