//! 0/1 knapsack solver built on a generational genetic algorithm.
//!
//! The engine evolves fixed-length bit vectors (one gene per item) with
//! tournament selection, single-point crossover, bit-flip mutation, greedy
//! ratio-based repair and optional elitism. A run stops on a generation
//! budget, a wall-clock budget, or once the best value has been stable for a
//! number of generations.
//!
//! ```
//! use knapsack_ga::{solve, Item, KnapsackConfig, KnapsackProblem};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let problem = KnapsackProblem::new(vec![Item::new(2, 3), Item::new(3, 4)], 4);
//! let mut rng = StdRng::seed_from_u64(7);
//! let outcome = solve(&problem, &KnapsackConfig::default(), &mut rng).unwrap();
//! assert!(outcome.total_weight() <= 4);
//! ```

pub mod batch;
pub mod config;
pub mod demo_data;
pub mod error;
pub mod genetic_algorithm;
pub mod genetic_optimizer;
pub mod history;
pub mod individual;
pub mod interactive;
pub mod loader;
pub mod operators;
pub mod printing;
pub mod problem;
pub mod prompt;
pub mod repair;
pub mod selection;
pub mod termination;
pub mod visualization;

pub use config::KnapsackConfig;
pub use error::{GaError, LoadError};
pub use genetic_algorithm::{Optimizer, Outcome, StoppingCriterion};
pub use genetic_optimizer::{solve, solve_with, GeneticOptimizer, KnapsackAlgorithm};
pub use history::{GenerationRecord, History};
pub use individual::Individual;
pub use problem::{Evaluation, Item, KnapsackProblem};
pub use termination::{StopReason, TerminationPolicy};
