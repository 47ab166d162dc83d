use crate::history::History;
use crate::problem::Evaluation;
use crate::termination::StopReason;
use rand::RngCore;
use std::fmt::Debug;
use std::time::Duration;

// This trait represents a chromosome - a single candidate solution to
// the problem we're solving
pub trait Chromosome: Send + Sync + Debug + Clone {
    fn len(&self) -> usize;
}

// This trait represents a configuration of the algorithm
pub trait Meta: Send + Sync + Debug + Clone {
    fn population_size(&self) -> usize;
    fn generations(&self) -> usize;
    fn tournament_size(&self) -> usize;
    fn elitism(&self) -> bool;
    fn record_history(&self) -> bool;
}

/// What the stopping criterion gets to see once a generation is complete.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationSummary {
    /// Number of completed generations.
    pub generation: usize,
    /// Total value of the best-ever chromosome, 0 while there is none.
    pub best_value: u64,
    /// Whether the best-ever fitness strictly improved in this generation.
    pub improved: bool,
    pub elapsed: Duration,
}

// This trait represents the stopping condition of the algorithm. It is
// consulted before any work of a generation is done and again once the
// generation has been completed.
pub trait StoppingCriterion: Send + Sync + Debug {
    fn before_generation(&mut self, generation: usize, elapsed: Duration) -> Option<StopReason>;
    fn after_generation(&mut self, summary: &GenerationSummary) -> Option<StopReason>;
}

// This trait encapsulates the underlying genetic algorithm used by the
// optimizer to find the solution
pub trait Algorithm<M: Meta, C: Chromosome>: Send + Sync + Debug {
    fn meta(&self) -> &M;
    fn empty(&self) -> C;
    fn generate(&self, rng: &mut dyn RngCore) -> Vec<C>;
    fn evaluate(&self, chromosome: &C) -> Evaluation;
    fn repair(&self, chromosome: &mut C);
    fn select<'a>(&self, population: &'a [C], fitnesses: &[f64], rng: &mut dyn RngCore) -> &'a C;
    fn crossover(&self, parent_1: &C, parent_2: &C, rng: &mut dyn RngCore) -> (C, C, bool);
    fn mutate(&self, chromosome: &mut C, rng: &mut dyn RngCore) -> usize;

    fn fitness(&self, chromosome: &C) -> f64 {
        self.evaluate(chromosome).fitness
    }
}

/// Result of a complete run.
#[derive(Clone, Debug)]
pub struct Outcome<C> {
    pub best: C,
    /// Evaluation of `best`, recomputed once the run has stopped.
    pub evaluation: Evaluation,
    pub generations: usize,
    pub reason: StopReason,
    pub elapsed: Duration,
    pub history: Option<History>,
}

impl<C> Outcome<C> {
    pub fn total_value(&self) -> u64 {
        self.evaluation.total_value
    }

    pub fn total_weight(&self) -> u64 {
        self.evaluation.total_weight
    }
}

// This trait encapsulates the optimizer logic
pub trait Optimizer<C: Chromosome>: Send + Sync + Debug {
    fn optimize(
        &mut self,
        criterion: &mut dyn StoppingCriterion,
        rng: &mut dyn RngCore,
    ) -> Outcome<C>;
}
