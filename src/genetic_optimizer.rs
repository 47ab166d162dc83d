use crate::config::KnapsackConfig;
use crate::error::GaError;
use crate::genetic_algorithm::{
    Algorithm, Chromosome, GenerationSummary, Meta, Optimizer, Outcome, StoppingCriterion,
};
use crate::history::{GenerationRecord, History};
use crate::individual::Individual;
use crate::operators::{bit_flip_mutation, single_point_crossover};
use crate::problem::{Evaluation, KnapsackProblem};
use crate::repair::repair;
use crate::selection::tournament_pick;
use crate::termination::{StopReason, TerminationPolicy};
use rand::RngCore;
use std::time::Instant;
use tracing::instrument;

#[derive(Debug)]
pub struct KnapsackAlgorithm {
    problem: KnapsackProblem,
    config: KnapsackConfig,
}

impl KnapsackAlgorithm {
    pub fn new(problem: KnapsackProblem, config: KnapsackConfig) -> Result<Self, GaError> {
        config.validate()?;
        if config.tournament_size > config.population_size {
            tracing::warn!(
                tournament_size = config.tournament_size,
                population_size = config.population_size,
                "tournament size capped at population size"
            );
        }
        Ok(Self { problem, config })
    }

    pub fn problem(&self) -> &KnapsackProblem {
        &self.problem
    }
}

impl Algorithm<KnapsackConfig, Individual> for KnapsackAlgorithm {
    fn meta(&self) -> &KnapsackConfig {
        &self.config
    }

    fn empty(&self) -> Individual {
        Individual::zeroed(self.problem.len())
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Vec<Individual> {
        (0..self.config.population_size)
            .map(|_| {
                let mut individual = Individual::random(self.problem.len(), rng);
                repair(&self.problem, &mut individual);
                individual
            })
            .collect()
    }

    fn evaluate(&self, chromosome: &Individual) -> Evaluation {
        self.problem.evaluate(chromosome.genes())
    }

    fn repair(&self, chromosome: &mut Individual) {
        repair(&self.problem, chromosome);
    }

    fn select<'a>(
        &self,
        population: &'a [Individual],
        fitnesses: &[f64],
        rng: &mut dyn RngCore,
    ) -> &'a Individual {
        tournament_pick(population, fitnesses, self.config.tournament_size(), rng)
    }

    fn crossover(
        &self,
        parent_1: &Individual,
        parent_2: &Individual,
        rng: &mut dyn RngCore,
    ) -> (Individual, Individual, bool) {
        single_point_crossover(parent_1, parent_2, self.config.crossover_rate, rng)
    }

    fn mutate(&self, chromosome: &mut Individual, rng: &mut dyn RngCore) -> usize {
        bit_flip_mutation(chromosome, self.config.mutation_rate, rng)
    }
}

#[derive(Debug)]
pub struct GeneticOptimizer {
    pub algorithm: Box<dyn Algorithm<KnapsackConfig, Individual>>,
}

impl GeneticOptimizer {
    pub fn new(algorithm: Box<dyn Algorithm<KnapsackConfig, Individual>>) -> Self {
        Self { algorithm }
    }
}

impl Optimizer<Individual> for GeneticOptimizer {
    #[instrument(level = "debug", skip_all)]
    fn optimize(
        &mut self,
        criterion: &mut dyn StoppingCriterion,
        rng: &mut dyn RngCore,
    ) -> Outcome<Individual> {
        let start = Instant::now();
        let algorithm = &self.algorithm;
        let meta = algorithm.meta();
        let population_size = meta.population_size();

        let empty = algorithm.empty();
        if Chromosome::len(&empty) == 0 {
            let evaluation = algorithm.evaluate(&empty);
            tracing::info!("problem has no items, nothing to evolve");
            return Outcome {
                best: empty,
                evaluation,
                generations: 0,
                reason: StopReason::NoItems,
                elapsed: start.elapsed(),
                history: meta.record_history().then(History::default),
            };
        }

        let mut history = meta.record_history().then(History::default);
        let mut population = algorithm.generate(rng);
        let mut best: Option<Individual> = None;
        let mut best_fitness = f64::NEG_INFINITY;
        let mut generation = 0;

        let reason = loop {
            if let Some(reason) = criterion.before_generation(generation, start.elapsed()) {
                break reason;
            }

            let fitnesses: Vec<f64> = population.iter().map(|c| algorithm.fitness(c)).collect();
            let avg_fitness = fitnesses.iter().sum::<f64>() / fitnesses.len() as f64;

            let mut improved = false;
            for (chromosome, &fitness) in population.iter().zip(fitnesses.iter()) {
                if fitness > best_fitness {
                    best_fitness = fitness;
                    best = Some(chromosome.clone());
                    improved = true;
                }
            }

            let mut mutations = 0;
            let mut crossovers = 0;
            let mut next_population = Vec::with_capacity(population_size);

            if meta.elitism() {
                if let Some(best) = &best {
                    let mut elite = best.clone();
                    algorithm.repair(&mut elite);
                    next_population.push(elite);
                }
            }

            while next_population.len() < population_size {
                let parent_1 = algorithm.select(&population, &fitnesses, rng);
                let parent_2 = algorithm.select(&population, &fitnesses, rng);

                let (mut child_1, mut child_2, crossed) =
                    algorithm.crossover(parent_1, parent_2, rng);
                crossovers += usize::from(crossed);
                mutations += algorithm.mutate(&mut child_1, rng);
                mutations += algorithm.mutate(&mut child_2, rng);

                algorithm.repair(&mut child_1);
                next_population.push(child_1);
                if next_population.len() < population_size {
                    algorithm.repair(&mut child_2);
                    next_population.push(child_2);
                }
            }

            let best_evaluation = best
                .as_ref()
                .map(|best| algorithm.evaluate(best))
                .unwrap_or_default();

            tracing::debug!(
                "generation {}/{}: best fitness {:.2}, avg fitness {:.2}",
                generation + 1,
                meta.generations(),
                best_fitness,
                avg_fitness
            );

            if let Some(history) = history.as_mut() {
                history.push(GenerationRecord {
                    gen: generation,
                    best_fitness,
                    avg_fitness,
                    mutations,
                    crossovers,
                    best_value: best_evaluation.total_value,
                    best_weight: best_evaluation.total_weight,
                    elapsed: start.elapsed().as_secs_f64(),
                });
            }

            population = next_population;
            generation += 1;

            let summary = GenerationSummary {
                generation,
                best_value: best_evaluation.total_value,
                improved,
                elapsed: start.elapsed(),
            };
            if let Some(reason) = criterion.after_generation(&summary) {
                break reason;
            }
        };

        let best = best.unwrap_or(empty);
        let evaluation = algorithm.evaluate(&best);
        let elapsed = start.elapsed();

        tracing::info!(
            %reason,
            generations = generation,
            total_value = evaluation.total_value,
            total_weight = evaluation.total_weight,
            elapsed = elapsed.as_secs_f64(),
            "evolution finished"
        );

        Outcome {
            best,
            evaluation,
            generations: generation,
            reason,
            elapsed,
            history,
        }
    }
}

/// Runs the GA on `problem` with the default termination policy derived
/// from `config`, drawing all randomness from `rng`.
pub fn solve(
    problem: &KnapsackProblem,
    config: &KnapsackConfig,
    rng: &mut dyn RngCore,
) -> Result<Outcome<Individual>, GaError> {
    let mut criterion = TerminationPolicy::from_config(config);
    solve_with(problem, config, &mut criterion, rng)
}

/// Same as [`solve`] with a caller supplied stopping criterion.
pub fn solve_with(
    problem: &KnapsackProblem,
    config: &KnapsackConfig,
    criterion: &mut dyn StoppingCriterion,
    rng: &mut dyn RngCore,
) -> Result<Outcome<Individual>, GaError> {
    let algorithm = KnapsackAlgorithm::new(problem.clone(), config.clone())?;
    let mut optimizer = GeneticOptimizer::new(Box::new(algorithm));
    Ok(optimizer.optimize(criterion, rng))
}
