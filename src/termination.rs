use crate::config::KnapsackConfig;
use crate::genetic_algorithm::{GenerationSummary, StoppingCriterion};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    GenerationBudgetExhausted,
    TimeBudgetExhausted,
    StabilityLimitReached,
    /// The problem has no items, nothing was evolved.
    NoItems,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StopReason::GenerationBudgetExhausted => "generation_budget_exhausted",
            StopReason::TimeBudgetExhausted => "time_budget_exhausted",
            StopReason::StabilityLimitReached => "stability_limit_reached",
            StopReason::NoItems => "no_items",
        };
        f.write_str(name)
    }
}

/// The engine's default stopping policy.
///
/// With a positive `stable_limit` the run is in stability mode: the
/// generation budget is ignored and the run ends once the best value has
/// stayed the same for `stable_limit` consecutive generations. Otherwise
/// the run is bounded by `generations`. A time budget applies in both modes.
#[derive(Clone, Debug, Default)]
pub struct TerminationPolicy {
    generations: usize,
    max_time: Option<Duration>,
    stable_limit: Option<u32>,
    stable_count: u32,
    prev_best_value: Option<u64>,
}

impl TerminationPolicy {
    pub fn new(generations: usize, max_time: Option<Duration>, stable_limit: Option<u32>) -> Self {
        Self {
            generations,
            max_time,
            stable_limit: stable_limit.filter(|&limit| limit > 0),
            stable_count: 0,
            prev_best_value: None,
        }
    }

    pub fn from_config(config: &KnapsackConfig) -> Self {
        // Budgets too large for a Duration are as good as no budget
        let max_time = config
            .max_time
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
        Self::new(config.generations, max_time, config.stable_limit)
    }

    pub fn uses_stability(&self) -> bool {
        self.stable_limit.is_some()
    }

    pub fn stable_count(&self) -> u32 {
        self.stable_count
    }
}

impl StoppingCriterion for TerminationPolicy {
    fn before_generation(&mut self, generation: usize, elapsed: Duration) -> Option<StopReason> {
        if !self.uses_stability() && generation >= self.generations {
            return Some(StopReason::GenerationBudgetExhausted);
        }

        match self.max_time {
            Some(max_time) if elapsed >= max_time => Some(StopReason::TimeBudgetExhausted),
            _ => None,
        }
    }

    fn after_generation(&mut self, summary: &GenerationSummary) -> Option<StopReason> {
        match self.prev_best_value {
            None => {
                self.prev_best_value = Some(summary.best_value);
                self.stable_count = 0;
            }
            Some(prev) if prev == summary.best_value && !summary.improved => {
                self.stable_count += 1;
            }
            Some(prev) if prev != summary.best_value => {
                self.prev_best_value = Some(summary.best_value);
                self.stable_count = 0;
            }
            // Same value but a fitness improvement: the counter is left alone
            Some(_) => {}
        }

        match self.stable_limit {
            Some(limit) if self.stable_count >= limit => Some(StopReason::StabilityLimitReached),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(generation: usize, best_value: u64, improved: bool) -> GenerationSummary {
        GenerationSummary {
            generation,
            best_value,
            improved,
            elapsed: Duration::ZERO,
        }
    }

    #[test]
    fn test_fixed_mode_stops_at_generation_budget() {
        let mut policy = TerminationPolicy::new(3, None, None);

        assert_eq!(policy.before_generation(2, Duration::ZERO), None);
        assert_eq!(
            policy.before_generation(3, Duration::ZERO),
            Some(StopReason::GenerationBudgetExhausted)
        );
    }

    #[test]
    fn test_zero_stable_limit_means_fixed_mode() {
        let policy = TerminationPolicy::new(10, None, Some(0));
        assert!(!policy.uses_stability());
    }

    #[test]
    fn test_stability_mode_ignores_generation_budget() {
        let mut policy = TerminationPolicy::new(3, None, Some(5));
        assert_eq!(policy.before_generation(1_000, Duration::ZERO), None);
    }

    #[test]
    fn test_time_budget_applies_in_both_modes() {
        let budget = Some(Duration::from_millis(10));

        let mut fixed = TerminationPolicy::new(100, budget, None);
        let mut stable = TerminationPolicy::new(100, budget, Some(5));

        for policy in [&mut fixed, &mut stable] {
            assert_eq!(policy.before_generation(0, Duration::from_millis(9)), None);
            assert_eq!(
                policy.before_generation(0, Duration::from_millis(10)),
                Some(StopReason::TimeBudgetExhausted)
            );
        }
    }

    #[test]
    fn test_stability_counts_unchanged_generations() {
        let mut policy = TerminationPolicy::new(0, None, Some(3));

        assert_eq!(policy.after_generation(&summary(1, 10, true)), None);
        assert_eq!(policy.stable_count(), 0);
        assert_eq!(policy.after_generation(&summary(2, 10, false)), None);
        assert_eq!(policy.after_generation(&summary(3, 10, false)), None);
        assert_eq!(
            policy.after_generation(&summary(4, 10, false)),
            Some(StopReason::StabilityLimitReached)
        );
    }

    #[test]
    fn test_new_best_value_resets_the_counter() {
        let mut policy = TerminationPolicy::new(0, None, Some(3));

        policy.after_generation(&summary(1, 10, true));
        policy.after_generation(&summary(2, 10, false));
        policy.after_generation(&summary(3, 10, false));
        assert_eq!(policy.stable_count(), 2);

        assert_eq!(policy.after_generation(&summary(4, 12, true)), None);
        assert_eq!(policy.stable_count(), 0);
    }

    #[test]
    fn test_improvement_with_unchanged_value_leaves_counter_alone() {
        // Known quirk: the branch neither increments nor resets
        let mut policy = TerminationPolicy::new(0, None, Some(10));

        policy.after_generation(&summary(1, 10, true));
        policy.after_generation(&summary(2, 10, false));
        policy.after_generation(&summary(3, 10, false));
        assert_eq!(policy.stable_count(), 2);

        policy.after_generation(&summary(4, 10, true));
        assert_eq!(policy.stable_count(), 2);
    }

    #[test]
    fn test_fixed_mode_never_stops_on_stability() {
        let mut policy = TerminationPolicy::new(100, None, None);
        for generation in 1..50 {
            assert_eq!(policy.after_generation(&summary(generation, 0, false)), None);
        }
    }

    #[test]
    fn test_from_config() {
        let config = KnapsackConfig {
            generations: 7,
            max_time: Some(f64::INFINITY),
            stable_limit: Some(4),
            ..Default::default()
        };
        let policy = TerminationPolicy::from_config(&config);

        assert!(policy.uses_stability());
        assert_eq!(policy.max_time, None);
        assert_eq!(policy.generations, 7);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(
            StopReason::StabilityLimitReached.to_string(),
            "stability_limit_reached"
        );
        assert_eq!(
            StopReason::GenerationBudgetExhausted.to_string(),
            "generation_budget_exhausted"
        );
    }
}
