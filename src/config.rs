use crate::error::{GaError, LoadError};
use crate::genetic_algorithm::Meta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine configuration. Every field has a default, so a config file only
/// needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KnapsackConfig {
    pub population_size: usize,
    /// Hard budget in fixed-generation mode, progress denominator otherwise.
    pub generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub tournament_size: usize,
    pub elitism: bool,
    /// Wall-clock budget in seconds.
    pub max_time: Option<f64>,
    /// A positive value switches the engine to stability mode.
    pub stable_limit: Option<u32>,
    pub record_history: bool,
}

impl Default for KnapsackConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 200,
            mutation_rate: 0.01,
            crossover_rate: 0.8,
            tournament_size: 3,
            elitism: true,
            max_time: None,
            stable_limit: None,
            record_history: false,
        }
    }
}

impl KnapsackConfig {
    /// Parameters scaled to the number of items.
    pub fn auto(item_count: usize) -> Self {
        let mut config = Self::default();
        config.apply_auto(item_count);
        config
    }

    /// Overwrites population size, generations and mutation rate with values
    /// scaled to the number of items, keeping everything else.
    pub fn apply_auto(&mut self, item_count: usize) {
        let n = item_count.max(1);
        self.population_size = (10 * n).clamp(20, 200);
        self.generations = ((50.0 * (n as f64).sqrt()) as usize).clamp(50, 2000);
        self.mutation_rate = (1.0 / n as f64).clamp(0.01, 0.1);
    }

    pub fn from_json_file(path: &Path) -> Result<Self, LoadError> {
        let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::InvalidConfiguration(
                "population_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidConfiguration(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GaError::InvalidConfiguration(format!(
                "crossover_rate must be within [0, 1], got {}",
                self.crossover_rate
            )));
        }
        if self.tournament_size == 0 {
            return Err(GaError::InvalidConfiguration(
                "tournament_size must be at least 1".to_string(),
            ));
        }
        if let Some(max_time) = self.max_time {
            if max_time.is_nan() || max_time < 0.0 {
                return Err(GaError::InvalidConfiguration(format!(
                    "max_time must be a non-negative number of seconds, got {}",
                    max_time
                )));
            }
        }
        Ok(())
    }

    /// Tournament size as used by the engine: capped at the population size.
    pub fn effective_tournament_size(&self) -> usize {
        self.tournament_size.min(self.population_size).max(1)
    }
}

impl Meta for KnapsackConfig {
    fn population_size(&self) -> usize {
        self.population_size
    }

    fn generations(&self) -> usize {
        self.generations
    }

    fn tournament_size(&self) -> usize {
        self.effective_tournament_size()
    }

    fn elitism(&self) -> bool {
        self.elitism
    }

    fn record_history(&self) -> bool {
        self.record_history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KnapsackConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.generations, 200);
        assert_eq!(config.mutation_rate, 0.01);
        assert_eq!(config.crossover_rate, 0.8);
        assert_eq!(config.tournament_size, 3);
        assert!(config.elitism);
        assert_eq!(config.max_time, None);
        assert_eq!(config.stable_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_invalid_values() {
        let cases = [
            KnapsackConfig {
                population_size: 0,
                ..Default::default()
            },
            KnapsackConfig {
                mutation_rate: -0.1,
                ..Default::default()
            },
            KnapsackConfig {
                crossover_rate: 1.5,
                ..Default::default()
            },
            KnapsackConfig {
                crossover_rate: f64::NAN,
                ..Default::default()
            },
            KnapsackConfig {
                tournament_size: 0,
                ..Default::default()
            },
            KnapsackConfig {
                max_time: Some(-1.0),
                ..Default::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(GaError::InvalidConfiguration(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_tournament_is_capped_at_population() {
        let config = KnapsackConfig {
            population_size: 2,
            tournament_size: 10,
            ..Default::default()
        };
        assert_eq!(Meta::tournament_size(&config), 2);
    }

    #[test]
    fn test_auto_parameters() {
        let small = KnapsackConfig::auto(0);
        assert_eq!(small.population_size, 20);
        assert_eq!(small.generations, 50);
        assert_eq!(small.mutation_rate, 0.1);

        let medium = KnapsackConfig::auto(16);
        assert_eq!(medium.population_size, 160);
        assert_eq!(medium.generations, 200);
        assert_eq!(medium.mutation_rate, 1.0 / 16.0);

        let large = KnapsackConfig::auto(10_000);
        assert_eq!(large.population_size, 200);
        assert_eq!(large.generations, 2000);
        assert_eq!(large.mutation_rate, 0.01);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: KnapsackConfig =
            serde_json::from_str(r#"{"population_size": 30, "stable_limit": 5}"#).unwrap();

        assert_eq!(config.population_size, 30);
        assert_eq!(config.stable_limit, Some(5));
        assert_eq!(config.generations, 200);
        assert!(config.elitism);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<KnapsackConfig>(r#"{"pop": 30}"#);
        assert!(result.is_err());
    }
}
