use csv::Writer;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// Metrics of a single generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub gen: usize,
    pub best_fitness: f64,
    pub avg_fitness: f64,
    pub mutations: usize,
    pub crossovers: usize,
    pub best_value: u64,
    pub best_weight: u64,
    /// Seconds since the run started.
    pub elapsed: f64,
}

/// Per-generation metrics sink, filled by the optimizer when history
/// recording is enabled.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    records: Vec<GenerationRecord>,
}

impl History {
    pub fn push(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    /// Time spent in each generation, derived from the cumulative `elapsed`.
    pub fn generation_times(&self) -> Vec<f64> {
        let mut previous = 0.0;
        self.records
            .iter()
            .map(|record| {
                let delta = (record.elapsed - previous).max(0.0);
                previous = record.elapsed;
                delta
            })
            .collect()
    }

    pub fn write_csv(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        let mut writer = Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl From<Vec<GenerationRecord>> for History {
    fn from(records: Vec<GenerationRecord>) -> Self {
        Self { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(gen: usize, elapsed: f64) -> GenerationRecord {
        GenerationRecord {
            gen,
            best_fitness: 10.0,
            avg_fitness: 5.0,
            mutations: 3,
            crossovers: 2,
            best_value: 10,
            best_weight: 4,
            elapsed,
        }
    }

    #[test]
    fn test_generation_times_are_deltas() {
        let history = History::from(vec![record(0, 0.5), record(1, 0.75), record(2, 1.0)]);
        assert_eq!(history.generation_times(), vec![0.5, 0.25, 0.25]);
    }

    #[test]
    fn test_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let history = History::from(vec![record(0, 0.5), record(1, 1.0)]);

        history.write_csv(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next(),
            Some("gen,best_fitness,avg_fitness,mutations,crossovers,best_value,best_weight,elapsed")
        );
        assert_eq!(lines.next(), Some("0,10.0,5.0,3,2,10,4,0.5"));
        assert_eq!(lines.count(), 1);
    }
}
