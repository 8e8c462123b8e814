use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::EnvError;

/// Summary of one naturally terminated training episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// 1-based episode counter, never reset.
    pub episode: u64,
    /// Problem the episode was run on.
    pub problem_index: usize,
    /// Best fitness of the episode, `None` when no finite value was seen.
    pub best_fitness: Option<f64>,
    pub cumulative_reward: f64,
}

/// Append-only sequence of [`EpisodeRecord`]s, exported as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeLog {
    records: Vec<EpisodeRecord>,
}

impl EpisodeLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EpisodeRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[EpisodeRecord] {
        &self.records
    }

    #[must_use]
    pub fn last(&self) -> Option<&EpisodeRecord> {
        self.records.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// # Errors
    ///
    /// Propagates serialization failures.
    pub fn to_json(&self) -> Result<String, EnvError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the log to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Fails on serialization or I/O errors.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), EnvError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_records_as_array() {
        let mut log = EpisodeLog::new();
        assert!(log.is_empty());
        log.push(EpisodeRecord {
            episode: 1,
            problem_index: 3,
            best_fitness: Some(-12.5),
            cumulative_reward: 0.75,
        });
        let json = log.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["episode"], 1);
        assert_eq!(value[0]["problem_index"], 3);
        assert_eq!(value[0]["best_fitness"], -12.5);

        let back: EpisodeLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn missing_best_fitness_survives_export() {
        let mut log = EpisodeLog::new();
        log.push(EpisodeRecord {
            episode: 4,
            problem_index: 12,
            best_fitness: None,
            cumulative_reward: 0.0,
        });
        let json = log.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value[0]["best_fitness"].is_null());
        let back: EpisodeLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
