//! Hyper-parameter and evaluation configuration.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Hyper-parameters shared by the tabular learning agents.
///
/// ```
/// use ttt_rl::config::AgentConfig;
///
/// let config = AgentConfig::td()
///     .with_epsilon(0.2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration probability while training
    pub epsilon: f64,
    /// Multiplicative epsilon decay applied after every training episode
    pub epsilon_decay: f64,
    /// Floor for the decayed epsilon
    pub min_epsilon: f64,
    /// Value every table entry starts with
    pub initial_value: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Q-learning defaults: α=0.9, γ=0.9, ε=0.1, Q₀=0.6
    pub fn q_learning() -> Self {
        Self {
            alpha: 0.9,
            gamma: 0.9,
            epsilon: 0.1,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            initial_value: 0.6,
            seed: None,
        }
    }

    /// SARSA defaults, identical to Q-learning
    pub fn sarsa() -> Self {
        Self::q_learning()
    }

    /// TD(0) defaults: α=0.1, γ=0.9, ε=0.1, V₀=0.05
    pub fn td() -> Self {
        Self {
            alpha: 0.1,
            initial_value: 0.05,
            ..Self::q_learning()
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set a per-episode epsilon decay and its floor.
    pub fn with_epsilon_decay(mut self, decay: f64, min_epsilon: f64) -> Self {
        self.epsilon_decay = decay;
        self.min_epsilon = min_epsilon;
        self
    }

    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = value;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject probabilities and rates outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let unit = [
            ("alpha", self.alpha),
            ("gamma", self.gamma),
            ("epsilon", self.epsilon),
            ("epsilon_decay", self.epsilon_decay),
            ("min_epsilon", self.min_epsilon),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        if !self.initial_value.is_finite() {
            return Err(Error::InvalidConfiguration {
                message: format!("initial_value must be finite, got {}", self.initial_value),
            });
        }
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take the
    /// Q-learning defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with_defaults(path, Self::default())
    }

    /// Load a JSON object from `path` and lay its fields over `base`.
    ///
    /// Fields the file leaves out keep their value from `base`, so a partial
    /// file for TD(0) keeps the TD(0) learning rate and initial value.
    pub fn load_with_defaults<P: AsRef<Path>>(path: P, base: Self) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open config file {}", path.as_ref().display()),
            source,
        })?;
        let overrides: serde_json::Value = serde_json::from_reader(BufReader::new(file))?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "config file {} must hold a JSON object",
                    path.as_ref().display()
                ),
            });
        };

        let mut merged = serde_json::to_value(base)?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::q_learning()
    }
}

/// How many games make up a battle, and how many battles to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Games per battle (one data point of the time series)
    pub games_per_battle: usize,
    /// Number of battles
    pub num_battles: usize,
    /// Seed handed to both players before the first game
    pub seed: Option<u64>,
}

impl EvaluationConfig {
    pub fn new(games_per_battle: usize, num_battles: usize) -> Self {
        Self {
            games_per_battle,
            num_battles,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn total_games(&self) -> usize {
        self.games_per_battle * self.num_battles
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        for config in [AgentConfig::q_learning(), AgentConfig::sarsa(), AgentConfig::td()] {
            assert!(config.validate().is_ok());
        }
        assert_eq!(AgentConfig::td().alpha, 0.1);
        assert_eq!(AgentConfig::td().initial_value, 0.05);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let err = AgentConfig::default().with_alpha(1.5).validate().unwrap_err();
        assert!(err.to_string().contains("alpha"));
        assert!(
            AgentConfig::default()
                .with_initial_value(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AgentConfig = serde_json::from_str(r#"{"alpha": 0.5, "seed": 3}"#).unwrap();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.gamma, 0.9);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_load_fills_gaps_from_base() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        std::fs::write(&path, r#"{"epsilon": 0.3}"#).unwrap();

        let config = AgentConfig::load_with_defaults(&path, AgentConfig::td()).unwrap();
        assert_eq!(config, AgentConfig::td().with_epsilon(0.3));

        let plain = AgentConfig::load(&path).unwrap();
        assert_eq!(plain, AgentConfig::q_learning().with_epsilon(0.3));
    }

    #[test]
    fn test_load_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agent.json");
        std::fs::write(&path, "[0.5]").unwrap();
        assert!(matches!(
            AgentConfig::load_with_defaults(&path, AgentConfig::td()),
            Err(Error::InvalidConfiguration { .. })
        ));

        std::fs::write(&path, r#"{"alpha": 2.0}"#).unwrap();
        assert!(AgentConfig::load(&path).is_err());
    }

    #[test]
    fn test_total_games() {
        assert_eq!(EvaluationConfig::new(40, 200).total_games(), 8000);
    }
}
