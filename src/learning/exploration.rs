//! ε-greedy exploration state shared by the learning agents

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{config::AgentConfig, tictactoe::Action};

pub(crate) fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Exploration rate, its decay schedule, the training switch and the RNG.
#[derive(Debug, Clone)]
pub struct Exploration {
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    training: bool,
    rng: StdRng,
}

impl Exploration {
    pub fn from_config(config: &AgentConfig) -> Self {
        Self {
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.min_epsilon,
            training: true,
            rng: build_rng(config.seed),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    pub fn set_training(&mut self, training: bool) {
        self.training = training;
    }

    /// With probability ε, and only while training, a uniformly random
    /// legal action. `None` means: act greedily.
    pub fn explore(&mut self, legal: &[Action]) -> Option<Action> {
        if !self.training || self.epsilon <= 0.0 {
            return None;
        }
        if self.rng.random::<f64>() < self.epsilon {
            legal.choose(&mut self.rng).copied()
        } else {
            None
        }
    }

    /// Decay epsilon after a training episode
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal() -> Vec<Action> {
        (0..9).map(|i| Action::from_index(i).unwrap()).collect()
    }

    #[test]
    fn test_never_explores_outside_training() {
        let mut exploration = Exploration::from_config(&AgentConfig::default().with_epsilon(1.0));
        exploration.set_training(false);
        for _ in 0..100 {
            assert_eq!(exploration.explore(&legal()), None);
        }
    }

    #[test]
    fn test_always_explores_with_epsilon_one() {
        let mut exploration =
            Exploration::from_config(&AgentConfig::default().with_epsilon(1.0).with_seed(5));
        let actions = legal();
        for _ in 0..100 {
            let action = exploration.explore(&actions).unwrap();
            assert!(actions.contains(&action));
        }
    }

    #[test]
    fn test_decay_respects_floor() {
        let config = AgentConfig::default()
            .with_epsilon(0.5)
            .with_epsilon_decay(0.5, 0.2);
        let mut exploration = Exploration::from_config(&config);
        exploration.decay();
        assert_eq!(exploration.epsilon(), 0.25);
        exploration.decay();
        assert_eq!(exploration.epsilon(), 0.2);
    }
}
