//! Configuration for Q-learning agent creation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, gridworld::Action};

/// Configuration for creating a [`QLearningAgent`](super::QLearningAgent).
///
/// # Examples
///
/// ```
/// use gridq::q_learning::AgentConfig;
///
/// let config = AgentConfig::default()
///     .with_learning_rate(0.5)
///     .with_epsilon(0.2)
///     .with_epsilon_decay(0.99, 0.05)
///     .with_seed(42);
/// config.validate()?;
/// # Ok::<(), gridq::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Actions the agent may choose from
    #[serde(default = "default_actions")]
    pub actions: Vec<Action>,
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1]
    pub discount_factor: f64,
    /// Initial exploration rate ε, in [0, 1]
    pub epsilon: f64,
    /// Multiplicative decay applied after each training episode, in (0, 1]
    #[serde(default = "default_epsilon_decay")]
    pub epsilon_decay: f64,
    /// Floor the decay never crosses
    #[serde(default = "default_min_epsilon")]
    pub min_epsilon: f64,
    /// Random seed for reproducibility
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_actions() -> Vec<Action> {
    Action::ALL.to_vec()
}

fn default_epsilon_decay() -> f64 {
    0.995
}

fn default_min_epsilon() -> f64 {
    0.01
}

impl AgentConfig {
    pub fn with_actions(mut self, actions: impl Into<Vec<Action>>) -> Self {
        self.actions = actions.into();
        self
    }

    pub fn with_learning_rate(mut self, alpha: f64) -> Self {
        self.learning_rate = alpha;
        self
    }

    pub fn with_discount_factor(mut self, gamma: f64) -> Self {
        self.discount_factor = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the per-episode decay factor and its floor.
    pub fn with_epsilon_decay(mut self, decay: f64, min_epsilon: f64) -> Self {
        self.epsilon_decay = decay;
        self.min_epsilon = min_epsilon;
        self
    }

    /// Disable decay; ε stays where it is set.
    pub fn without_decay(mut self) -> Self {
        self.epsilon_decay = 1.0;
        self.min_epsilon = 0.0;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check parameter ranges, failing with
    /// [`Error::InvalidConfiguration`].
    pub fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(Error::config("action set must not be empty"));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(Error::config(format!(
                "learning rate {} must be in (0, 1]",
                self.learning_rate
            )));
        }
        for (name, value) in [
            ("discount factor", self.discount_factor),
            ("epsilon", self.epsilon),
            ("minimum epsilon", self.min_epsilon),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::config(format!("{name} {value} must be in [0, 1]")));
            }
        }
        if !(self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0) {
            return Err(Error::config(format!(
                "epsilon decay {} must be in (0, 1]",
                self.epsilon_decay
            )));
        }
        Ok(())
    }
}

impl Default for AgentConfig {
    /// α = 0.1, γ = 0.9, ε = 1.0 decaying by 0.995 per episode to 0.01.
    fn default() -> Self {
        Self {
            actions: default_actions(),
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 1.0,
            epsilon_decay: default_epsilon_decay(),
            min_epsilon: default_min_epsilon(),
            seed: None,
        }
    }
}
