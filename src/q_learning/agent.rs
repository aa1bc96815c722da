//! Q-learning agent
//!
//! Owns its Q-table and exploration rate. The table persists across every
//! episode of a training run and is only ever mutated by [`QLearningAgent::update`].

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::{config::AgentConfig, q_table::QTable};
use crate::{
    Result,
    gridworld::{Action, GridWorld, Position},
    ports::Policy,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Exploration decision for one step: explore when the uniform draw in
/// `[0, 1)` falls below ε.
///
/// With ε = 0 this is never true, with ε = 1 always.
pub fn explores(draw: f64, epsilon: f64) -> bool {
    draw < epsilon
}

/// Q-learning agent (off-policy TD control)
///
/// Learns the optimal Q* function by always updating toward the maximum
/// next-state value, regardless of the action actually taken next.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    actions: Vec<Action>,
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create a new Q-learning agent.
    ///
    /// The action set is sorted by id and deduplicated so greedy selection
    /// scans it in a stable order. An empty action set fails here rather
    /// than during play.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;

        let mut actions = config.actions;
        actions.sort_by_key(|action| action.id());
        actions.dedup();

        Ok(Self {
            q_table: QTable::new(config.learning_rate, config.discount_factor),
            actions,
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.min_epsilon,
            rng: build_rng(config.seed),
        })
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Stored estimate for `(state, action)`, 0.0 if never updated.
    pub fn get_q(&self, state: Position, action: Action) -> f64 {
        self.q_table.get(state, action)
    }

    /// Action with the highest estimate; ties go to the lowest action id.
    pub fn best_action(&self, state: Position) -> Action {
        self.q_table
            .greedy_action(state, &self.actions)
            .unwrap_or(self.actions[0])
    }

    /// ε-greedy action selection
    pub fn choose_action(&mut self, state: Position) -> Action {
        let draw = self.rng.random::<f64>();
        if explores(draw, self.epsilon) {
            // Explore: random action
            *self.actions.choose(&mut self.rng).unwrap_or(&self.actions[0])
        } else {
            // Exploit: greedy action based on Q-values
            self.best_action(state)
        }
    }

    /// Apply one Q-learning update for an observed transition.
    pub fn update(&mut self, state: Position, action: Action, reward: f64, next_state: Position) {
        self.q_table
            .q_learning_update(state, action, reward, next_state, &self.actions);
    }

    /// Decay epsilon after an episode, never below the configured floor.
    pub fn decay_epsilon(&mut self) {
        if self.epsilon > self.min_epsilon {
            self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
        }
    }

    /// Override the exploration rate; takes effect on the next selection.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon.clamp(0.0, 1.0);
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Estimates for every action in `state`, in action-id order.
    pub fn q_values(&self, state: Position) -> Vec<(Action, f64)> {
        self.q_table.values(state, &self.actions)
    }

    /// Number of `(state, action)` pairs written so far.
    pub fn table_size(&self) -> usize {
        self.q_table.size()
    }
}

impl Policy for QLearningAgent {
    fn select_action(&mut self, state: Position, _env: &mut GridWorld) -> Result<Action> {
        Ok(self.choose_action(state))
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }
}
