//! Policy adapters
//!
//! Non-learning policies used as baselines and replay drivers, plus a
//! frozen view of a trained agent for evaluation.

use crate::{
    Error, Result,
    gridworld::{Action, GridWorld, Position},
    ports::Policy,
    q_learning::QLearningAgent,
};

/// Greedy-toward-goal baseline
pub struct GreedyPolicy {
    name: String,
}

impl GreedyPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new("Greedy")
    }
}

impl Policy for GreedyPolicy {
    fn select_action(&mut self, _state: Position, env: &mut GridWorld) -> Result<Action> {
        Ok(env.greedy_action_towards_goal())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Uniformly random actions, drawn from the environment's random source
pub struct RandomPolicy {
    name: String,
}

impl RandomPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new("Random")
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _state: Position, env: &mut GridWorld) -> Result<Action> {
        Ok(env.random_action())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Replays a fixed action sequence
///
/// Asking for more actions than the script holds fails with
/// [`Error::ScriptExhausted`].
pub struct ScriptedPolicy {
    name: String,
    actions: Vec<Action>,
    cursor: usize,
}

impl ScriptedPolicy {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            name: "Scripted".to_string(),
            actions,
            cursor: 0,
        }
    }

    /// Build from raw action ids, rejecting anything outside `0..=3`.
    pub fn from_ids(ids: &[usize]) -> Result<Self> {
        Ok(Self::new(Action::parse_ids(ids)?))
    }

    /// Start the script over for another episode.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    pub fn remaining(&self) -> usize {
        self.actions.len() - self.cursor
    }
}

impl Policy for ScriptedPolicy {
    fn select_action(&mut self, _state: Position, _env: &mut GridWorld) -> Result<Action> {
        let action = self
            .actions
            .get(self.cursor)
            .copied()
            .ok_or(Error::ScriptExhausted {
                steps: self.actions.len(),
            })?;
        self.cursor += 1;
        Ok(action)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Pure exploitation of a trained agent.
///
/// Holds a shared borrow, so the agent's Q-table cannot change while the
/// policy is in use and ε is bypassed entirely.
pub struct ExploitPolicy<'a> {
    agent: &'a QLearningAgent,
}

impl<'a> ExploitPolicy<'a> {
    pub fn new(agent: &'a QLearningAgent) -> Self {
        Self { agent }
    }
}

impl Policy for ExploitPolicy<'_> {
    fn select_action(&mut self, state: Position, _env: &mut GridWorld) -> Result<Action> {
        Ok(self.agent.best_action(state))
    }

    fn name(&self) -> &str {
        "Q-Learning (greedy)"
    }
}
