//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::gridworld::{Action, Position};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Uses grid positions and movement actions as keys. Pairs that were never
/// written read as 0.0.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    /// Q-values: (position, action) -> Q-value
    q_values: HashMap<(Position, Action), f64>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a new, empty Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    /// Get Q-value for a state-action pair, 0.0 when unseen
    pub fn get(&self, state: Position, action: Action) -> f64 {
        self.q_values
            .get(&(state, action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: Position, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Get maximum Q-value over `actions` in a state
    pub fn max_q(&self, state: Position, actions: &[Action]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Select greedy action (highest Q-value) from `actions`.
    ///
    /// `actions` is scanned in order and only a strictly larger value
    /// replaces the incumbent, so ties go to the earliest action.
    pub fn greedy_action(&self, state: Position, actions: &[Action]) -> Option<Action> {
        let mut best: Option<(Action, f64)> = None;
        for &action in actions {
            let value = self.get(state, action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: Position,
        action: Action,
        reward: f64,
        next_state: Position,
        actions: &[Action],
    ) {
        let current_q = self.get(state, action);
        let max_next_q = if actions.is_empty() {
            0.0
        } else {
            self.max_q(next_state, actions)
        };
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
    }

    /// Values of `actions` in a state, in the given order
    pub fn values(&self, state: Position, actions: &[Action]) -> Vec<(Action, f64)> {
        actions
            .iter()
            .map(|&action| (action, self.get(state, action)))
            .collect()
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: Position = Position::new(1, 1);
    const NEXT: Position = Position::new(1, 2);

    #[test]
    fn test_unseen_pair_reads_zero_without_inserting() {
        let qtable = QTable::new(0.5, 0.9);
        assert_eq!(qtable.get(S, Action::Left), 0.0);
        assert_eq!(qtable.max_q(S, &Action::ALL), 0.0);
        assert_eq!(qtable.size(), 0);
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::new(0.5, 0.9);
        qtable.set(S, Action::Down, 1.5);
        assert_eq!(qtable.get(S, Action::Down), 1.5);
        assert_eq!(qtable.size(), 1);
    }

    #[test]
    fn test_greedy_action_breaks_ties_to_first() {
        let mut qtable = QTable::new(0.5, 0.9);
        assert_eq!(qtable.greedy_action(S, &Action::ALL), Some(Action::Up));

        qtable.set(S, Action::Left, 2.0);
        qtable.set(S, Action::Right, 2.0);
        assert_eq!(qtable.greedy_action(S, &Action::ALL), Some(Action::Left));

        qtable.set(S, Action::Up, -1.0);
        qtable.set(S, Action::Down, -1.0);
        qtable.set(S, Action::Left, -3.0);
        qtable.set(S, Action::Right, -3.0);
        assert_eq!(qtable.greedy_action(S, &Action::ALL), Some(Action::Up));
    }

    #[test]
    fn test_greedy_action_empty_set() {
        let qtable = QTable::new(0.5, 0.9);
        assert_eq!(qtable.greedy_action(S, &[]), None);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(0.5, 0.9);
        qtable.set(NEXT, Action::Up, 1.0);
        qtable.set(NEXT, Action::Down, 2.0);

        qtable.q_learning_update(S, Action::Right, -1.0, NEXT, &Action::ALL);

        // Q(s,right) = 0.0 + 0.5 * (-1.0 + 0.9 * 2.0 - 0.0) = 0.4
        assert!((qtable.get(S, Action::Right) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_update_uses_pre_update_value_on_self_loop() {
        let mut qtable = QTable::new(0.5, 1.0);
        qtable.set(S, Action::Up, 4.0);

        // s' == s and a is the argmax: target uses the old 4.0
        qtable.q_learning_update(S, Action::Up, -5.0, S, &Action::ALL);

        // 4.0 + 0.5 * (-5.0 + 4.0 - 4.0) = 1.5
        assert!((qtable.get(S, Action::Up) - 1.5).abs() < 1e-12);
    }
}
