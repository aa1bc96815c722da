//! Greedy-toward-goal baseline policy
//!
//! A non-learning comparison policy: step along whichever axis brings the
//! agent closer to the goal, skipping moves that would hit a wall or an
//! obstacle. When every candidate is blocked it picks a uniformly random
//! action, which may itself bump into a wall or obstacle and waste the step.

use rand::{Rng, seq::IndexedRandom};

use super::{action::Action, env::GridView};

/// Actions that reduce the distance to the goal along one axis, in the
/// fixed order up, down, left, right. Falls back to all four actions when
/// no axis improves.
pub fn candidate_actions(view: &GridView<'_>) -> Vec<Action> {
    let (here, goal) = (view.agent, view.goal);
    let mut candidates = Vec::with_capacity(4);
    if goal.row < here.row {
        candidates.push(Action::Up);
    }
    if goal.row > here.row {
        candidates.push(Action::Down);
    }
    if goal.col < here.col {
        candidates.push(Action::Left);
    }
    if goal.col > here.col {
        candidates.push(Action::Right);
    }
    if candidates.is_empty() {
        candidates.extend(Action::ALL);
    }
    candidates
}

/// First unblocked candidate, or a uniformly random action when stuck.
pub fn greedy_action<R: Rng + ?Sized>(view: &GridView<'_>, rng: &mut R) -> Action {
    candidate_actions(view)
        .into_iter()
        .find(|&action| view.is_open(action))
        .unwrap_or_else(|| *Action::ALL.choose(rng).unwrap_or(&Action::Up))
}
