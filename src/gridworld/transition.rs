//! Outcome of a single environment step

use std::fmt;

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Reward magnitudes of the transition model.
pub mod rewards {
    pub const HIT_WALL: f64 = -5.0;
    pub const HIT_OBSTACLE: f64 = -10.0;
    pub const REACHED_GOAL: f64 = 100.0;
    pub const MOVED: f64 = -1.0;
}

/// Diagnostic tag describing what a step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepEvent {
    HitWall,
    HitObstacle,
    ReachedGoal,
    Moved,
}

impl StepEvent {
    pub const fn as_str(self) -> &'static str {
        match self {
            StepEvent::HitWall => "hit_wall",
            StepEvent::HitObstacle => "hit_obstacle",
            StepEvent::ReachedGoal => "reached_goal",
            StepEvent::Moved => "moved",
        }
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `(next_state, reward, done, info)` returned by [`GridWorld::step`].
///
/// [`GridWorld::step`]: super::GridWorld::step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub next_state: Position,
    pub reward: f64,
    pub done: bool,
    pub event: StepEvent,
}
