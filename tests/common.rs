//! Common test utilities for the gridq test suite.

#![allow(dead_code)]

use gridq::{
    gridworld::{GridConfig, GridWorld, Position},
    q_learning::{AgentConfig, QLearningAgent},
};

/// Obstacle-free grid from (0, 0) to the opposite corner.
pub fn open_grid(rows: usize, cols: usize) -> GridWorld {
    GridWorld::new(GridConfig::new(rows, cols)).unwrap()
}

/// 5×5 grid with a short wall the agent has to route around.
pub fn walled_grid() -> GridWorld {
    GridWorld::new(
        GridConfig::new(5, 5)
            .with_obstacles([(1, 1), (1, 2), (2, 2)].map(Position::from))
            .with_seed(17),
    )
    .unwrap()
}

pub fn seeded_agent(config: AgentConfig, seed: u64) -> QLearningAgent {
    QLearningAgent::new(config.with_seed(seed)).unwrap()
}
