//! The grid-world simulator

use std::collections::BTreeSet;

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};
use tracing::trace;

use super::{
    action::Action,
    baseline,
    config::{GridConfig, ObstacleLayout, ObstacleMode},
    position::Position,
    transition::{StepEvent, Transition, rewards},
};
use crate::Result;

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Borrowed snapshot of everything a renderer or the baseline needs:
/// dimensions, agent, goal and obstacles.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    pub rows: usize,
    pub cols: usize,
    pub agent: Position,
    pub goal: Position,
    pub obstacles: &'a BTreeSet<Position>,
}

impl GridView<'_> {
    /// Whether `action` from the agent's cell lands in-bounds on a free cell.
    pub fn is_open(&self, action: Action) -> bool {
        self.agent.offset(action.delta()).is_some_and(|cell| {
            cell.within(self.rows, self.cols) && !self.obstacles.contains(&cell)
        })
    }
}

/// Discrete navigation environment.
///
/// Holds the grid geometry, the obstacle set and the agent's position.
/// Blocked moves are reward signals, never errors: every step leaves the
/// environment in a valid, continuable state.
#[derive(Debug, Clone)]
pub struct GridWorld {
    rows: usize,
    cols: usize,
    start: Position,
    goal: Position,
    mode: ObstacleMode,
    obstacle_count: usize,
    obstacles: BTreeSet<Position>,
    agent: Position,
    rng: StdRng,
}

impl GridWorld {
    /// Build an environment, validating the configuration first.
    ///
    /// Count layouts are sampled immediately so a freshly constructed
    /// environment is playable in both modes.
    pub fn new(config: GridConfig) -> Result<Self> {
        config.validate()?;

        let obstacle_count = config.obstacle_count();
        let mut env = Self {
            rows: config.rows,
            cols: config.cols,
            start: config.start,
            goal: config.goal,
            mode: config.mode,
            obstacle_count,
            obstacles: BTreeSet::new(),
            agent: config.start,
            rng: build_rng(config.seed),
        };

        match config.obstacles {
            ObstacleLayout::Explicit(cells) => env.obstacles = cells.into_iter().collect(),
            ObstacleLayout::Count(_) => env.regenerate_obstacles(),
        }

        Ok(env)
    }

    /// Replace the random source used for obstacle placement and the
    /// baseline's stuck escape.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Put the agent back on the start cell and return the start state.
    ///
    /// Dynamic environments draw a fresh obstacle layout first.
    pub fn reset(&mut self) -> Position {
        if self.mode == ObstacleMode::Dynamic {
            self.regenerate_obstacles();
        }
        self.agent = self.start;
        self.agent
    }

    /// Sample a new obstacle set of the configured size, uniformly and
    /// without replacement over every cell except start and goal.
    pub fn regenerate_obstacles(&mut self) {
        let free: Vec<Position> = (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| Position::new(row, col)))
            .filter(|&cell| cell != self.start && cell != self.goal)
            .collect();

        self.obstacles = free
            .choose_multiple(&mut self.rng, self.obstacle_count)
            .copied()
            .collect();
    }

    /// Apply an action.
    ///
    /// Rules, first match wins:
    /// 1. off the grid: stay, -5, `hit_wall`
    /// 2. onto an obstacle: stay, -10, `hit_obstacle`
    /// 3. onto the goal: move, +100, done, `reached_goal`
    /// 4. otherwise: move, -1, `moved`
    pub fn step(&mut self, action: Action) -> Transition {
        let proposed = self
            .agent
            .offset(action.delta())
            .filter(|cell| cell.within(self.rows, self.cols));

        let (reward, done, event) = match proposed {
            None => (rewards::HIT_WALL, false, StepEvent::HitWall),
            Some(cell) if self.obstacles.contains(&cell) => {
                (rewards::HIT_OBSTACLE, false, StepEvent::HitObstacle)
            }
            Some(cell) => {
                self.agent = cell;
                if cell == self.goal {
                    (rewards::REACHED_GOAL, true, StepEvent::ReachedGoal)
                } else {
                    (rewards::MOVED, false, StepEvent::Moved)
                }
            }
        };

        trace!(%action, %event, agent = %self.agent, reward, "step");

        Transition {
            next_state: self.agent,
            reward,
            done,
            event,
        }
    }

    /// Apply a raw action id, failing with [`Error::InvalidAction`] for
    /// anything outside `0..=3`.
    ///
    /// [`Error::InvalidAction`]: crate::Error::InvalidAction
    pub fn step_id(&mut self, action: usize) -> Result<Transition> {
        let action = Action::try_from(action)?;
        Ok(self.step(action))
    }

    /// The greedy-toward-goal baseline action for the current position.
    pub fn greedy_action_towards_goal(&mut self) -> Action {
        let view = GridView {
            rows: self.rows,
            cols: self.cols,
            agent: self.agent,
            goal: self.goal,
            obstacles: &self.obstacles,
        };
        baseline::greedy_action(&view, &mut self.rng)
    }

    /// Uniformly random action drawn from the environment's random source.
    pub fn random_action(&mut self) -> Action {
        *Action::ALL.choose(&mut self.rng).unwrap_or(&Action::Up)
    }

    pub fn view(&self) -> GridView<'_> {
        GridView {
            rows: self.rows,
            cols: self.cols,
            agent: self.agent,
            goal: self.goal,
            obstacles: &self.obstacles,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn agent(&self) -> Position {
        self.agent
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn obstacles(&self) -> &BTreeSet<Position> {
        &self.obstacles
    }

    pub fn mode(&self) -> ObstacleMode {
        self.mode
    }
}
