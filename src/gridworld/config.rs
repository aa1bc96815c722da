//! Construction parameters for [`GridWorld`](super::GridWorld)

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::position::Position;
use crate::{Error, Result};

/// Whether the obstacle layout survives resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleMode {
    /// Generated once and kept until explicitly regenerated.
    #[default]
    Static,
    /// Regenerated on every reset with the same obstacle count.
    Dynamic,
}

impl fmt::Display for ObstacleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObstacleMode::Static => f.write_str("static"),
            ObstacleMode::Dynamic => f.write_str("dynamic"),
        }
    }
}

impl FromStr for ObstacleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(ObstacleMode::Static),
            "dynamic" => Ok(ObstacleMode::Dynamic),
            other => Err(Error::config(format!(
                "unknown obstacle mode '{other}'. Use 'static' or 'dynamic'"
            ))),
        }
    }
}

/// How obstacles are placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleLayout {
    /// Sample this many obstacles uniformly over the free cells.
    Count(usize),
    /// Use exactly these cells.
    Explicit(Vec<Position>),
}

impl Default for ObstacleLayout {
    fn default() -> Self {
        ObstacleLayout::Count(0)
    }
}

/// Grid geometry, obstacle layout and randomness for one experiment
/// condition.
///
/// # Examples
///
/// ```
/// use gridq::gridworld::{GridConfig, ObstacleMode, Position};
///
/// let config = GridConfig::new(7, 7)
///     .with_obstacle_count(8)
///     .with_mode(ObstacleMode::Dynamic)
///     .with_seed(42);
/// assert_eq!(config.goal, Position::new(6, 6));
/// config.validate()?;
/// # Ok::<(), gridq::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub start: Position,
    pub goal: Position,
    #[serde(default)]
    pub obstacles: ObstacleLayout,
    #[serde(default)]
    pub mode: ObstacleMode,
    /// Seed for obstacle placement and the baseline's stuck escape.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GridConfig {
    /// A `rows x cols` grid from the top-left to the bottom-right corner,
    /// with no obstacles.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            start: Position::new(0, 0),
            goal: Position::new(rows.saturating_sub(1), cols.saturating_sub(1)),
            obstacles: ObstacleLayout::default(),
            mode: ObstacleMode::default(),
            seed: None,
        }
    }

    pub fn with_start(mut self, start: impl Into<Position>) -> Self {
        self.start = start.into();
        self
    }

    pub fn with_goal(mut self, goal: impl Into<Position>) -> Self {
        self.goal = goal.into();
        self
    }

    pub fn with_obstacle_count(mut self, count: usize) -> Self {
        self.obstacles = ObstacleLayout::Count(count);
        self
    }

    pub fn with_obstacles<I, P>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        self.obstacles = ObstacleLayout::Explicit(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_mode(mut self, mode: ObstacleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cells that may hold an obstacle: everything except start and goal.
    pub fn usable_cells(&self) -> usize {
        (self.rows * self.cols).saturating_sub(2)
    }

    /// Check the configuration, failing fast with
    /// [`Error::InvalidConfiguration`].
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(Error::config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        for (name, cell) in [("start", self.start), ("goal", self.goal)] {
            if !cell.within(self.rows, self.cols) {
                return Err(Error::config(format!(
                    "{name} {cell} is outside the {}x{} grid",
                    self.rows, self.cols
                )));
            }
        }
        if self.start == self.goal {
            return Err(Error::config(format!(
                "start and goal must differ, both are {}",
                self.start
            )));
        }

        if let ObstacleLayout::Explicit(cells) = &self.obstacles {
            if self.mode == ObstacleMode::Dynamic {
                return Err(Error::config(
                    "dynamic obstacles are regenerated by count; explicit cells need static mode",
                ));
            }
            for &cell in cells {
                if !cell.within(self.rows, self.cols) {
                    return Err(Error::config(format!("obstacle {cell} is outside the grid")));
                }
                if cell == self.start || cell == self.goal {
                    return Err(Error::config(format!(
                        "obstacle {cell} overlaps the start or goal cell"
                    )));
                }
            }
        }

        // Explicit duplicates count once.
        let count = self.obstacle_count();
        let usable = self.usable_cells();
        if count > 0 && count >= usable {
            return Err(Error::config(format!(
                "obstacle count {count} must be below the {usable} usable cells"
            )));
        }
        Ok(())
    }

    /// Number of obstacles the environment maintains.
    pub(crate) fn obstacle_count(&self) -> usize {
        match &self.obstacles {
            ObstacleLayout::Count(count) => *count,
            ObstacleLayout::Explicit(cells) => cells.iter().collect::<BTreeSet<_>>().len(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new(5, 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: Error) -> String {
        match err {
            Error::InvalidConfiguration { message } => message,
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn default_goal_is_bottom_right() {
        let config = GridConfig::new(10, 7);
        assert_eq!(config.start, Position::new(0, 0));
        assert_eq!(config.goal, Position::new(9, 6));
        config.validate().unwrap();
    }

    #[test]
    fn rejects_zero_dimensions() {
        let msg = message(GridConfig::new(0, 5).validate().unwrap_err());
        assert!(msg.contains("positive"));
    }

    #[test]
    fn rejects_out_of_bounds_goal() {
        let config = GridConfig::new(5, 5).with_goal((5, 1));
        assert!(message(config.validate().unwrap_err()).contains("goal"));
    }

    #[test]
    fn rejects_coincident_start_and_goal() {
        let config = GridConfig::new(5, 5).with_goal((0, 0));
        assert!(message(config.validate().unwrap_err()).contains("differ"));
    }

    #[test]
    fn rejects_obstacle_count_at_usable_limit() {
        let config = GridConfig::new(3, 3).with_obstacle_count(7);
        assert!(config.validate().is_err());
        GridConfig::new(3, 3).with_obstacle_count(6).validate().unwrap();
    }

    #[test]
    fn rejects_explicit_obstacles_filling_usable_cells() {
        let config = GridConfig::new(2, 2).with_obstacles([(0, 1), (1, 0)]);
        assert!(message(config.validate().unwrap_err()).contains("usable"));

        // A repeated cell is one obstacle, leaving one usable cell free.
        GridConfig::new(2, 2)
            .with_obstacles([(0, 1), (0, 1)])
            .validate()
            .unwrap();
    }

    #[test]
    fn rejects_explicit_obstacle_on_goal() {
        let config = GridConfig::new(5, 5).with_obstacles([(1, 1), (4, 4)]);
        assert!(message(config.validate().unwrap_err()).contains("overlaps"));
    }

    #[test]
    fn rejects_explicit_obstacles_in_dynamic_mode() {
        let config = GridConfig::new(5, 5)
            .with_obstacles([(1, 1)])
            .with_mode(ObstacleMode::Dynamic);
        assert!(config.validate().is_err());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Dynamic".parse::<ObstacleMode>().unwrap(), ObstacleMode::Dynamic);
        assert!("sometimes".parse::<ObstacleMode>().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GridConfig::new(7, 7)
            .with_obstacles([(1, 1), (2, 3)])
            .with_seed(9);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
