//! The four movement actions

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Movement action with a fixed id mapping:
/// 0 = up, 1 = down, 2 = left, 3 = right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in ascending id order.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    pub const fn id(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// `(row, col)` delta applied by this action.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        }
    }

    /// Parse a list of raw action ids, failing on the first invalid one.
    pub fn parse_ids(ids: &[usize]) -> Result<Vec<Action>> {
        ids.iter().map(|&id| Action::try_from(id)).collect()
    }
}

impl TryFrom<usize> for Action {
    type Error = Error;

    fn try_from(id: usize) -> Result<Self> {
        Action::ALL
            .get(id)
            .copied()
            .ok_or(Error::InvalidAction { action: id })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "up" | "u" => Ok(Action::Up),
            "down" | "d" => Ok(Action::Down),
            "left" | "l" => Ok(Action::Left),
            "right" | "r" => Ok(Action::Right),
            other => other
                .parse::<usize>()
                .map_err(|_| Error::config(format!("unknown action '{s}'")))
                .and_then(Action::try_from),
        }
    }
}
