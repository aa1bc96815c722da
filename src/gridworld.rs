//! Grid-world navigation environment

pub mod action;
pub mod baseline;
pub mod config;
pub mod env;
pub mod position;
pub mod transition;

pub use action::Action;
pub use baseline::greedy_action;
pub use config::{GridConfig, ObstacleLayout, ObstacleMode};
pub use env::{GridView, GridWorld};
pub use position::Position;
pub use transition::{StepEvent, Transition, rewards};
