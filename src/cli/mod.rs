//! CLI infrastructure for the grid-world testbed
//!
//! This module provides the command-line interface for training a
//! Q-learning agent, running the non-learning baselines and comparing
//! policies across grid conditions.

pub mod commands;
pub mod config;
pub mod output;
pub mod render;
