//! Grid-world navigation testbed with a tabular Q-learning agent
//!
//! This crate provides:
//! - A rectangular grid environment with static or dynamic obstacles and a
//!   fixed reward landscape
//! - A greedy-toward-goal baseline policy
//! - An ε-greedy Q-learning agent with a lazily grown value table
//! - Training, evaluation and comparison pipelines with pluggable observers
//! - Episode statistics and CSV learning-curve export
//!
//! # Examples
//!
//! ```
//! use gridq::{
//!     gridworld::{GridConfig, GridWorld},
//!     pipeline::{evaluate, train},
//!     q_learning::{AgentConfig, QLearningAgent},
//! };
//!
//! let mut env = GridWorld::new(GridConfig::new(4, 4).with_seed(1))?;
//! let mut agent = QLearningAgent::new(AgentConfig::default().with_learning_rate(0.5).with_seed(2))?;
//!
//! let result = train(&mut env, &mut agent, 200, 50)?;
//! assert_eq!(result.records.len(), 200);
//!
//! let summary = evaluate(&mut env, &agent, 10, 50)?;
//! assert_eq!(summary.episodes, 10);
//! # Ok::<(), gridq::Error>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod export;
pub mod gridworld;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use analysis::{EpisodeRecord, Summary, summarize};
pub use error::{Error, Result};
pub use gridworld::{Action, GridConfig, GridWorld, Position, Transition};
pub use q_learning::{AgentConfig, QLearningAgent};
