//! Tabular Q-learning
//!
//! One-step, off-policy temporal-difference control over the grid's
//! `(position, action)` pairs:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α · (r + γ · max_a' Q(s',a') − Q(s,a))
//! ```
//!
//! The table grows lazily. Unseen pairs read as 0.0 and are never inserted
//! by a read.
//!
//! ## Usage Example
//!
//! ```
//! use gridq::gridworld::{Action, Position};
//! use gridq::q_learning::{AgentConfig, QLearningAgent};
//!
//! let mut agent = QLearningAgent::new(
//!     AgentConfig::default()
//!         .with_learning_rate(1.0)
//!         .with_discount_factor(0.0)
//!         .with_seed(7),
//! )?;
//!
//! let s = Position::new(0, 0);
//! agent.update(s, Action::Right, -1.0, Position::new(0, 1));
//! assert_eq!(agent.get_q(s, Action::Right), -1.0);
//! assert_eq!(agent.best_action(s), Action::Up);
//! # Ok::<(), gridq::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod q_table;

pub use agent::QLearningAgent;
pub use config::AgentConfig;
pub use q_table::QTable;
