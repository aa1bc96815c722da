//! Ports (trait boundaries) between the core loop and its collaborators.
//!
//! The training/evaluation loop only talks to policies and observers
//! through these traits; concrete adapters live in [`crate::pipeline`].

pub mod observer;
pub mod policy;

pub use observer::{Observer, RunKind};
pub use policy::Policy;
