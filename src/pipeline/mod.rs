//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training a Q-learning agent on a grid condition
//! - Evaluating learned and baseline policies
//! - Comparing policies across conditions
//! - Recording observations during runs

pub mod comparison;
pub mod observers;
pub mod policies;
pub mod training;

pub use comparison::{
    ComparisonConfig, ComparisonFramework, ComparisonReport, Condition, ConditionResult,
    reference_conditions,
};
// Re-export observer implementations (adapters)
pub use observers::{
    JsonlObserver, LearningCurveObserver, MetricsObserver, Observation, ProgressObserver,
    StepObservation,
};
// Re-export policy implementations (adapters)
pub use policies::{ExploitPolicy, GreedyPolicy, RandomPolicy, ScriptedPolicy};
pub use training::{
    TrainingConfig, TrainingPipeline, TrainingResult, evaluate, run_episode, train,
};

pub use crate::ports::{Observer, Policy};
