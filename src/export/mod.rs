//! Export functionality for analysis and plotting
//!
//! Learning curves are written as CSV so an external plotting tool can
//! draw reward and step-count series per episode.

mod curve_csv;

pub use curve_csv::LearningCurve;
