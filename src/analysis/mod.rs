//! Episode records and summary statistics

pub mod stats;

pub use stats::{EpisodeRecord, Summary, summarize, windowed_success_rates};
