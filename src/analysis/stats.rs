//! Statistical summaries of episodes

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Outcome of one completed or truncated episode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Steps taken before reaching the goal or exhausting the budget
    pub steps: usize,
    /// Sum of rewards over the episode
    pub total_reward: f64,
    /// Whether the goal was reached
    pub success: bool,
}

/// Aggregate over a set of episode records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub episodes: usize,
    pub success_rate: f64,
    pub avg_steps: f64,
    pub avg_reward: f64,
}

/// Arithmetic means over `records`.
///
/// # Errors
///
/// Returns [`Error::EmptyInput`] when `records` is empty.
///
/// # Examples
///
/// ```
/// use gridq::analysis::{EpisodeRecord, summarize};
///
/// let summary = summarize(&[
///     EpisodeRecord { steps: 3, total_reward: 10.0, success: true },
///     EpisodeRecord { steps: 5, total_reward: -2.0, success: false },
/// ])?;
/// assert_eq!(summary.success_rate, 0.5);
/// assert_eq!(summary.avg_steps, 4.0);
/// assert_eq!(summary.avg_reward, 4.0);
/// # Ok::<(), gridq::Error>(())
/// ```
pub fn summarize(records: &[EpisodeRecord]) -> Result<Summary> {
    if records.is_empty() {
        return Err(Error::EmptyInput {
            what: "episode records".to_string(),
        });
    }

    let n = records.len() as f64;
    let successes = records.iter().filter(|r| r.success).count();
    let total_steps: usize = records.iter().map(|r| r.steps).sum();
    let total_reward: f64 = records.iter().map(|r| r.total_reward).sum();

    Ok(Summary {
        episodes: records.len(),
        success_rate: successes as f64 / n,
        avg_steps: total_steps as f64 / n,
        avg_reward: total_reward / n,
    })
}

/// Success rate of each consecutive, non-overlapping window of `window`
/// records. A trailing partial window is dropped.
pub fn windowed_success_rates(records: &[EpisodeRecord], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(Error::config("window size must be positive"));
    }
    Ok(records
        .chunks_exact(window)
        .map(|chunk| chunk.iter().filter(|r| r.success).count() as f64 / window as f64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(steps: usize, total_reward: f64, success: bool) -> EpisodeRecord {
        EpisodeRecord {
            steps,
            total_reward,
            success,
        }
    }

    #[test]
    fn summarize_means() {
        let summary = summarize(&[record(3, 10.0, true), record(5, -2.0, false)]).unwrap();
        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.success_rate, 0.5);
        assert_eq!(summary.avg_steps, 4.0);
        assert_eq!(summary.avg_reward, 4.0);
    }

    #[test]
    fn summarize_empty_is_an_error() {
        assert!(matches!(summarize(&[]), Err(Error::EmptyInput { .. })));
    }

    #[test]
    fn windows_drop_partial_tail() {
        let records = [
            record(1, 0.0, false),
            record(1, 0.0, true),
            record(1, 0.0, true),
            record(1, 0.0, true),
            record(1, 0.0, false),
        ];
        assert_eq!(windowed_success_rates(&records, 2).unwrap(), vec![0.5, 1.0]);
        assert!(windowed_success_rates(&records, 0).is_err());
    }
}
