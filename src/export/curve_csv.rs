//! CSV export of per-episode learning curves

use std::{io::Write, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, analysis::EpisodeRecord};

/// Reward and step series of one run, ready to be plotted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCurve {
    pub title: String,
    pub rewards: Vec<f64>,
    pub steps: Vec<usize>,
}

impl LearningCurve {
    pub fn from_records(title: impl Into<String>, records: &[EpisodeRecord]) -> Self {
        Self {
            title: title.into(),
            rewards: records.iter().map(|r| r.total_reward).collect(),
            steps: records.iter().map(|r| r.steps).collect(),
        }
    }

    /// Write `episode,total_reward,steps` rows, one per episode.
    ///
    /// Episodes are numbered from 1.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        if self.rewards.len() != self.steps.len() {
            return Err(Error::config(format!(
                "learning curve '{}' has {} rewards but {} step counts",
                self.title,
                self.rewards.len(),
                self.steps.len()
            )));
        }

        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(["episode", "total_reward", "steps"])?;
        for (i, (reward, steps)) in self.rewards.iter().zip(&self.steps).enumerate() {
            wtr.write_record([
                (i + 1).to_string(),
                reward.to_string(),
                steps.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}
