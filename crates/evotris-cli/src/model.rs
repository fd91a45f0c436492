use std::{
    fs,
    io::BufReader,
    path::Path,
};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exported result of a training run, loadable by `evotris play`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainedModel {
    pub trained_at: DateTime<Utc>,
    pub board_height: usize,
    pub board_width: usize,
    pub lookahead: bool,
    pub final_fitness: f64,
    pub weights: Vec<f64>,
}

impl TrainedModel {
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = fs::File::open(path)
            .with_context(|| format!("Failed to open model file: {}", path.display()))?;
        let model = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse model file: {}", path.display()))?;
        Ok(model)
    }

    /// Writes the model as pretty-printed JSON to `path`, or to stdout when
    /// no path is given.
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<()> {
        let mut json = serde_json::to_string_pretty(self).context("Failed to serialize model")?;
        json.push('\n');
        match path {
            Some(path) => fs::write(path, json)
                .with_context(|| format!("Failed to write model file: {}", path.display()))?,
            None => print!("{json}"),
        }
        Ok(())
    }
}
