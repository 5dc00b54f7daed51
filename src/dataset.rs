use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use anyhow::{bail, Context as AnyhowContext, Result};
use serde::Deserialize;

/// One capture as delivered by a frame loader: its observation time and the
/// centroid lists each star finder reported, in finder output order.
#[derive(Clone, Debug, Deserialize)]
pub struct Exposure {
    pub name: String,
    pub date_obs: String,
    #[serde(default)]
    pub detections: HashMap<String, Vec<[f64; 2]>>,
}

pub trait FrameLoader {
    /// Next exposure of the sequence, `None` once exhausted.
    fn next_exposure(&mut self) -> Result<Option<Exposure>>;
}

/// Exposures stored one JSON object per line.
pub struct JsonlDataset {
    reader: BufReader<File>,
    line: String,
    line_number: usize,
}

impl JsonlDataset {
    pub fn new(path: &Path) -> Result<JsonlDataset> {
        let file = File::open(path).context(format!("Failed to open dataset {}", path.display()))?;
        Ok(JsonlDataset {
            reader: BufReader::new(file),
            line: String::new(),
            line_number: 0,
        })
    }
}

impl FrameLoader for JsonlDataset {
    fn next_exposure(&mut self) -> Result<Option<Exposure>> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return Ok(None),
                Err(err) => bail!("Failed to read line {}: {}", self.line_number + 1, err),
                _ => {}
            }
            self.line_number += 1;

            if self.line.trim().is_empty() {
                continue;
            }

            let exposure: Exposure = serde_json::from_str(&self.line).context(format!(
                "JSON deserialization failed for line {}: {}",
                self.line_number,
                self.line.trim_end()
            ))?;
            return Ok(Some(exposure));
        }
    }
}
