use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::dataset::Exposure;
use crate::error::TrackingError;
use crate::my_types::*;

/// Star finding algorithm.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorKind {
    Dao,
    Iraf,
}

impl DetectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorKind::Dao => "DAO",
            DetectorKind::Iraf => "IRAF",
        }
    }
}

impl FromStr for DetectorKind {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAO" => Ok(DetectorKind::Dao),
            "IRAF" => Ok(DetectorKind::Iraf),
            _ => Err(TrackingError::UnknownDetector(s.to_string())),
        }
    }
}

impl fmt::Display for DetectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct DetectorParams {
    pub kind: DetectorKind,
    /// keep at most this many sources, in finder output order
    pub brightest: usize,
}

impl Default for DetectorParams {
    fn default() -> Self {
        DetectorParams {
            kind: DetectorKind::Dao,
            brightest: 10,
        }
    }
}

pub trait SourceDetector {
    /// Centroids of the point sources in `exposure`, brightest first.
    fn detect(&self, exposure: &Exposure, params: &DetectorParams) -> Vec<Vector2d>;
}

/// Replays the centroid lists a star finder already recorded in the exposure.
#[derive(Debug, Default)]
pub struct RecordedDetector;

impl SourceDetector for RecordedDetector {
    fn detect(&self, exposure: &Exposure, params: &DetectorParams) -> Vec<Vector2d> {
        let Some(centroids) = exposure.detections.get(params.kind.as_str()) else {
            warn!("No {} detections recorded for {}", params.kind, exposure.name);
            return vec![];
        };
        centroids
            .iter()
            .take(params.brightest)
            .map(|c| Vector2d::new(c[0], c[1]))
            .collect()
    }
}
