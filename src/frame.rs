use chrono::NaiveDateTime;
use log::debug;

use crate::calibration::Calibrator;
use crate::dataset::Exposure;
use crate::detector::{DetectorParams, SourceDetector};
use crate::error::TrackingError;
use crate::my_types::*;
use crate::source::SourceObservation;
use crate::timestamp::parse_date_obs;

/// Detected sources of one capture together with its whole-second timestamp.
/// Read-only once built.
#[derive(Clone, Debug)]
pub struct FrameRecord {
    /// position in the input sequence
    pub frame_index: usize,
    pub name: String,
    pub capture_time: NaiveDateTime,
    /// finder output order, the only key used to match sources across frames
    pub sources: Vec<SourceObservation>,
}

impl FrameRecord {
    pub fn new(
        frame_index: usize,
        name: String,
        capture_time: NaiveDateTime,
        centroids: &[Vector2d],
        calibrator: &dyn Calibrator,
    ) -> FrameRecord {
        let sources = centroids
            .iter()
            .map(|&pixel| SourceObservation::new(pixel, calibrator.to_sky(pixel)))
            .collect();
        FrameRecord {
            frame_index,
            name,
            capture_time,
            sources,
        }
    }

    /// Detect, then calibrate, the sources of a loaded exposure.
    pub fn from_exposure(
        frame_index: usize,
        exposure: &Exposure,
        detector: &dyn SourceDetector,
        params: &DetectorParams,
        calibrator: &dyn Calibrator,
    ) -> Result<FrameRecord, TrackingError> {
        let capture_time = parse_date_obs(&exposure.date_obs)?;
        let centroids = detector.detect(exposure, params);
        debug!(
            "{} sources found by {} in {}",
            centroids.len(),
            params.kind,
            exposure.name
        );
        Ok(FrameRecord::new(
            frame_index,
            exposure.name.clone(),
            capture_time,
            &centroids[..centroids.len().min(params.brightest)],
            calibrator,
        ))
    }
}
