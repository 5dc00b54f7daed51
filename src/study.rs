use anyhow::{Context as AnyhowContext, Result};
use log::{debug, info};
use tracing::instrument;

use crate::calibration::Calibrator;
use crate::correspondence::Correspondence;
use crate::dataset::FrameLoader;
use crate::detector::{DetectorParams, SourceDetector};
use crate::error::TrackingError;
use crate::frame::FrameRecord;
use crate::pairing::PairingMode;
use crate::report::TrackingReport;

/// Outcome of one frame pair. Failures are per pair so the caller can skip or
/// abort.
pub type PairOutcome = Result<TrackingReport, TrackingError>;

/// Build one report per pair selected by `mode`, in enumeration order.
pub fn build_report(
    frames: &[FrameRecord],
    mode: &PairingMode,
    correspondence: Correspondence,
) -> Vec<PairOutcome> {
    mode.pairs(frames.len())
        .map(|pair| TrackingReport::build(frames, pair, correspondence))
        .collect()
}

/// The ordered frame records of a tracking study, built once.
#[derive(Debug)]
pub struct TrackingStudy {
    pub frames: Vec<FrameRecord>,
}

impl TrackingStudy {
    pub fn new(frames: Vec<FrameRecord>) -> Self {
        TrackingStudy { frames }
    }

    /// Load, detect and calibrate every exposure. Frames are indexed in load
    /// order.
    #[instrument(skip_all)]
    pub fn from_loader(
        loader: &mut dyn FrameLoader,
        detector: &dyn SourceDetector,
        params: &DetectorParams,
        calibrator: &dyn Calibrator,
    ) -> Result<Self> {
        let mut frames = vec![];
        while let Some(exposure) = loader.next_exposure()? {
            let frame_index = frames.len();
            let frame = FrameRecord::from_exposure(frame_index, &exposure, detector, params, calibrator)
                .with_context(|| format!("Failed to build frame {} ({})", frame_index, exposure.name))?;
            debug!("frame {} at {} with {} sources", frame_index, frame.capture_time, frame.sources.len());
            frames.push(frame);
        }
        info!("Loaded {} frames", frames.len());
        Ok(TrackingStudy::new(frames))
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[instrument(skip(self))]
    pub fn build_report(&self, mode: &PairingMode, correspondence: Correspondence) -> Vec<PairOutcome> {
        build_report(&self.frames, mode, correspondence)
    }
}
