use clap::Parser;

use crate::correspondence::Correspondence;
use crate::detector::{DetectorKind, DetectorParams};
use crate::error::TrackingError;
use crate::pairing::PairingMode;

#[derive(Debug, Clone)]
#[derive(Parser)]
pub struct Config {
    /// study title shown in the banner
    #[clap(long, default_value = "Tracking Study")]
    pub title: String,

    /// star finder whose detections are used, DAO or IRAF
    #[clap(long, default_value = "DAO")]
    pub finder: String,

    /// maximum number of sources kept per frame
    #[clap(long, default_value = "10")]
    pub brightest: usize,

    /// first capture of a single pair, requires --last
    #[clap(long, requires = "last")]
    pub first: Option<usize>,

    /// last capture of a single pair, requires --first
    #[clap(long, requires = "first")]
    pub last: Option<usize>,

    /// source matching across frames, positional or nearest
    #[clap(long, default_value = "positional")]
    pub matching: String,

    /// print reports as JSON
    #[clap(long)]
    pub json: bool,
}

impl Config {
    pub fn detector_params(&self) -> Result<DetectorParams, TrackingError> {
        Ok(DetectorParams {
            kind: self.finder.parse::<DetectorKind>()?,
            brightest: self.brightest,
        })
    }

    pub fn pairing_mode(&self) -> PairingMode {
        PairingMode::from_indices(self.first, self.last)
    }

    pub fn correspondence(&self) -> Result<Correspondence, TrackingError> {
        self.matching.parse()
    }
}
