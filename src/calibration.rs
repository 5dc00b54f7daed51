use std::fmt::Debug;

use crate::my_types::*;

/// Equatorial coordinates in degrees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkyCoord {
    pub ra_deg: f64,
    pub dec_deg: f64,
}

impl SkyCoord {
    pub fn new(ra_deg: f64, dec_deg: f64) -> Self {
        Self { ra_deg, dec_deg }
    }
}

/// Pixel to sky mapping shared read-only by every frame of a study.
pub trait Calibrator: Debug {
    /// Map a 0-based pixel position to equatorial coordinates.
    fn to_sky(&self, pixel: Vector2d) -> SkyCoord;

    /// Plate scale along the first image axis in arcsec per pixel.
    fn pixel_scale(&self) -> f64;
}
