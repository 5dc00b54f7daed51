use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context as AnyhowContext, Result};
use serde::Deserialize;

use crate::calibration::*;
use crate::my_types::*;

/// Keywords of a gnomonic (`RA---TAN`/`DEC--TAN`) WCS header.
#[derive(Debug, Deserialize)]
struct TanHeader {
    crval: [f64; 2],
    crpix: [f64; 2],
    cd: [[f64; 2]; 2],
}

/// FITS gnomonic projection.
#[derive(Debug, Clone)]
pub struct TanProjection {
    /// sky position of the reference pixel in degrees
    pub crval: Vector2d,
    /// 1-based reference pixel
    pub crpix: Vector2d,
    /// degrees per pixel
    pub cd: Matrix2d,
}

impl TanProjection {
    pub fn new(crval: Vector2d, crpix: Vector2d, cd: Matrix2d) -> Self {
        TanProjection { crval, crpix, cd }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open WCS file {}", path.display()))?;
        let header: TanHeader = serde_json::from_reader(BufReader::new(file))
            .context(format!("Failed to parse WCS file {}", path.display()))?;
        Ok(Self::from(header))
    }
}

impl From<TanHeader> for TanProjection {
    fn from(header: TanHeader) -> Self {
        TanProjection::new(
            Vector2d::new(header.crval[0], header.crval[1]),
            Vector2d::new(header.crpix[0], header.crpix[1]),
            Matrix2d::new(header.cd[0][0], header.cd[0][1], header.cd[1][0], header.cd[1][1]),
        )
    }
}

impl Calibrator for TanProjection {
    fn to_sky(&self, pixel: Vector2d) -> SkyCoord {
        // FITS pixels are 1-based, centroids are 0-based
        let offset = pixel + Vector2d::new(1., 1.) - self.crpix;
        let plane = self.cd * offset;
        let xi = plane[0].to_radians();
        let eta = plane[1].to_radians();

        let ra0 = self.crval[0].to_radians();
        let dec0 = self.crval[1].to_radians();
        let denom = dec0.cos() - eta * dec0.sin();
        let ra = ra0 + xi.atan2(denom);
        let dec = (eta * dec0.cos() + dec0.sin()).atan2((xi * xi + denom * denom).sqrt());

        SkyCoord::new(ra.to_degrees().rem_euclid(360.), dec.to_degrees())
    }

    fn pixel_scale(&self) -> f64 {
        self.cd.column(0).norm() * ARCSEC_PER_DEGREE
    }
}
