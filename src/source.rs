use crate::calibration::SkyCoord;
use crate::my_types::*;

/// A detected point source. Its identity is its position in the parent
/// frame's source list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceObservation {
    pub pixel: Vector2d,
    pub sky: SkyCoord,
}

impl SourceObservation {
    pub fn new(pixel: Vector2d, sky: SkyCoord) -> Self {
        SourceObservation { pixel, sky }
    }
}
