use nalgebra as na; 

pub type Vector2d = na::Vector2::<f64>;
pub type Matrix2d = na::Matrix2::<f64>;

/// Arcseconds in one degree
pub const ARCSEC_PER_DEGREE: f64 = 3600.;
