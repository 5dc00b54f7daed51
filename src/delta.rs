use serde::Serialize;

use crate::correspondence::Correspondence;
use crate::error::TrackingError;
use crate::frame::FrameRecord;
use crate::my_types::*;
use crate::source::SourceObservation;
use crate::timestamp;

/// Time normalised change of one source between two captures.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DriftRate {
    /// arcsec/s
    pub d_ra: f64,
    /// arcsec/s
    pub d_dec: f64,
    /// pixels/s
    pub d_px: f64,
    /// pixels/s
    pub d_py: f64,
}

impl DriftRate {
    pub fn as_array(&self) -> [f64; 4] {
        [self.d_ra, self.d_dec, self.d_px, self.d_py]
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        let [d_ra, d_dec, d_px, d_py] = values;
        DriftRate { d_ra, d_dec, d_px, d_py }
    }
}

/// Whole seconds from `first` to `last` when `first` precedes `last` in the
/// sequence, negated otherwise. Swapping the arguments negates every rate
/// while a forward pair keeps `t_last - t_first` even for out of order
/// timestamps.
///
/// Fails when both captures carry the same truncated timestamp.
pub fn elapsed_seconds(first: &FrameRecord, last: &FrameRecord) -> Result<f64, TrackingError> {
    let elapsed = timestamp::elapsed_seconds(&first.capture_time, &last.capture_time);
    let elapsed = if last.frame_index >= first.frame_index { elapsed } else { -elapsed };
    if elapsed == 0. {
        return Err(TrackingError::DegenerateTimeDelta {
            first: first.frame_index,
            last: last.frame_index,
        });
    }
    Ok(elapsed)
}

/// `(last - first) / elapsed`, with the sky axes in arcsec.
///
/// RA differences are taken as is, a source crossing RA = 0 between the two
/// captures shows a jump of 360 degrees.
pub fn source_drift(first: &SourceObservation, last: &SourceObservation, elapsed: f64) -> DriftRate {
    let pixel = (last.pixel - first.pixel) / elapsed;
    DriftRate {
        d_ra: (last.sky.ra_deg - first.sky.ra_deg) / elapsed * ARCSEC_PER_DEGREE,
        d_dec: (last.sky.dec_deg - first.sky.dec_deg) / elapsed * ARCSEC_PER_DEGREE,
        d_px: pixel.x,
        d_py: pixel.y,
    }
}

/// Drift of every corresponded source from `first` to `last`, keyed by the
/// source index in `first`.
///
/// The result is `frame[last] - frame[first]`: swapping the arguments negates
/// every rate.
pub fn drift_rates(
    first: &FrameRecord,
    last: &FrameRecord,
    correspondence: Correspondence,
) -> Result<Vec<(usize, DriftRate)>, TrackingError> {
    let elapsed = elapsed_seconds(first, last)?;
    let pairs = correspondence.resolve(first, last)?;
    Ok(pairs
        .iter()
        .map(|pair| (pair.source_index, source_drift(pair.first, pair.last, elapsed)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::SkyCoord;
    use crate::timestamp::parse_date_obs;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn frame(frame_index: usize, date_obs: &str, sources: Vec<SourceObservation>) -> FrameRecord {
        FrameRecord {
            frame_index,
            name: format!("capture_{:03}", frame_index),
            capture_time: parse_date_obs(date_obs).unwrap(),
            sources,
        }
    }

    fn observation(px: f64, py: f64, ra: f64, dec: f64) -> SourceObservation {
        SourceObservation::new(Vector2d::new(px, py), SkyCoord::new(ra, dec))
    }

    fn random_frame<R: Rng>(rng: &mut R, frame_index: usize, date_obs: &str) -> FrameRecord {
        let sources = (0..10)
            .map(|_| {
                observation(
                    rng.gen_range(0.0..4000.0),
                    rng.gen_range(0.0..3000.0),
                    rng.gen_range(0.0..360.0),
                    rng.gen_range(-90.0..90.0),
                )
            })
            .collect();
        frame(frame_index, date_obs, sources)
    }

    #[test]
    fn test_one_arcsec_per_second() {
        let f0 = frame(0, "2023-01-25T01:10:00", vec![observation(100., 200., 10., 20.)]);
        let f1 = frame(1, "2023-01-25T01:10:10", vec![observation(110., 200., 10.002778, 20.)]);
        let rates = drift_rates(&f0, &f1, Correspondence::Positional).unwrap();
        assert_eq!(rates.len(), 1);
        let (index, rate) = rates[0];
        assert_eq!(index, 0);
        assert_abs_diff_eq!(rate.d_ra, 1.0, epsilon = 1e-3);
        assert_eq!(rate.d_dec, 0.);
        assert_eq!(rate.d_px, 1.);
        assert_eq!(rate.d_py, 0.);
    }

    #[test]
    fn test_units() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let f0 = random_frame(&mut rng, 0, "2023-01-25T01:10:00.5");
        let f1 = random_frame(&mut rng, 1, "2023-01-25T01:12:37.1");
        let elapsed = 157.;
        for (index, rate) in drift_rates(&f0, &f1, Correspondence::Positional).unwrap() {
            let (a, b) = (&f0.sources[index], &f1.sources[index]);
            assert_abs_diff_eq!(rate.d_ra, (b.sky.ra_deg - a.sky.ra_deg) / elapsed * 3600., epsilon = 1e-9);
            assert_abs_diff_eq!(rate.d_dec, (b.sky.dec_deg - a.sky.dec_deg) / elapsed * 3600., epsilon = 1e-9);
            assert_abs_diff_eq!(rate.d_px, (b.pixel.x - a.pixel.x) / elapsed, epsilon = 1e-12);
            assert_abs_diff_eq!(rate.d_py, (b.pixel.y - a.pixel.y) / elapsed, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_sign_symmetry() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..20 {
            let f0 = random_frame(&mut rng, 0, "2023-01-25T01:10:00");
            let f1 = random_frame(&mut rng, 1, "2023-01-25T02:00:13");
            let forward = drift_rates(&f0, &f1, Correspondence::Positional).unwrap();
            let backward = drift_rates(&f1, &f0, Correspondence::Positional).unwrap();
            for ((i, a), (j, b)) in forward.iter().zip(backward.iter()) {
                assert_eq!(i, j);
                assert_eq!(a.d_ra, -b.d_ra);
                assert_eq!(a.d_dec, -b.d_dec);
                assert_eq!(a.d_px, -b.d_px);
                assert_eq!(a.d_py, -b.d_py);
            }
        }
    }

    #[test]
    fn test_out_of_order_timestamps() {
        // frame 1 was captured ten seconds before frame 0
        let f0 = frame(0, "2023-01-25T01:10:10", vec![observation(110., 200., 10.002778, 20.)]);
        let f1 = frame(1, "2023-01-25T01:10:00", vec![observation(100., 200., 10., 20.)]);
        assert_eq!(elapsed_seconds(&f0, &f1), Ok(-10.));
        assert_eq!(elapsed_seconds(&f1, &f0), Ok(10.));

        let forward = drift_rates(&f0, &f1, Correspondence::Positional).unwrap();
        assert_eq!(forward[0].1.d_px, 1.);
        assert_abs_diff_eq!(forward[0].1.d_ra, 1.0, epsilon = 1e-3);

        let backward = drift_rates(&f1, &f0, Correspondence::Positional).unwrap();
        assert_eq!(backward[0].1.d_px, -1.);
        assert_eq!(backward[0].1.d_ra, -forward[0].1.d_ra);
    }

    #[test]
    fn test_as_array_order() {
        let rate = DriftRate::from_array([1., 2., 3., 4.]);
        assert_eq!(rate.d_dec, 2.);
        assert_eq!(rate.as_array(), [1., 2., 3., 4.]);
    }

    #[test]
    fn test_degenerate_time() {
        let f0 = frame(2, "2023-01-25T01:10:00.1", vec![observation(0., 0., 0., 0.)]);
        let f1 = frame(5, "2023-01-25T01:10:00.9", vec![observation(1., 1., 1., 1.)]);
        assert_eq!(
            drift_rates(&f0, &f1, Correspondence::Positional),
            Err(TrackingError::DegenerateTimeDelta { first: 2, last: 5 })
        );
    }

    #[test]
    fn test_degenerate_time_wins_over_empty_frame() {
        let f0 = frame(0, "2023-01-25T01:10:00", vec![]);
        let f1 = frame(1, "2023-01-25T01:10:00", vec![]);
        assert!(matches!(
            drift_rates(&f0, &f1, Correspondence::Positional),
            Err(TrackingError::DegenerateTimeDelta { .. })
        ));
    }

    #[test]
    fn test_truncated_count() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let f0 = random_frame(&mut rng, 0, "2023-01-25T01:10:00");
        let mut f1 = random_frame(&mut rng, 1, "2023-01-25T01:10:30");
        f1.sources.truncate(7);
        let rates = drift_rates(&f0, &f1, Correspondence::Positional).unwrap();
        assert_eq!(rates.len(), 7);
    }
}
