use std::fmt;
use std::str::FromStr;

use crate::error::TrackingError;
use crate::frame::FrameRecord;
use crate::source::SourceObservation;

/// How sources of two frames are associated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Correspondence {
    /// The s-th source of one frame is the s-th source of the other.
    #[default]
    Positional,
    /// Each source of the first frame, in order, takes the closest unused
    /// source of the second frame in pixel space.
    NearestNeighbor,
}

/// A source of the first frame, by index, and its counterpart in the second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourcePair<'a> {
    pub source_index: usize,
    pub first: &'a SourceObservation,
    pub last: &'a SourceObservation,
}

impl Correspondence {
    /// Align the sources of `first` and `last`.
    ///
    /// Yields `min(first.sources.len(), last.sources.len())` pairs. Mismatched
    /// counts are not an error, the longer list is truncated.
    pub fn resolve<'a>(
        &self,
        first: &'a FrameRecord,
        last: &'a FrameRecord,
    ) -> Result<Vec<SourcePair<'a>>, TrackingError> {
        for frame in [first, last] {
            if frame.sources.is_empty() {
                return Err(TrackingError::InsufficientSources {
                    frame_index: frame.frame_index,
                });
            }
        }

        let pairs = match self {
            Correspondence::Positional => first
                .sources
                .iter()
                .zip(last.sources.iter())
                .enumerate()
                .map(|(source_index, (first, last))| SourcePair {
                    source_index,
                    first,
                    last,
                })
                .collect(),
            Correspondence::NearestNeighbor => nearest_neighbor(&first.sources, &last.sources),
        };
        Ok(pairs)
    }
}

fn nearest_neighbor<'a>(
    first: &'a [SourceObservation],
    last: &'a [SourceObservation],
) -> Vec<SourcePair<'a>> {
    let k = first.len().min(last.len());
    let mut used = vec![false; last.len()];
    let mut pairs = Vec::with_capacity(k);

    for (source_index, source) in first.iter().enumerate().take(k) {
        let closest = last
            .iter()
            .enumerate()
            .filter(|(j, _)| !used[*j])
            .min_by(|(_, a), (_, b)| {
                let da = (a.pixel - source.pixel).norm_squared();
                let db = (b.pixel - source.pixel).norm_squared();
                da.total_cmp(&db)
            });
        if let Some((j, candidate)) = closest {
            used[j] = true;
            pairs.push(SourcePair {
                source_index,
                first: source,
                last: candidate,
            });
        }
    }
    pairs
}

impl FromStr for Correspondence {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positional" => Ok(Correspondence::Positional),
            "nearest" => Ok(Correspondence::NearestNeighbor),
            _ => Err(TrackingError::UnknownCorrespondence(s.to_string())),
        }
    }
}

impl fmt::Display for Correspondence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correspondence::Positional => f.write_str("positional"),
            Correspondence::NearestNeighbor => f.write_str("nearest"),
        }
    }
}
