use serde::Serialize;

/// Indices of the two frames a report compares. Rates are `last - first`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FramePair {
    pub first: usize,
    pub last: usize,
}

impl FramePair {
    pub fn new(first: usize, last: usize) -> Self {
        FramePair { first, last }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairingMode {
    /// Every `(i, j)` with `i < j`, in lexicographic order.
    AllPairs,
    /// Exactly the given pair. `last < first` is allowed and flips the sign
    /// of every rate.
    Single(FramePair),
}

impl PairingMode {
    /// Single pair mode when both indices are given, all pairs otherwise.
    pub fn from_indices(first: Option<usize>, last: Option<usize>) -> Self {
        match (first, last) {
            (Some(first), Some(last)) => PairingMode::Single(FramePair::new(first, last)),
            _ => PairingMode::AllPairs,
        }
    }

    /// Pairs to analyse for `num_frames` frames. Every call starts over.
    pub fn pairs(&self, num_frames: usize) -> Box<dyn Iterator<Item = FramePair>> {
        match *self {
            PairingMode::AllPairs => Box::new(
                (0..num_frames)
                    .flat_map(move |i| (i + 1..num_frames).map(move |j| FramePair::new(i, j))),
            ),
            PairingMode::Single(pair) => Box::new(std::iter::once(pair)),
        }
    }

    pub fn count(&self, num_frames: usize) -> usize {
        match self {
            PairingMode::AllPairs => num_frames * num_frames.saturating_sub(1) / 2,
            PairingMode::Single(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_three_frames() {
        let pairs: Vec<_> = PairingMode::AllPairs.pairs(3).collect();
        assert_eq!(
            pairs,
            vec![FramePair::new(0, 1), FramePair::new(0, 2), FramePair::new(1, 2)]
        );
    }

    #[test]
    fn test_completeness() {
        for n in 0..12 {
            let mode = PairingMode::AllPairs;
            let pairs: Vec<_> = mode.pairs(n).collect();
            assert_eq!(pairs.len(), n * n.saturating_sub(1) / 2);
            assert_eq!(pairs.len(), mode.count(n));

            let unique: HashSet<_> = pairs.iter().map(|p| (p.first, p.last)).collect();
            assert_eq!(unique.len(), pairs.len());
            for i in 0..n {
                for j in i + 1..n {
                    assert!(unique.contains(&(i, j)));
                }
            }
        }
    }

    #[test]
    fn test_restartable() {
        let mode = PairingMode::AllPairs;
        let first: Vec<_> = mode.pairs(5).collect();
        let second: Vec<_> = mode.pairs(5).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_single_pair() {
        let mode = PairingMode::from_indices(Some(4), Some(1));
        assert_eq!(mode, PairingMode::Single(FramePair::new(4, 1)));
        assert_eq!(mode.pairs(10).collect::<Vec<_>>(), vec![FramePair::new(4, 1)]);
        assert_eq!(mode.count(10), 1);

        assert_eq!(PairingMode::from_indices(Some(4), None), PairingMode::AllPairs);
        assert_eq!(PairingMode::from_indices(None, None), PairingMode::AllPairs);
    }
}
