//! Datasets consumed by the downstream plotting stage.
//!
//! Rendering is out of scope; these are the inputs the plots need: a
//! binned similarity distribution and the rank-ordered weighted-degree
//! curve. Both serialize to JSON for external consumers.

use serde::{Deserialize, Serialize};

use crate::constants::HISTOGRAM_BINS;

/// Streaming histogram of similarity values over the fixed cosine range
/// [-1, 1]. Out-of-range values (possible only through rounding at the
/// boundaries) clamp into the edge bins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityHistogram {
    lo: f64,
    hi: f64,
    bins: Vec<u64>,
    observed: u64,
}

impl Default for SimilarityHistogram {
    fn default() -> Self {
        Self::new(HISTOGRAM_BINS)
    }
}

impl SimilarityHistogram {
    pub fn new(bins: usize) -> Self {
        Self {
            lo: -1.0,
            hi: 1.0,
            bins: vec![0; bins.max(1)],
            observed: 0,
        }
    }

    /// Record one similarity value.
    pub fn observe(&mut self, value: f64) {
        let clamped = value.clamp(self.lo, self.hi);
        let width = (self.hi - self.lo) / self.bins.len() as f64;
        let index = (((clamped - self.lo) / width) as usize).min(self.bins.len() - 1);
        self.bins[index] += 1;
        self.observed += 1;
    }

    /// Bin counts, low to high.
    pub fn bins(&self) -> &[u64] {
        &self.bins
    }

    /// Total observations.
    pub fn observed(&self) -> u64 {
        self.observed
    }

    /// (bin midpoint, count) points for plotting.
    pub fn points(&self) -> impl Iterator<Item = (f64, u64)> + '_ {
        let width = (self.hi - self.lo) / self.bins.len() as f64;
        self.bins
            .iter()
            .enumerate()
            .map(move |(i, &count)| (self.lo + width * (i as f64 + 0.5), count))
    }
}

/// Weighted degrees sorted descending; the 0-based position is the rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeDistribution {
    degrees: Vec<f64>,
}

impl DegreeDistribution {
    pub fn new(degrees: Vec<f64>) -> Self {
        debug_assert!(degrees.windows(2).all(|w| w[0] >= w[1]));
        Self { degrees }
    }

    pub fn degrees(&self) -> &[f64] {
        &self.degrees
    }

    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// (rank, weighted degree) points for plotting.
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.degrees.iter().copied().enumerate()
    }
}
