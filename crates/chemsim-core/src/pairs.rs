//! The pairwise similarity engine and the condensed pair index it walks.
//!
//! All C(N,2) unordered pairs are enumerated in canonical order (`i`
//! outer, `j = i+1..N`) without materializing an N×N or condensed
//! matrix: the sequential stream is a cursor over the pair index, and
//! the parallel stream computes bounded chunks of condensed indices
//! with rayon, re-emitting them in canonical order. Either way the
//! engine holds only the N unit-normalized vectors.

use rayon::prelude::*;

use crate::errors::SimilarityError;

/// Number of unordered pairs over `n` items.
pub fn pair_count(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Map a condensed pair index `k` back to its `(i, j)` pair, `i < j < n`.
///
/// Inverse of the canonical enumeration: row `i` holds the `n - 1 - i`
/// pairs `(i, i+1) .. (i, n-1)`, rows in order. Solved with a float
/// square root and an integer fixup, exact for any `n` that fits memory.
pub fn unrank(k: u64, n: usize) -> (usize, usize) {
    let total = pair_count(n);
    debug_assert!(k < total, "condensed index {k} out of range for n={n}");

    // r = pairs remaining from k onward; row i satisfies
    // C(m-1,2) < r <= C(m,2) with m = n - i.
    let r = total - k;
    let mut m = ((1.0 + (1.0 + 8.0 * r as f64).sqrt()) / 2.0).ceil() as u64;
    while m * (m - 1) / 2 >= r + (m - 1) {
        m -= 1;
    }
    while m * (m - 1) / 2 < r {
        m += 1;
    }

    let i = n - m as usize;
    let row_start = total - m * (m - 1) / 2;
    let j = i + 1 + (k - row_start) as usize;
    (i, j)
}

/// Round a similarity to `precision` decimal places.
///
/// Idempotent at a fixed precision; `-0.0` normalizes to `0.0`.
pub fn round_similarity(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// One surviving comparison: `left` precedes `right` in the ordered
/// identifier sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityTriple<'a> {
    pub left: &'a str,
    pub right: &'a str,
    pub similarity: f64,
}

/// Pairwise cosine similarity over an ordered identifier sequence.
///
/// Construction validates dimensions, rejects zero-norm vectors (cosine
/// is undefined there, and failing before any output exists beats
/// emitting NaN), and unit-normalizes every vector in `f64`. Each pair
/// similarity is then a plain dot product, clamped to [-1, 1] and
/// rounded to the configured precision at emission.
#[derive(Debug)]
pub struct PairwiseEngine {
    ids: Vec<String>,
    unit: Vec<Vec<f64>>,
    precision: u32,
}

impl PairwiseEngine {
    pub fn new(
        ids: Vec<String>,
        vectors: Vec<Vec<f32>>,
        precision: u32,
    ) -> Result<Self, SimilarityError> {
        debug_assert_eq!(ids.len(), vectors.len());
        let dims = vectors.first().map(Vec::len).unwrap_or(0);
        let mut unit = Vec::with_capacity(vectors.len());

        for (id, vector) in ids.iter().zip(&vectors) {
            if vector.len() != dims {
                return Err(SimilarityError::DimensionMismatch {
                    id: id.clone(),
                    expected: dims,
                    actual: vector.len(),
                });
            }
            let mut squared = 0.0f64;
            for &c in vector {
                squared += (c as f64) * (c as f64);
            }
            let norm = squared.sqrt();
            if norm < f64::EPSILON {
                return Err(SimilarityError::UndefinedSimilarity { id: id.clone() });
            }
            unit.push(vector.iter().map(|&c| c as f64 / norm).collect());
        }

        Ok(Self {
            ids,
            unit,
            precision,
        })
    }

    /// Number of identifiers in the sequence.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The ordered identifier sequence.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// C(N,2), the exact number of triples either stream will emit.
    pub fn pair_count(&self) -> u64 {
        pair_count(self.ids.len())
    }

    /// Cosine similarity of pair `(i, j)`, rounded for emission.
    fn similarity_at(&self, i: usize, j: usize) -> f64 {
        let dot: f64 = self.unit[i]
            .iter()
            .zip(&self.unit[j])
            .map(|(a, b)| a * b)
            .sum();
        round_similarity(dot.clamp(-1.0, 1.0), self.precision)
    }

    fn triple(&self, i: usize, j: usize, similarity: f64) -> SimilarityTriple<'_> {
        SimilarityTriple {
            left: &self.ids[i],
            right: &self.ids[j],
            similarity,
        }
    }

    /// Lazy sequential stream over all pairs in canonical order.
    pub fn stream(&self) -> SimilarityStream<'_> {
        SimilarityStream {
            engine: self,
            i: 0,
            j: 1,
        }
    }

    /// Parallel stream: condensed-index chunks of `chunk_size` computed
    /// with rayon, emitted in canonical order. Memory is bounded by one
    /// chunk of `(i, j, similarity)` entries.
    pub fn par_stream(&self, chunk_size: usize) -> ParSimilarityStream<'_> {
        ParSimilarityStream {
            engine: self,
            next_k: 0,
            total: self.pair_count(),
            chunk_size: chunk_size.max(1),
            buffer: Vec::new().into_iter(),
        }
    }
}

/// Cursor over the pair index, yielding one triple at a time.
pub struct SimilarityStream<'a> {
    engine: &'a PairwiseEngine,
    i: usize,
    j: usize,
}

impl<'a> Iterator for SimilarityStream<'a> {
    type Item = SimilarityTriple<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.engine.len();
        if self.j >= n {
            self.i += 1;
            self.j = self.i + 1;
        }
        if self.i + 1 >= n || self.j >= n {
            return None;
        }
        let (i, j) = (self.i, self.j);
        self.j += 1;
        Some(self.engine.triple(i, j, self.engine.similarity_at(i, j)))
    }
}

/// Chunked parallel stream; same sequence as [`SimilarityStream`].
pub struct ParSimilarityStream<'a> {
    engine: &'a PairwiseEngine,
    next_k: u64,
    total: u64,
    chunk_size: usize,
    buffer: std::vec::IntoIter<(usize, usize, f64)>,
}

impl ParSimilarityStream<'_> {
    fn refill(&mut self) {
        let end = (self.next_k + self.chunk_size as u64).min(self.total);
        let n = self.engine.len();
        // into_par_iter over a range collects in index order, so the
        // canonical order survives the parallel map.
        let chunk: Vec<(usize, usize, f64)> = (self.next_k..end)
            .into_par_iter()
            .map(|k| {
                let (i, j) = unrank(k, n);
                (i, j, self.engine.similarity_at(i, j))
            })
            .collect();
        self.next_k = end;
        self.buffer = chunk.into_iter();
    }
}

impl<'a> Iterator for ParSimilarityStream<'a> {
    type Item = SimilarityTriple<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.len() == 0 {
            if self.next_k >= self.total {
                return None;
            }
            self.refill();
        }
        self.buffer
            .next()
            .map(|(i, j, similarity)| self.engine.triple(i, j, similarity))
    }
}
