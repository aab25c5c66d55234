//! Minimum-similarity cutoff.

/// Whether a similarity survives the optional cutoff.
///
/// No cutoff passes everything; with a cutoff, only strictly greater
/// values survive. Raising the cutoff can only shrink the surviving set.
pub fn passes(cutoff: Option<f64>, similarity: f64) -> bool {
    match cutoff {
        None => true,
        Some(cutoff) => cutoff < similarity,
    }
}
