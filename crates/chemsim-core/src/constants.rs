/// Chemsim version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifier prefixes selecting chemical entries from the vocabulary.
pub const CHEMICAL_PREFIXES: [&str; 4] = ["CHEMBL", "CHEBI", "DRUGBANK", "PUBCHEM"];

/// Decimal places for emitted similarity values.
pub const DEFAULT_PRECISION: u32 = 3;

/// Upper bound on configurable precision; f64 carries no more decimal digits.
pub const MAX_PRECISION: u32 = 12;

/// Number of bins in the similarity histogram.
pub const HISTOGRAM_BINS: usize = 100;

/// Condensed-index chunk size for the parallel pairwise path.
pub const DEFAULT_CHUNK_SIZE: usize = 65_536;
