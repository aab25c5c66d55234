//! Vector sources: the embedding model seen through a narrow trait.
//!
//! The pipeline only ever needs the vocabulary and read access to one
//! vector per identifier, so that is the whole contract. `TsvSource`
//! loads a trained model exported as `id<TAB>c1 c2 ...` lines, plain or
//! gzipped; `InMemorySource` backs tests and embedding.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::info;

use crate::errors::ModelError;

/// Read access to an embedding model.
pub trait VectorSource {
    /// All identifiers known to the model, in no particular order.
    fn vocabulary(&self) -> Vec<String>;

    /// The embedding vector for one identifier.
    fn vector(&self, id: &str) -> Result<Vec<f32>, ModelError>;

    /// Vectors for a batch of identifiers, aligned by input order.
    fn vectors(&self, ids: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        ids.iter().map(|id| self.vector(id)).collect()
    }
}

/// Map-backed vector source.
#[derive(Debug, Default)]
pub struct InMemorySource {
    vectors: HashMap<String, Vec<f32>>,
}

impl InMemorySource {
    pub fn new(vectors: HashMap<String, Vec<f32>>) -> Self {
        Self { vectors }
    }

    pub fn insert(&mut self, id: impl Into<String>, vector: Vec<f32>) {
        self.vectors.insert(id.into(), vector);
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl VectorSource for InMemorySource {
    fn vocabulary(&self) -> Vec<String> {
        self.vectors.keys().cloned().collect()
    }

    fn vector(&self, id: &str) -> Result<Vec<f32>, ModelError> {
        self.vectors
            .get(id)
            .cloned()
            .ok_or_else(|| ModelError::UnknownId { id: id.to_string() })
    }
}

/// Vector source backed by a TSV export of the embedding model.
///
/// Line format: `identifier<TAB>c1 c2 c3 ...` with space-separated float
/// components. Files ending in `.gz` are decompressed on the fly. All
/// vectors must share one dimensionality; the first line sets it.
#[derive(Debug)]
pub struct TsvSource {
    inner: InMemorySource,
    dimensions: usize,
}

impl TsvSource {
    /// Load a model export from `path`.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = File::open(path).map_err(|e| ModelError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Self::from_reader(BufReader::new(reader), &path.display().to_string())
    }

    fn from_reader(reader: impl BufRead, path: &str) -> Result<Self, ModelError> {
        let mut vectors = HashMap::new();
        let mut dimensions = 0usize;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| ModelError::ReadError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
            if line.is_empty() {
                continue;
            }
            let (id, rest) = line.split_once('\t').ok_or_else(|| ModelError::ParseError {
                path: path.to_string(),
                line: line_no,
                message: "missing tab separator".to_string(),
            })?;
            let components = rest
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<f32>().map_err(|e| ModelError::ParseError {
                        path: path.to_string(),
                        line: line_no,
                        message: format!("bad component {tok:?}: {e}"),
                    })
                })
                .collect::<Result<Vec<f32>, ModelError>>()?;
            if components.is_empty() {
                return Err(ModelError::ParseError {
                    path: path.to_string(),
                    line: line_no,
                    message: "empty vector".to_string(),
                });
            }
            if dimensions == 0 {
                dimensions = components.len();
            } else if components.len() != dimensions {
                return Err(ModelError::DimensionMismatch {
                    id: id.to_string(),
                    expected: dimensions,
                    actual: components.len(),
                });
            }
            vectors.insert(id.to_string(), components);
        }

        info!(
            entries = vectors.len(),
            dims = dimensions,
            path,
            "loaded embedding model"
        );

        Ok(Self {
            inner: InMemorySource::new(vectors),
            dimensions,
        })
    }

    /// Dimensionality shared by every vector in the model.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl VectorSource for TsvSource {
    fn vocabulary(&self) -> Vec<String> {
        self.inner.vocabulary()
    }

    fn vector(&self, id: &str) -> Result<Vec<f32>, ModelError> {
        self.inner.vector(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_tab_separated_lines() {
        let data = "CHEBI:1\t1.0 0.0\nCHEBI:2\t0.5 0.5\n";
        let source = TsvSource::from_reader(Cursor::new(data), "<test>").unwrap();
        assert_eq!(source.dimensions(), 2);
        assert_eq!(source.vector("CHEBI:1").unwrap(), vec![1.0, 0.0]);
        let mut vocab = source.vocabulary();
        vocab.sort();
        assert_eq!(vocab, vec!["CHEBI:1", "CHEBI:2"]);
    }

    #[test]
    fn skips_blank_lines() {
        let data = "A\t1.0\n\nB\t2.0\n";
        let source = TsvSource::from_reader(Cursor::new(data), "<test>").unwrap();
        assert_eq!(source.vocabulary().len(), 2);
    }

    #[test]
    fn missing_tab_is_parse_error() {
        let data = "CHEBI:1 1.0 0.0\n";
        let err = TsvSource::from_reader(Cursor::new(data), "<test>").unwrap_err();
        assert!(matches!(err, ModelError::ParseError { line: 1, .. }));
    }

    #[test]
    fn bad_component_is_parse_error() {
        let data = "A\t1.0 oops\n";
        let err = TsvSource::from_reader(Cursor::new(data), "<test>").unwrap_err();
        assert!(matches!(err, ModelError::ParseError { .. }));
    }

    #[test]
    fn inconsistent_dimensions_rejected() {
        let data = "A\t1.0 0.0\nB\t1.0\n";
        let err = TsvSource::from_reader(Cursor::new(data), "<test>").unwrap_err();
        assert!(matches!(
            err,
            ModelError::DimensionMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn batch_lookup_preserves_order() {
        let mut source = InMemorySource::default();
        source.insert("B", vec![2.0]);
        source.insert("A", vec![1.0]);
        let vectors = source
            .vectors(&["A".to_string(), "B".to_string()])
            .unwrap();
        assert_eq!(vectors, vec![vec![1.0], vec![2.0]]);
    }

    #[test]
    fn unknown_id_is_error() {
        let source = InMemorySource::default();
        assert!(matches!(
            source.vector("missing"),
            Err(ModelError::UnknownId { .. })
        ));
    }
}
