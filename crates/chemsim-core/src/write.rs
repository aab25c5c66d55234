//! Streaming gzip writer for the similarity edge list.
//!
//! One `left<TAB>right<TAB>similarity` record per line, no header. The
//! uncompressed table runs to multiple gigabytes at full vocabulary, so
//! records go straight through a buffered gzip encoder; at no point is
//! more than one triple held.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::{debug, warn};

use crate::errors::WriteError;

/// Format a similarity for the edge list.
///
/// Fixed `precision` decimals with trailing zeros trimmed, keeping at
/// least one decimal place (`1.0`, `0.25`, `-0.333`). Precision 0 emits
/// bare integers.
pub fn format_similarity(value: f64, precision: u32) -> String {
    if precision == 0 {
        return format!("{value:.0}");
    }
    let mut text = format!("{value:.prec$}", prec = precision as usize);
    while text.ends_with('0') && !text.ends_with(".0") {
        text.pop();
    }
    text
}

/// Streaming writer producing the gzipped TSV edge list.
#[derive(Debug)]
pub struct EdgeListWriter {
    encoder: GzEncoder<BufWriter<File>>,
    path: PathBuf,
    records: u64,
}

impl EdgeListWriter {
    /// Create or truncate the destination file.
    pub fn create(path: &Path) -> Result<Self, WriteError> {
        let file = File::create(path).map_err(|source| WriteError::Create {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            encoder: GzEncoder::new(BufWriter::new(file), Compression::default()),
            path: path.to_path_buf(),
            records: 0,
        })
    }

    /// Append one edge record.
    pub fn write_edge(
        &mut self,
        left: &str,
        right: &str,
        similarity: &str,
    ) -> Result<(), WriteError> {
        writeln!(self.encoder, "{left}\t{right}\t{similarity}").map_err(|source| {
            WriteError::Io {
                path: self.path.display().to_string(),
                source,
            }
        })?;
        self.records += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Flush the gzip trailer and close the file. Required for the
    /// artifact to be a valid gzip stream, even with zero records.
    pub fn finish(self) -> Result<u64, WriteError> {
        let path = self.path;
        let records = self.records;
        self.encoder
            .finish()
            .and_then(|mut inner| inner.flush().map(|()| inner))
            .map_err(|source| WriteError::Finish {
                path: path.display().to_string(),
                source,
            })?;
        debug!(records, path = %path.display(), "edge list finalized");
        Ok(records)
    }

    /// Drop the writer and remove the partial file. Called on fatal
    /// errors so an incomplete artifact never looks complete.
    pub fn discard(self) {
        let path = self.path;
        drop(self.encoder);
        if let Err(e) = std::fs::remove_file(&path) {
            warn!(path = %path.display(), error = %e, "could not remove partial output");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn read_gz(path: &Path) -> String {
        let mut text = String::new();
        GzDecoder::new(File::open(path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        text
    }

    #[test]
    fn formats_match_emitted_precision() {
        assert_eq!(format_similarity(1.0, 3), "1.0");
        assert_eq!(format_similarity(0.0, 3), "0.0");
        assert_eq!(format_similarity(0.25, 3), "0.25");
        assert_eq!(format_similarity(-0.333, 3), "-0.333");
        assert_eq!(format_similarity(0.5, 1), "0.5");
        assert_eq!(format_similarity(1.0, 0), "1");
    }

    #[test]
    fn writes_tab_separated_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.tsv.gz");
        let mut writer = EdgeListWriter::create(&path).unwrap();
        writer.write_edge("A", "B", "1.0").unwrap();
        writer.write_edge("A", "C", "0.0").unwrap();
        assert_eq!(writer.finish().unwrap(), 2);
        assert_eq!(read_gz(&path), "A\tB\t1.0\nA\tC\t0.0\n");
    }

    #[test]
    fn zero_records_is_a_valid_gzip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv.gz");
        let writer = EdgeListWriter::create(&path).unwrap();
        assert_eq!(writer.finish().unwrap(), 0);
        assert_eq!(read_gz(&path), "");
    }

    #[test]
    fn discard_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.tsv.gz");
        let mut writer = EdgeListWriter::create(&path).unwrap();
        writer.write_edge("A", "B", "0.5").unwrap();
        writer.discard();
        assert!(!path.exists());
    }

    #[test]
    fn create_fails_for_missing_directory() {
        let err = EdgeListWriter::create(Path::new("/nonexistent/dir/out.tsv.gz")).unwrap_err();
        assert!(matches!(err, WriteError::Create { .. }));
    }
}
