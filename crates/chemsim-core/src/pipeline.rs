//! The end-to-end similarity run.
//!
//! Select identifiers, stream every pairwise similarity once, tee the
//! surviving triples into the gzipped edge list and the degree
//! accumulator, and hand back the summary datasets. Fatal errors abort
//! immediately; a partially written output file is removed so it can
//! never pass for a complete artifact.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CalculateConfig;
use crate::errors::{PipelineResult, WriteError};
use crate::filter;
use crate::graph::DegreeAccumulator;
use crate::model::VectorSource;
use crate::pairs::{PairwiseEngine, SimilarityTriple};
use crate::report::{DegreeDistribution, SimilarityHistogram};
use crate::select;
use crate::write::{format_similarity, EdgeListWriter};

/// Outcome of a completed run, including the report-stage datasets.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    /// Identifiers surviving prefix selection.
    pub selected: usize,
    /// C(N,2) pairs compared.
    pub pairs_compared: u64,
    /// Pairs surviving the cutoff and written to the edge list.
    pub pairs_written: u64,
    /// Nodes with at least one surviving edge.
    pub nodes: usize,
    /// Sum of surviving edge weights.
    pub total_weight: f64,
    /// Distribution of all compared similarities (pre-cutoff).
    pub histogram: SimilarityHistogram,
    /// Rank-ordered weighted degrees of the similarity graph.
    pub degrees: DegreeDistribution,
}

/// Run one similarity calculation against `source`.
///
/// An empty selection is a normal outcome: the output file is created
/// as a valid, empty gzip stream and the summary reports zero pairs.
pub fn run(config: &CalculateConfig, source: &dyn VectorSource) -> PipelineResult<RunSummary> {
    config.validate()?;

    let vocabulary = source.vocabulary();
    let ids = select::select_by_prefix(&vocabulary, &config.prefixes);
    info!(
        vocabulary = vocabulary.len(),
        selected = ids.len(),
        "selected chemical identifiers"
    );
    for (prefix, count) in select::prefix_counts(&ids) {
        debug!(prefix, count, "selection tally");
    }
    if ids.is_empty() {
        warn!("no identifiers matched the configured prefixes");
    }

    let vectors = source.vectors(&ids)?;
    // Zero-norm and dimension failures surface here, before the output
    // file exists.
    let engine = PairwiseEngine::new(ids, vectors, config.precision)?;
    let pairs_compared = engine.pair_count();
    info!(
        pairs = pairs_compared,
        cutoff = ?config.cutoff,
        precision = config.precision,
        output = %config.output.display(),
        "computing pairwise similarities"
    );

    let mut writer = EdgeListWriter::create(&config.output)?;
    let mut histogram = SimilarityHistogram::default();
    let mut accumulator = DegreeAccumulator::new();

    let outcome = if config.chunk_size > 0 {
        drive(
            engine.par_stream(config.chunk_size),
            config,
            &mut writer,
            &mut histogram,
            &mut accumulator,
        )
    } else {
        drive(
            engine.stream(),
            config,
            &mut writer,
            &mut histogram,
            &mut accumulator,
        )
    };
    if let Err(e) = outcome {
        writer.discard();
        return Err(e.into());
    }

    let pairs_written = match writer.finish() {
        Ok(records) => records,
        Err(e) => {
            // The gzip trailer never made it out; the file is invalid.
            if let Err(remove_err) = std::fs::remove_file(&config.output) {
                warn!(
                    path = %config.output.display(),
                    error = %remove_err,
                    "could not remove partial output"
                );
            }
            return Err(e.into());
        }
    };

    info!(
        pairs_written,
        nodes = accumulator.node_count(),
        total_weight = accumulator.total_weight(),
        "similarity table written"
    );

    Ok(RunSummary {
        selected: engine.len(),
        pairs_compared,
        pairs_written,
        nodes: accumulator.node_count(),
        total_weight: accumulator.total_weight(),
        histogram,
        degrees: accumulator.into_distribution(),
    })
}

/// Drive one triple stream through histogram, cutoff, writer, and graph.
fn drive<'a>(
    stream: impl Iterator<Item = SimilarityTriple<'a>>,
    config: &CalculateConfig,
    writer: &mut EdgeListWriter,
    histogram: &mut SimilarityHistogram,
    accumulator: &mut DegreeAccumulator,
) -> Result<(), WriteError> {
    for triple in stream {
        histogram.observe(triple.similarity);
        if !filter::passes(config.cutoff, triple.similarity) {
            continue;
        }
        let formatted = format_similarity(triple.similarity, config.precision);
        writer.write_edge(triple.left, triple.right, &formatted)?;
        accumulator.add_edge(triple.left, triple.right, triple.similarity);
    }
    Ok(())
}
