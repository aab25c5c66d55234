//! Command handlers for the chemsim CLI.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use chemsim_core::config::{CalculateConfig, CliOverrides};
use chemsim_core::model::TsvSource;
use chemsim_core::{pipeline, select, RunSummary, VectorSource};

/// Arguments for the `calculate` command.
pub struct CalculateArgs {
    pub model: PathBuf,
    pub output: Option<PathBuf>,
    pub cutoff: Option<f64>,
    pub precision: Option<u32>,
    pub prefixes: Vec<String>,
    pub chunk_size: Option<usize>,
    pub config: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
}

/// Run the similarity pipeline end to end.
pub fn calculate(args: CalculateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => CalculateConfig::load(path)?,
        None => CalculateConfig::default(),
    };
    config.apply_overrides(&CliOverrides {
        prefixes: if args.prefixes.is_empty() {
            None
        } else {
            Some(args.prefixes.clone())
        },
        cutoff: args.cutoff,
        precision: args.precision,
        output: args.output.clone(),
        chunk_size: args.chunk_size,
    });
    config.validate()?;

    let source = TsvSource::load(&args.model)?;
    let summary = pipeline::run(&config, &source)?;

    if let Some(dir) = &args.report_dir {
        write_reports(dir, &summary)?;
    }

    println!(
        "{} identifiers, {} pairs compared, {} written to {}",
        summary.selected,
        summary.pairs_compared,
        summary.pairs_written,
        config.output.display()
    );
    Ok(())
}

/// Dump the report-stage datasets as JSON for the plotting collaborators.
fn write_reports(dir: &Path, summary: &RunSummary) -> Result<(), Box<dyn Error>> {
    std::fs::create_dir_all(dir)?;

    let hist_path = dir.join("similarity_hist.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&hist_path)?), &summary.histogram)?;

    let degrees_path = dir.join("degree_distribution.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&degrees_path)?), &summary.degrees)?;

    info!(
        histogram = %hist_path.display(),
        degrees = %degrees_path.display(),
        "report datasets written"
    );
    Ok(())
}

/// Preview a prefix selection: count per CURIE prefix, largest first.
pub fn vocab(model: &Path, prefixes: &[String]) -> Result<(), Box<dyn Error>> {
    let source = TsvSource::load(model)?;
    let prefixes: Vec<String> = if prefixes.is_empty() {
        chemsim_core::constants::CHEMICAL_PREFIXES
            .iter()
            .map(|p| p.to_string())
            .collect()
    } else {
        prefixes.to_vec()
    };

    let selected = select::select_by_prefix(&source.vocabulary(), &prefixes);
    println!("There are {} chemicals", selected.len());
    println!("{:<12} {:>8}", "Prefix", "Count");
    for (prefix, count) in select::prefix_counts(&selected) {
        println!("{prefix:<12} {count:>8}");
    }
    Ok(())
}
