use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use engine_logging::{engine_info, engine_warn};
use webreader_core::ArticleRecord;
use webreader_engine::{export_records, load_records, BatchRunner, BatchSummary, ExportSummary};

use crate::cli::{ConvertArgs, ExtractArgs, InputArgs};
use crate::progress::TerminalProgress;

const CONVERTED_ROOT: &str = "converted_files";

pub fn run_extract(args: &ExtractArgs) -> anyhow::Result<ExportSummary> {
    let records = load_records(&args.input.input)?;
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| args.input.input_dir());
    export(&records, &args.input, &output_dir)
}

pub fn run_convert(args: &ConvertArgs) -> anyhow::Result<BatchSummary> {
    let records = load_records(&args.input.input)?;

    if !args.skip_export {
        let export_dir = args
            .export_dir
            .clone()
            .unwrap_or_else(|| args.input.input_dir());
        // Listings are a by-product here; conversion goes ahead without them.
        if let Err(err) = export(&records, &args.input, &export_dir) {
            engine_warn!("Skipping listings in {}: {err:#}", export_dir.display());
        }
    }

    let output_dir = args.output.clone().unwrap_or_else(default_markdown_dir);
    let config = args.reader_config();
    if config.api_key.is_empty() {
        engine_warn!("No API key configured; the reader endpoint will likely reject requests");
    }

    let runner = BatchRunner::from_config(&config, &output_dir)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let summary = runtime
        .block_on(runner.run(&records, &TerminalProgress))
        .with_context(|| format!("cannot write to {}", output_dir.display()))?;

    report(&summary, &output_dir);
    Ok(summary)
}

fn export(
    records: &[ArticleRecord],
    input: &InputArgs,
    output_dir: &Path,
) -> anyhow::Result<ExportSummary> {
    let summary = export_records(records, output_dir, &input.export_options())?;
    engine_info!("JSON listing: {}", summary.listing_path.display());
    engine_info!("URL list: {}", summary.url_path.display());
    Ok(summary)
}

/// `converted_files/<YYYYMMDD>` under the working directory.
fn default_markdown_dir() -> PathBuf {
    PathBuf::from(CONVERTED_ROOT).join(Local::now().format("%Y%m%d").to_string())
}

fn report(summary: &BatchSummary, output_dir: &Path) {
    engine_info!(
        "Done: {} of {} articles saved to {}",
        summary.written_count(),
        summary.total,
        output_dir.display()
    );
    for failure in &summary.failures {
        engine_warn!(
            "  #{} {} ({}): {}: {}",
            failure.index,
            failure.title,
            failure.url,
            failure.kind,
            failure.message
        );
    }
}
