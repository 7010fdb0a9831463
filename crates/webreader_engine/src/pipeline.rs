use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use thiserror::Error;
use webreader_core::{extract_records, ArticleRecord};

/// Errors that end a run before any record is processed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),
    #[error("no article records found in {0}")]
    NoRecordsFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Read a page snapshot and extract its article records.
pub fn load_records(input: &Path) -> Result<Vec<ArticleRecord>, PipelineError> {
    if !input.is_file() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }
    let bytes = fs::read(input).map_err(|source| PipelineError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let markup = String::from_utf8_lossy(&bytes);

    let records = extract_records(&markup);
    if records.is_empty() {
        return Err(PipelineError::NoRecordsFound(input.to_path_buf()));
    }
    engine_info!("Found {} article records in {}", records.len(), input.display());
    Ok(records)
}
