use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use webreader_core::ArticleRecord;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub listing_filename: String,
    pub url_filename: String,
}

impl ExportOptions {
    /// `<stem>_extracted.json` and `extracted_urls_<stem>.txt` for `input`.
    pub fn for_input(input: &Path) -> Self {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "articles".to_string());
        Self {
            listing_filename: format!("{stem}_extracted.json"),
            url_filename: format!("extracted_urls_{stem}.txt"),
        }
    }

    pub fn with_listing_filename(mut self, name: Option<String>) -> Self {
        if let Some(name) = name {
            self.listing_filename = name;
        }
        self
    }

    pub fn with_url_filename(mut self, name: Option<String>) -> Self {
        if let Some(name) = name {
            self.url_filename = name;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub record_count: usize,
    pub listing_path: PathBuf,
    pub url_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("failed to serialize record listing: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Pretty JSON array of `{"msgid", "title", "url"}` objects, non-ASCII kept as is.
pub fn render_record_listing(records: &[ArticleRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// One URL per line.
pub fn render_url_listing(records: &[ArticleRecord]) -> String {
    records.iter().fold(String::new(), |mut out, record| {
        out.push_str(&record.url);
        out.push('\n');
        out
    })
}

pub fn export_records(
    records: &[ArticleRecord],
    output_dir: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let writer = AtomicFileWriter::new(output_dir);

    let listing = render_record_listing(records)?;
    let listing_path = writer.write(&options.listing_filename, &listing)?;
    engine_info!(
        "Saved {} article records to {}",
        records.len(),
        listing_path.display()
    );

    let url_path = writer.write(&options.url_filename, &render_url_listing(records))?;
    engine_info!("Saved {} urls to {}", records.len(), url_path.display());

    Ok(ExportSummary {
        record_count: records.len(),
        listing_path,
        url_path,
    })
}
