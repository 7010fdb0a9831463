use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use engine_logging::{clear_batch_position, engine_info, engine_warn, set_batch_position};
use webreader_core::{compose_markdown, markdown_filename, ArticleRecord, RequestFormatter, TrimRules};

use crate::config::ReaderConfig;
use crate::fetch::{ContentFetcher, ProgressSink, ReqwestFetcher};
use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};
use crate::{
    BatchEvent, BatchSummary, FailureKind, FetchError, RecordFailure, RecordIndex, RecordOutcome,
    RecordProgress, Stage,
};

/// Converts records one at a time into `<output_dir>/<sanitized title>.md`.
///
/// A record that fails to fetch or write is logged and recorded in the
/// summary; the remaining records are still attempted.
pub struct BatchRunner {
    formatter: RequestFormatter,
    fetcher: Arc<dyn ContentFetcher>,
    trim: TrimRules,
    writer: AtomicFileWriter,
    delay_between: Duration,
}

impl BatchRunner {
    pub fn new(
        formatter: RequestFormatter,
        fetcher: Arc<dyn ContentFetcher>,
        trim: TrimRules,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            formatter,
            fetcher,
            trim,
            writer: AtomicFileWriter::new(output_dir),
            delay_between: Duration::ZERO,
        }
    }

    /// Runner backed by [`ReqwestFetcher`].
    pub fn from_config(
        config: &ReaderConfig,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, FetchError> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone())?;
        Ok(Self::new(
            config.formatter(),
            Arc::new(fetcher),
            config.trim.clone(),
            output_dir,
        )
        .with_delay(config.delay_between))
    }

    pub fn with_delay(mut self, delay_between: Duration) -> Self {
        self.delay_between = delay_between;
        self
    }

    pub fn output_dir(&self) -> &Path {
        self.writer.dir()
    }

    /// Only an unusable output directory aborts the run.
    pub async fn run(
        &self,
        records: &[ArticleRecord],
        sink: &dyn ProgressSink,
    ) -> Result<BatchSummary, PersistError> {
        ensure_output_dir(self.output_dir())?;

        let total = records.len();
        let mut summary = BatchSummary {
            total,
            ..BatchSummary::default()
        };
        sink.emit(BatchEvent::Started { total });

        for (offset, record) in records.iter().enumerate() {
            if offset > 0 && !self.delay_between.is_zero() {
                tokio::time::sleep(self.delay_between).await;
            }
            let index = offset + 1;
            set_batch_position(index, total);
            engine_info!("Processing {} ({})", record.title, record.url);

            let result = self.convert_record(index, total, record, sink).await;
            match &result {
                Ok(outcome) => {
                    engine_info!("Saved to {}", outcome.path.display());
                    summary.written.push(outcome.path.clone());
                }
                Err(err) => {
                    engine_warn!("Conversion failed: {err}");
                    summary.failures.push(RecordFailure {
                        index,
                        title: record.title.clone(),
                        url: record.url.clone(),
                        kind: err.kind.clone(),
                        message: err.message.clone(),
                    });
                }
            }
            sink.emit(BatchEvent::RecordCompleted {
                index,
                title: record.title.clone(),
                result: result.map_err(|err| err.kind),
            });
            clear_batch_position();
        }

        engine_info!(
            "Batch finished: {} of {} records written, {} failed",
            summary.written_count(),
            total,
            summary.failed_count()
        );
        sink.emit(BatchEvent::Finished {
            total,
            written: summary.written_count(),
        });
        Ok(summary)
    }

    async fn convert_record(
        &self,
        index: RecordIndex,
        total: usize,
        record: &ArticleRecord,
        sink: &dyn ProgressSink,
    ) -> Result<RecordOutcome, FetchError> {
        let at = |stage| RecordProgress {
            index,
            total,
            stage,
            bytes: None,
        };

        sink.emit(BatchEvent::Progress(at(Stage::Formatting)));
        let request = self.formatter.format(&record.url);

        let body = self
            .fetcher
            .fetch(at(Stage::Fetching), &request.request_url, sink)
            .await?;

        sink.emit(BatchEvent::Progress(at(Stage::Trimming)));
        let markdown = compose_markdown(&record.url, &body, &self.trim);

        sink.emit(BatchEvent::Progress(at(Stage::Writing)));
        let filename = markdown_filename(&record.title);
        let path = self
            .writer
            .write(&filename, &markdown)
            .map_err(|err| FetchError::new(FailureKind::Persist, err.to_string()))?;

        sink.emit(BatchEvent::Progress(at(Stage::Done)));
        Ok(RecordOutcome {
            path,
            bytes_written: markdown.len() as u64,
        })
    }
}
