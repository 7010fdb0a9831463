use engine_logging::{engine_info, engine_trace, engine_warn};
use webreader_engine::{BatchEvent, ProgressSink, RecordProgress, Stage};

/// Reports batch progress through the log as it happens.
#[derive(Debug, Default)]
pub struct TerminalProgress;

impl ProgressSink for TerminalProgress {
    fn emit(&self, event: BatchEvent) {
        match event {
            BatchEvent::Started { total } => {
                engine_info!("Converting {total} articles");
            }
            BatchEvent::Progress(RecordProgress {
                stage: Stage::Fetching,
                bytes: Some(bytes),
                ..
            }) => {
                engine_trace!("downloaded {bytes} bytes");
            }
            BatchEvent::Progress(RecordProgress { stage, .. }) => {
                engine_trace!("stage {stage:?}");
            }
            BatchEvent::RecordCompleted {
                index,
                title,
                result,
            } => match result {
                Ok(outcome) => engine_info!(
                    "#{index} done: {} ({} bytes)",
                    outcome.path.display(),
                    outcome.bytes_written
                ),
                Err(kind) => engine_warn!("#{index} {title:?} not converted: {kind}"),
            },
            BatchEvent::Finished { total, written } => {
                engine_info!("Processed {total} articles, saved {written}");
            }
        }
    }
}
