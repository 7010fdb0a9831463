//! Webreader engine: input loading, remote fetch, persistence and exports.
mod batch;
mod config;
mod decode;
mod export;
mod fetch;
mod persist;
mod pipeline;
mod types;

pub use batch::BatchRunner;
pub use config::{ReaderConfig, API_KEY_ENV, ENDPOINT_ENV};
pub use decode::{decode_text, DecodedText};
pub use export::{
    export_records, render_record_listing, render_url_listing, ExportError, ExportOptions,
    ExportSummary,
};
pub use fetch::{
    ContentFetcher, FetchSettings, NullProgressSink, ProgressSink, ReqwestFetcher, ACCEPT_TEXT,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{load_records, PipelineError};
pub use types::{
    BatchEvent, BatchSummary, FailureKind, FetchError, RecordFailure, RecordIndex, RecordOutcome,
    RecordProgress, Stage,
};
