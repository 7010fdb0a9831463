use std::fmt;
use std::path::PathBuf;

/// 1-based position of a record within a batch.
pub type RecordIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Formatting,
    Fetching,
    Trimming,
    Writing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordProgress {
    pub index: RecordIndex,
    pub total: usize,
    pub stage: Stage,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchEvent {
    Started {
        total: usize,
    },
    Progress(RecordProgress),
    RecordCompleted {
        index: RecordIndex,
        title: String,
        result: Result<RecordOutcome, FailureKind>,
    },
    Finished {
        total: usize,
        written: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub path: PathBuf,
    pub bytes_written: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub index: RecordIndex,
    pub title: String,
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

/// Processed vs persisted counts of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub written: Vec<PathBuf>,
    pub failures: Vec<RecordFailure>,
}

impl BatchSummary {
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch failed: {}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
    Persist,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Persist => write!(f, "write failed"),
        }
    }
}
