use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::decode::decode_text;
use crate::{BatchEvent, FailureKind, FetchError, RecordProgress, Stage};

pub const ACCEPT_TEXT: &str =
    "text/plain,text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    /// Media-type prefixes rejected as non-text. Anything else, including a
    /// missing Content-Type, is decoded as text.
    pub rejected_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 10 * 1024 * 1024,
            rejected_content_types: vec![
                "image/".to_string(),
                "audio/".to_string(),
                "video/".to_string(),
            ],
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: BatchEvent);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: BatchEvent) {}
}

/// Source of article text for a formatted request URL.
#[async_trait::async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(
        &self,
        progress: RecordProgress,
        request_url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    settings: FetchSettings,
    redirect_counter: Arc<AtomicUsize>,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = build_client(&settings, redirect_counter.clone())?;
        Ok(Self {
            client,
            settings,
            redirect_counter,
        })
    }

    fn is_content_type_rejected(&self, content_type: &str) -> bool {
        let ct = content_type
            .split(';')
            .next()
            .unwrap_or(content_type)
            .trim()
            .to_ascii_lowercase();
        self.settings
            .rejected_content_types
            .iter()
            .any(|prefix| ct.starts_with(&prefix.to_ascii_lowercase()))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

fn build_client(
    settings: &FetchSettings,
    redirect_counter: Arc<AtomicUsize>,
) -> Result<reqwest::Client, FetchError> {
    let redirect_limit = settings.redirect_limit;
    let policy = reqwest::redirect::Policy::custom(move |attempt| {
        let count = attempt.previous().len();
        redirect_counter.store(count, Ordering::Relaxed);
        if count >= redirect_limit {
            attempt.error("redirect limit exceeded")
        } else {
            attempt.follow()
        }
    });

    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .redirect(policy)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

#[async_trait::async_trait]
impl ContentFetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        progress: RecordProgress,
        request_url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<String, FetchError> {
        let parsed = reqwest::Url::parse(request_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        self.redirect_counter.store(0, Ordering::Relaxed);

        let response = self
            .client
            .get(parsed)
            .header(ACCEPT, ACCEPT_TEXT)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if self.is_content_type_rejected(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let emit_bytes = |bytes: u64| {
            sink.emit(BatchEvent::Progress(RecordProgress {
                stage: Stage::Fetching,
                bytes: Some(bytes),
                ..progress.clone()
            }));
        };
        emit_bytes(0);

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
            emit_bytes(bytes.len() as u64);
        }

        let decoded = decode_text(&bytes, content_type.as_deref());
        if decoded.had_errors {
            engine_warn!(
                "body is not valid {}; malformed bytes replaced",
                decoded.encoding_label
            );
        }

        let redirects = self.redirect_counter.load(Ordering::Relaxed);
        if redirects > 0 {
            engine_debug!("followed {redirects} redirect(s)");
        }
        engine_info!(
            "received {} bytes ({}, {})",
            bytes.len(),
            content_type.as_deref().unwrap_or("no content type"),
            decoded.encoding_label
        );
        Ok(decoded.text)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
