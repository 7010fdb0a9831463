use std::fmt;
use std::time::Duration;

use webreader_core::{RequestFormatter, TrimRules, DEFAULT_ENDPOINT_BASE};

use crate::fetch::FetchSettings;

/// Environment variable the binary reads the reader API key from.
pub const API_KEY_ENV: &str = "WEB_READER_API_KEY";
/// Environment variable overriding the reader endpoint base.
pub const ENDPOINT_ENV: &str = "WEB_READER_ENDPOINT";

/// Everything the conversion pipeline needs; passed in explicitly.
#[derive(Clone)]
pub struct ReaderConfig {
    pub endpoint_base: String,
    pub api_key: String,
    pub fetch: FetchSettings,
    pub trim: TrimRules,
    /// Pause between two records, for rate-limited endpoints.
    pub delay_between: Duration,
}

impl ReaderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint_base: DEFAULT_ENDPOINT_BASE.to_string(),
            api_key: api_key.into(),
            fetch: FetchSettings::default(),
            trim: TrimRules::default(),
            delay_between: Duration::ZERO,
        }
    }

    pub fn with_endpoint(mut self, endpoint_base: impl Into<String>) -> Self {
        self.endpoint_base = endpoint_base.into();
        self
    }

    pub fn formatter(&self) -> RequestFormatter {
        RequestFormatter::new(self.endpoint_base.clone(), self.api_key.clone())
    }
}

impl fmt::Debug for ReaderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderConfig")
            .field("endpoint_base", &self.endpoint_base)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("fetch", &self.fetch)
            .field("trim", &self.trim)
            .field("delay_between", &self.delay_between)
            .finish()
    }
}
