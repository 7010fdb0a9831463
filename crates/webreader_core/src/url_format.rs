use std::fmt;

use engine_logging::{engine_debug, engine_warn};
use url::Url;

pub const DEFAULT_ENDPOINT_BASE: &str = "https://api.unifuncs.com/api/web-reader";

/// Saved snapshots repeat this parameter; only the first value is kept.
const CHECKSUM_PARAM: &str = "chksm";

/// Every stage of turning an article URL into a request against the reader endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct FormattedRequest {
    pub original: String,
    pub cleaned: String,
    pub encoded: String,
    pub request_url: String,
}

impl FormattedRequest {
    /// The request URL with the API key value masked, for logs.
    pub fn redacted(&self) -> String {
        match self.request_url.split_once("apiKey=") {
            Some((head, _)) => format!("{head}apiKey=***"),
            None => self.request_url.clone(),
        }
    }
}

impl fmt::Debug for FormattedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormattedRequest")
            .field("original", &self.original)
            .field("cleaned", &self.cleaned)
            .field("encoded", &self.encoded)
            .field("request_url", &self.redacted())
            .finish()
    }
}

/// Builds `<endpoint>/<percent-encoded article url>?apiKey=<key>` request URLs.
#[derive(Clone)]
pub struct RequestFormatter {
    endpoint_base: String,
    api_key: String,
}

impl RequestFormatter {
    pub fn new(endpoint_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        let endpoint_base = endpoint_base.into();
        Self {
            endpoint_base: endpoint_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint_base(&self) -> &str {
        &self.endpoint_base
    }

    /// Never fails: an unparsable URL is percent-encoded as given.
    pub fn format(&self, article_url: &str) -> FormattedRequest {
        let cleaned = match canonicalize_article_url(article_url) {
            Ok(cleaned) => cleaned,
            Err(err) => {
                engine_warn!("Cannot parse article url {article_url:?} ({err}); encoding it verbatim");
                article_url.to_string()
            }
        };
        let encoded = urlencoding::encode(&cleaned).into_owned();
        let request_url = format!(
            "{}/{}?apiKey={}",
            self.endpoint_base,
            encoded,
            urlencoding::encode(&self.api_key)
        );

        let request = FormattedRequest {
            original: article_url.to_string(),
            cleaned,
            encoded,
            request_url,
        };
        engine_debug!("original url: {}", request.original);
        engine_debug!("cleaned url: {}", request.cleaned);
        engine_debug!("encoded url: {}", request.encoded);
        engine_debug!("request url: {}", request.redacted());
        request
    }
}

impl fmt::Debug for RequestFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestFormatter")
            .field("endpoint_base", &self.endpoint_base)
            .field("api_key", &"***")
            .finish()
    }
}

/// Parse `raw` and collapse repeated `chksm` query parameters to the first one.
/// URLs without repeats are returned verbatim.
pub fn canonicalize_article_url(raw: &str) -> Result<String, url::ParseError> {
    let mut parsed = Url::parse(raw)?;

    let pairs: Vec<(String, String)> = parsed.query_pairs().into_owned().collect();
    let checksum_count = pairs
        .iter()
        .filter(|(key, _)| key.as_str() == CHECKSUM_PARAM)
        .count();
    if checksum_count <= 1 {
        return Ok(raw.to_string());
    }

    let mut kept_checksum = false;
    let kept: Vec<(String, String)> = pairs
        .into_iter()
        .filter(|(key, _)| {
            if key.as_str() != CHECKSUM_PARAM {
                return true;
            }
            !std::mem::replace(&mut kept_checksum, true)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(kept);

    Ok(parsed.into())
}
