//! Webreader core: pure extraction, URL formatting and naming rules.
mod content;
mod extract;
mod filename;
mod record;
mod url_format;

pub use content::{compose_markdown, TrimRules, DEFAULT_BOUNDARY_MARKERS, SOURCE_HEADER_LABEL};
pub use extract::{extract_records, message_id};
pub use filename::{markdown_filename, sanitize_title, MAX_TITLE_CHARS};
pub use record::{ArticleRecord, RecordSet};
pub use url_format::{
    canonicalize_article_url, FormattedRequest, RequestFormatter, DEFAULT_ENDPOINT_BASE,
};
