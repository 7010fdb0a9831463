use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

use crate::record::{ArticleRecord, RecordSet};
use crate::url_format::canonicalize_article_url;

/// `data-link` followed by `data-title`, both double-quoted.
static ATTRIBUTE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"data-link="([^"]+)"\s+data-title="([^"]+)""#).expect("attribute pattern")
});

static MESSAGE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]mid=(\d+)").expect("message id pattern"));

const READ_FRAGMENT: &str = "#rd";

/// Scan markup for article references and return them deduplicated and
/// sorted by message id. Repeated `chksm` parameters are collapsed before
/// records are compared.
pub fn extract_records(markup: &str) -> Vec<ArticleRecord> {
    let mut set = RecordSet::new();
    for caps in ATTRIBUTE_PAIR.captures_iter(markup) {
        let raw_url = decode_html_entities(&caps[1]);
        let title = decode_html_entities(&caps[2]);

        let url = strip_read_fragment(raw_url.trim());
        let title = title.trim();
        if url.is_empty() || title.is_empty() {
            continue;
        }
        let url = canonicalize_article_url(url).unwrap_or_else(|_| url.to_string());

        let id = message_id(&url);
        set.insert(ArticleRecord::new(title, url, id));
    }
    set.into_sorted()
}

/// First `mid=<digits>` query parameter, if it fits in a `u64`.
pub fn message_id(url: &str) -> Option<u64> {
    MESSAGE_ID
        .captures(url)
        .and_then(|caps| caps[1].parse::<u64>().ok())
}

fn strip_read_fragment(url: &str) -> &str {
    url.strip_suffix(READ_FRAGMENT).unwrap_or(url)
}
