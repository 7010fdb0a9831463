/// Label of the first line of every converted article.
pub const SOURCE_HEADER_LABEL: &str = "原始URL";

/// Phrases that start recommendation blocks and navigation prompts appended
/// to the article body. Checked in this order.
pub const DEFAULT_BOUNDARY_MARKERS: &[&str] = &[
    "**推荐阅读**",
    "推荐阅读",
    "诊疗经验谈",
    "继续滑动看下一个",
    "轻触阅读原文",
];

/// Ordered list of boundary markers; everything from a marker onwards is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimRules {
    markers: Vec<String>,
}

impl Default for TrimRules {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY_MARKERS.iter().copied())
    }
}

impl TrimRules {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(Into::into)
                .filter(|m: &String| !m.is_empty())
                .collect(),
        }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Markers are applied one after another in list order; each one found
    /// cuts the text before its first occurrence and trims trailing whitespace.
    pub fn truncate<'a>(&self, text: &'a str) -> &'a str {
        let mut kept = text;
        for marker in &self.markers {
            if let Some(pos) = kept.find(marker.as_str()) {
                kept = kept[..pos].trim_end();
            }
        }
        kept
    }
}

/// `原始URL: <source_url>`, a blank line, then the trimmed body.
pub fn compose_markdown(source_url: &str, body: &str, rules: &TrimRules) -> String {
    let body = rules.truncate(body);
    format!("{SOURCE_HEADER_LABEL}: {source_url}\n\n{body}")
}
