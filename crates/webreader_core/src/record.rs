use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One article reference found in a page snapshot.
///
/// Equality covers all three fields; two matches that differ only in
/// `message_id` are distinct records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(rename = "msgid")]
    pub message_id: Option<u64>,
    pub title: String,
    pub url: String,
}

impl ArticleRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>, message_id: Option<u64>) -> Self {
        Self {
            message_id,
            title: title.into(),
            url: url.into(),
        }
    }

    /// Key used for ordering; records without an id sort as 0.
    pub fn sort_key(&self) -> u64 {
        self.message_id.unwrap_or(0)
    }
}

/// Insertion-ordered set of records, deduplicated by value.
#[derive(Debug, Default)]
pub struct RecordSet {
    seen: HashSet<ArticleRecord>,
    records: Vec<ArticleRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an equal record is already present.
    pub fn insert(&mut self, record: ArticleRecord) -> bool {
        if self.seen.contains(&record) {
            return false;
        }
        self.seen.insert(record.clone());
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the set, returning records ordered by message id.
    /// Equal keys keep first-appearance order.
    pub fn into_sorted(self) -> Vec<ArticleRecord> {
        let mut records = self.records;
        records.sort_by_key(ArticleRecord::sort_key);
        records
    }
}
