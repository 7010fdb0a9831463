use pretty_assertions::assert_eq;
use webreader_core::{extract_records, ArticleRecord};

const SNAPSHOT: &str = r#"
<div class="album__list">
  <li class="album__list-item" data-link="https://mp.weixin.qq.com/s?__biz=MzA&amp;mid=300&amp;idx=1#rd" data-title="Third">x</li>
  <li class="album__list-item" data-link="https://mp.weixin.qq.com/s?__biz=MzA&amp;mid=12&amp;idx=1#rd" data-title="First &amp; foremost">x</li>
  <li class="album__list-item" data-link="https://mp.weixin.qq.com/s?__biz=MzA&amp;mid=45&amp;idx=2#rd"
      data-title="Second">x</li>
</div>
"#;

#[test]
fn records_are_decoded_stripped_and_sorted_by_message_id() {
    let records = extract_records(SNAPSHOT);

    assert_eq!(
        records,
        vec![
            ArticleRecord::new(
                "First & foremost",
                "https://mp.weixin.qq.com/s?__biz=MzA&mid=12&idx=1",
                Some(12)
            ),
            ArticleRecord::new(
                "Second",
                "https://mp.weixin.qq.com/s?__biz=MzA&mid=45&idx=2",
                Some(45)
            ),
            ArticleRecord::new(
                "Third",
                "https://mp.weixin.qq.com/s?__biz=MzA&mid=300&idx=1",
                Some(300)
            ),
        ]
    );
}

#[test]
fn extraction_is_idempotent() {
    assert_eq!(extract_records(SNAPSHOT), extract_records(SNAPSHOT));
}

#[test]
fn identical_matches_collapse_to_one_record() {
    let markup = r#"
        <a data-link="https://x.com/a?mid=1" data-title="Same">1</a>
        <a data-link="https://x.com/a?mid=1" data-title="Same">2</a>
        <a data-link="https://x.com/a?mid=1#rd" data-title="Same">3</a>
    "#;
    let records = extract_records(markup);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "https://x.com/a?mid=1");
}

#[test]
fn trailing_read_fragment_is_removed_and_mid_extracted() {
    let records = extract_records(r#"data-link="https://x.com/a?mid=5#rd" data-title="T""#);
    assert_eq!(records, vec![ArticleRecord::new("T", "https://x.com/a?mid=5", Some(5))]);
}

#[test]
fn records_without_message_id_sort_as_zero() {
    let markup = r#"
        data-link="https://x.com/b?mid=3" data-title="B"
        data-link="https://x.com/plain" data-title="Plain"
        data-link="https://x.com/a?mid=1" data-title="A"
    "#;
    let records = extract_records(markup);
    let ids: Vec<_> = records.iter().map(|r| r.message_id).collect();
    assert_eq!(ids, vec![None, Some(1), Some(3)]);
}

#[test]
fn sort_order_follows_message_ids() {
    let markup = (0..20u64)
        .rev()
        .map(|i| format!(r#"data-link="https://x.com/s?mid={}" data-title="t{i}" "#, i * 7 % 13))
        .collect::<String>();
    let records = extract_records(&markup);
    for pair in records.windows(2) {
        assert!(pair[0].message_id <= pair[1].message_id);
    }
}

#[test]
fn missing_or_reordered_attributes_do_not_match() {
    let markup = r#"
        <a data-link="https://x.com/only-link">no title</a>
        <a data-title="Only title">no link</a>
        <a data-title="Reversed" data-link="https://x.com/rev">reversed</a>
        <a data-link="" data-title="Empty link">empty</a>
        <a data-link="https://x.com/c" data-title="   ">blank title</a>
    "#;
    assert!(extract_records(markup).is_empty());
}

#[test]
fn link_that_is_only_read_fragment_is_skipped() {
    assert!(extract_records(r##"data-link="#rd" data-title="T""##).is_empty());
}

#[test]
fn empty_input_yields_no_records() {
    assert!(extract_records("").is_empty());
    assert!(extract_records("<html><body>nothing here</body></html>").is_empty());
}

#[test]
fn records_serialize_with_msgid_key() {
    let record = ArticleRecord::new("标题", "https://x.com/a?mid=9", Some(9));
    let json = serde_json::to_string(&record).unwrap();
    assert_eq!(json, r#"{"msgid":9,"title":"标题","url":"https://x.com/a?mid=9"}"#);

    let none = serde_json::to_value(ArticleRecord::new("t", "u", None)).unwrap();
    assert!(none["msgid"].is_null());
}

#[test]
fn repeated_checksum_is_collapsed_during_extraction() {
    let markup = r#"
        data-link="https://mp.weixin.qq.com/s?mid=42&chksm=X&chksm=Y#rd" data-title="Test Title"
        data-link="https://mp.weixin.qq.com/s?mid=42&chksm=X&chksm=Z#rd" data-title="Test Title"
    "#;
    assert_eq!(
        extract_records(markup),
        vec![ArticleRecord::new(
            "Test Title",
            "https://mp.weixin.qq.com/s?mid=42&chksm=X",
            Some(42)
        )]
    );
}

#[test]
fn padded_attribute_values_are_trimmed() {
    let markup = r#"
        <a data-link=" https://x.com/a?mid=8#rd " data-title="  Padded title ">1</a>
        <a data-link="https://x.com/a?mid=8" data-title="Padded title">2</a>
    "#;
    assert_eq!(
        extract_records(markup),
        vec![ArticleRecord::new("Padded title", "https://x.com/a?mid=8", Some(8))]
    );
}
