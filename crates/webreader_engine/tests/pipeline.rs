use std::fs;

use tempfile::TempDir;
use webreader_engine::{load_records, PipelineError};

#[test]
fn missing_input_is_input_not_found() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.md");
    let err = load_records(&missing).unwrap_err();
    assert!(matches!(err, PipelineError::InputNotFound(path) if path == missing));
}

#[test]
fn directory_input_is_input_not_found() {
    let temp = TempDir::new().unwrap();
    let err = load_records(temp.path()).unwrap_err();
    assert!(matches!(err, PipelineError::InputNotFound(_)));
}

#[test]
fn input_without_records_is_no_records_found() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("empty.md");
    fs::write(&input, "<div>nothing to see</div>").unwrap();

    let err = load_records(&input).unwrap_err();
    assert!(matches!(err, PipelineError::NoRecordsFound(path) if path == input));
}

#[test]
fn records_are_loaded_from_snapshot() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("page.md");
    fs::write(
        &input,
        r#"<li data-link="https://x.com/s?mid=2#rd" data-title="B"></li>
           <li data-link="https://x.com/s?mid=1#rd" data-title="A"></li>"#,
    )
    .unwrap();

    let records = load_records(&input).unwrap();
    let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
}

#[test]
fn invalid_utf8_bytes_do_not_abort_loading() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("page.md");
    let mut bytes = b"\xff\xfe garbage ".to_vec();
    bytes.extend_from_slice(br#"data-link="https://x.com/s?mid=3" data-title="C""#);
    fs::write(&input, bytes).unwrap();

    let records = load_records(&input).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].message_id, Some(3));
}
