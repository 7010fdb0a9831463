use pretty_assertions::assert_eq;
use webreader_engine::decode_text;

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_text(bytes, Some("text/plain; charset=ISO-8859-1"));
    assert_eq!(decoded.text, "café");
    assert!(decoded.encoding_label.eq_ignore_ascii_case("windows-1252"));
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_text(bytes, Some("text/plain"));
    assert_eq!(decoded.text, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_defaults_to_utf8_without_charset() {
    let decoded = decode_text("正文 body".as_bytes(), None);
    assert_eq!(decoded.text, "正文 body");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn unknown_charset_label_falls_through_to_utf8() {
    let decoded = decode_text(b"plain", Some("text/plain; charset=x-unknown"));
    assert_eq!(decoded.text, "plain");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn non_utf8_body_without_charset_is_detected() {
    // Longer GBK text so detection has something to work with.
    let (bytes, _, _) = encoding_rs::GBK.encode("这是一篇关于临床诊疗经验的文章，内容包括病例分析和治疗建议。");
    // Whatever the guess, invalid UTF-8 is never labelled UTF-8.
    let decoded = decode_text(&bytes, None);
    assert_ne!(decoded.encoding_label, "UTF-8");
    assert!(!decoded.text.is_empty());
}

#[test]
fn malformed_bytes_are_replaced_not_rejected() {
    let decoded = decode_text(b"ok \xc3\x28", Some("text/plain; charset=utf-8"));
    assert_eq!(decoded.text, "ok \u{FFFD}(");
    assert_eq!(decoded.encoding_label, "UTF-8");
    assert!(decoded.had_errors);
}
