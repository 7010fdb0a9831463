use pretty_assertions::assert_eq;
use webreader_core::{compose_markdown, TrimRules, SOURCE_HEADER_LABEL};

#[test]
fn recommended_reading_and_everything_after_is_removed() {
    let rules = TrimRules::default();
    let body = "正文第一段\n\n正文第二段\n\n推荐阅读\n\n- 另一篇文章\n- 第三篇";
    assert_eq!(rules.truncate(body), "正文第一段\n\n正文第二段");
}

#[test]
fn bold_marker_is_removed_with_its_asterisks() {
    let rules = TrimRules::default();
    assert_eq!(rules.truncate("Body\n\n**推荐阅读**\nmore"), "Body");
}

#[test]
fn markers_apply_iteratively_in_list_order() {
    let rules = TrimRules::new(["tail", "head"]);
    // "tail" cuts first, then "head" cuts the already shortened text.
    assert_eq!(rules.truncate("a head b tail c"), "a");
    // A marker found only after an earlier cut has no effect.
    assert_eq!(rules.truncate("a tail b head c"), "a");
}

#[test]
fn text_without_markers_is_unchanged() {
    let rules = TrimRules::default();
    let body = "No markers here.\n\n";
    assert_eq!(rules.truncate(body), body);
}

#[test]
fn empty_markers_are_ignored() {
    let rules = TrimRules::new(["", "END"]);
    assert_eq!(rules.markers(), &["END".to_string()]);
    assert_eq!(rules.truncate("keep END drop"), "keep");
}

#[test]
fn composed_markdown_has_source_header_and_blank_line() {
    let doc = compose_markdown(
        "https://mp.weixin.qq.com/s?mid=42&chksm=X",
        "Body text\n\n继续滑动看下一个\n向上滑动看下一个",
        &TrimRules::default(),
    );
    assert_eq!(
        doc,
        format!("{SOURCE_HEADER_LABEL}: https://mp.weixin.qq.com/s?mid=42&chksm=X\n\nBody text")
    );
}
