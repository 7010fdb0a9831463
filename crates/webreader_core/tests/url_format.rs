use pretty_assertions::assert_eq;
use webreader_core::{canonicalize_article_url, RequestFormatter, DEFAULT_ENDPOINT_BASE};

#[test]
fn repeated_checksum_collapses_to_first_value() {
    let cleaned =
        canonicalize_article_url("https://x.com/s?a=1&chksm=AAA&b=2&chksm=BBB").unwrap();
    assert_eq!(cleaned, "https://x.com/s?a=1&chksm=AAA&b=2");
}

#[test]
fn url_without_repeats_is_unchanged() {
    let url = "https://x.com/a?mid=5&chksm=ONE#frag";
    assert_eq!(canonicalize_article_url(url).unwrap(), url);
}

#[test]
fn fragment_survives_checksum_cleanup() {
    let cleaned = canonicalize_article_url("https://x.com/a?chksm=1&chksm=2#frag").unwrap();
    assert_eq!(cleaned, "https://x.com/a?chksm=1#frag");
}

#[test]
fn request_embeds_encoded_url_as_single_segment() {
    let formatter = RequestFormatter::new(DEFAULT_ENDPOINT_BASE, "key123");
    let request = formatter.format("https://mp.weixin.qq.com/s?mid=42&chksm=X&chksm=Y");

    assert_eq!(request.cleaned, "https://mp.weixin.qq.com/s?mid=42&chksm=X");
    assert_eq!(
        request.encoded,
        "https%3A%2F%2Fmp.weixin.qq.com%2Fs%3Fmid%3D42%26chksm%3DX"
    );
    assert_eq!(
        request.request_url,
        "https://api.unifuncs.com/api/web-reader/https%3A%2F%2Fmp.weixin.qq.com%2Fs%3Fmid%3D42%26chksm%3DX?apiKey=key123"
    );
    assert_eq!(request.request_url.matches("chksm").count(), 1);
}

#[test]
fn trailing_slash_on_endpoint_is_tolerated() {
    let formatter = RequestFormatter::new("http://localhost:9000/reader/", "k");
    let request = formatter.format("https://x.com/a");
    assert!(request
        .request_url
        .starts_with("http://localhost:9000/reader/https%3A%2F%2Fx.com%2Fa?apiKey="));
    assert_eq!(formatter.endpoint_base(), "http://localhost:9000/reader");
}

#[test]
fn unparsable_url_falls_back_to_raw_encoding() {
    let formatter = RequestFormatter::new("http://api", "k");
    let request = formatter.format("not a url/with?chksm=1&chksm=2");

    assert_eq!(request.cleaned, "not a url/with?chksm=1&chksm=2");
    assert_eq!(request.encoded, "not%20a%20url%2Fwith%3Fchksm%3D1%26chksm%3D2");
    assert_eq!(
        request.request_url,
        "http://api/not%20a%20url%2Fwith%3Fchksm%3D1%26chksm%3D2?apiKey=k"
    );
}

#[test]
fn empty_api_key_still_builds_a_request() {
    let formatter = RequestFormatter::new("http://api", "");
    let request = formatter.format("https://x.com/a");
    assert!(request.request_url.ends_with("?apiKey="));
}

#[test]
fn api_key_is_percent_encoded() {
    let formatter = RequestFormatter::new("http://api", "a&b=c");
    let request = formatter.format("https://x.com/a");
    assert!(request.request_url.ends_with("?apiKey=a%26b%3Dc"));
}
