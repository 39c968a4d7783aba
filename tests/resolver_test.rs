use pagegrade::extractor::Extractor;
use pagegrade::resolver::{internal_links, is_excluded, is_same_origin, normalize, origin};

const BASE: &str = "https://example.com/blog/post";

#[test]
fn test_normalize_root_relative() {
    assert_eq!(
        normalize("/about", BASE).as_deref(),
        Some("https://example.com/about")
    );
}

#[test]
fn test_normalize_protocol_relative_takes_base_scheme() {
    assert_eq!(
        normalize("//cdn.example.com/lib.js", BASE).as_deref(),
        Some("https://cdn.example.com/lib.js")
    );
    assert_eq!(
        normalize("//example.com/x", "http://example.com/").as_deref(),
        Some("http://example.com/x")
    );
}

#[test]
fn test_normalize_directory_relative() {
    assert_eq!(
        normalize("other-post", BASE).as_deref(),
        Some("https://example.com/blog/other-post")
    );
    assert_eq!(
        normalize("child", "https://example.com/blog/").as_deref(),
        Some("https://example.com/blog/child")
    );
}

#[test]
fn test_normalize_strips_fragment_and_keeps_query() {
    assert_eq!(
        normalize("https://example.com/page?x=1#section", BASE).as_deref(),
        Some("https://example.com/page?x=1")
    );
    assert_eq!(
        normalize("/docs#intro", BASE).as_deref(),
        Some("https://example.com/docs")
    );
}

#[test]
fn test_normalize_rejects_malformed_and_non_http() {
    assert_eq!(normalize("http://[::1", BASE), None);
    assert_eq!(normalize("/about", "not a base url"), None);
    assert_eq!(normalize("ftp://example.com/file", BASE), None);
    assert_eq!(normalize("mailto:someone@example.com", BASE), None);
}

#[test]
fn test_same_origin_compares_scheme_host_and_port() {
    let base_origin = origin("https://example.com/start").unwrap();
    assert!(is_same_origin("https://example.com/other", &base_origin));
    assert!(!is_same_origin("http://example.com/other", &base_origin));
    assert!(!is_same_origin("https://sub.example.com/", &base_origin));
    assert!(!is_same_origin("https://example.com:8443/", &base_origin));
    assert!(!is_same_origin("garbage", &base_origin));
}

#[test]
fn test_excluded_candidates() {
    for href in ["", "   ", "#", "#main", "javascript:void(0)", "mailto:a@b.c", "tel:555"] {
        assert!(is_excluded(href), "{:?} should be excluded", href);
    }
    assert!(!is_excluded("/contact"));
}

#[test]
fn test_internal_links_filters_resolves_and_dedups() {
    let html = r##"<body>
        <a href="/b">B</a>
        <a href="/a">A</a>
        <a href="/a#again">A again</a>
        <a href="sibling">Sibling</a>
        <a href="https://example.com/b">B absolute</a>
        <a href="https://elsewhere.com/">External</a>
        <a href="http://example.com/insecure">Other scheme</a>
        <a href="#top">Top</a>
        <a href="mailto:x@example.com">Mail</a>
        <a href="javascript:alert(1)">JS</a>
    </body>"##;

    let links = internal_links(&Extractor::extract_hrefs(html), BASE, "https://example.com");
    assert_eq!(
        links,
        vec![
            "https://example.com/b",
            "https://example.com/a",
            "https://example.com/blog/sibling",
        ]
    );
}
