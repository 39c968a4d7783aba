use pagegrade::extractor::Extractor;

#[test]
fn test_extract_title_is_first_and_trimmed() {
    let html = "<html><head><title>  My Page  </title><title>Second</title></head></html>";
    let elements = Extractor::extract(html);
    assert_eq!(elements.title, "My Page");
}

#[test]
fn test_missing_elements_yield_empty_values() {
    let elements = Extractor::extract("<html><body></body></html>");
    assert_eq!(elements.title, "");
    assert_eq!(elements.meta_description, "");
    assert!(elements.h1_tags.is_empty());
    assert!(elements.h2_tags.is_empty());
    assert_eq!(elements.image_total, 0);
    assert_eq!(elements.images_missing_alt, 0);
    assert_eq!(elements.link_count, 0);
    assert_eq!(elements.word_count, 0);
    assert!(!elements.has_open_graph);
    assert!(!elements.has_twitter_card);
}

#[test]
fn test_meta_description_matches_name_case_insensitively() {
    let html = r#"<html><head>
        <meta name="keywords" content="a, b">
        <meta NAME="Description" content="  A short summary.  ">
        <meta name="description" content="Ignored second description">
    </head></html>"#;
    let elements = Extractor::extract(html);
    assert_eq!(elements.meta_description, "A short summary.");
}

#[test]
fn test_headings_strip_inner_tags_and_keep_order() {
    let html = r#"<body>
        <h1>Hello <em>World</em></h1>
        <h2> First </h2>
        <h1>Again</h1>
        <h2><a href="/x">Second</a> part</h2>
    </body>"#;
    let elements = Extractor::extract(html);
    assert_eq!(elements.h1_tags, vec!["Hello World", "Again"]);
    assert_eq!(elements.h2_tags, vec!["First", "Second part"]);
}

#[test]
fn test_images_count_alt_presence_including_empty_alt() {
    let html = r#"<body>
        <img src="a.png" alt="A logo">
        <img src="b.png" alt="">
        <img src="c.png">
        <IMG SRC="d.png">
    </body>"#;
    let elements = Extractor::extract(html);
    assert_eq!(elements.image_total, 4);
    assert_eq!(elements.images_missing_alt, 2);
}

#[test]
fn test_link_count_only_counts_anchors_with_href() {
    let html = r##"<body>
        <a href="/one">One</a>
        <a href="#top">Top</a>
        <a name="anchor">No href</a>
        <link href="/style.css" rel="stylesheet">
    </body>"##;
    let elements = Extractor::extract(html);
    assert_eq!(elements.link_count, 2);
}

#[test]
fn test_word_count_ignores_tags_and_collapses_whitespace() {
    let html = "<html><head><title>Two words</title></head>\
                <body><p>one   two\n\tthree</p><p>four</p><div>five<span>six</span></div></body></html>";
    let elements = Extractor::extract(html);
    assert_eq!(elements.word_count, 8);
}

#[test]
fn test_social_tags_detected_case_insensitively() {
    let html = r#"<head>
        <meta PROPERTY="OG:title" content="Title">
        <meta name="Twitter:Card" content="summary">
    </head>"#;
    let elements = Extractor::extract(html);
    assert!(elements.has_open_graph);
    assert!(elements.has_twitter_card);

    let other = Extractor::extract(r#"<meta name="twitter:site" content="@x"><meta property="article:tag" content="x">"#);
    assert!(!other.has_open_graph);
    assert!(!other.has_twitter_card);
}

#[test]
fn test_malformed_markup_does_not_fail() {
    let html = r#"<html><title>Broken <b>title</title><h1>Unclosed <h2>nested</h1><img alt="x > y" src=a.png><a href=/raw>raw"#;
    let elements = Extractor::extract(html);
    assert_eq!(elements.image_total, 1);
    assert_eq!(elements.images_missing_alt, 0);
    assert_eq!(elements.link_count, 1);
    assert_eq!(elements.h1_tags.len(), 1);
}

#[test]
fn test_extract_is_idempotent() {
    let html = r#"<html><head><title>Same</title><meta name="description" content="d"></head>
        <body><h1>x</h1><img src="a"><a href="/b">b</a> words here</body></html>"#;
    assert_eq!(Extractor::extract(html), Extractor::extract(html));
}

#[test]
fn test_extract_hrefs_in_document_order() {
    let html = r##"<body><a href=" /a ">A</a><a>none</a><a href="https://x.test/b#c">B</a><a href="#top">T</a></body>"##;
    assert_eq!(
        Extractor::extract_hrefs(html),
        vec!["/a", "https://x.test/b#c", "#top"]
    );
}
