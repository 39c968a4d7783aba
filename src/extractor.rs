use crate::models::PageElements;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

// Cached selectors
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector should be valid"));
static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta").expect("meta selector should be valid"));
static H1_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1").expect("h1 selector should be valid"));
static H2_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("h2 selector should be valid"));
static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("img selector should be valid"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("a[href] selector should be valid"));

/// Pulls on-page SEO signals out of raw HTML.
///
/// Parsing goes through html5ever, so malformed markup never fails: a missing
/// element simply leaves the matching field at its empty value.
pub struct Extractor;

impl Extractor {
    pub fn extract(html: &str) -> PageElements {
        Self::extract_document(&Html::parse_document(html))
    }

    /// Elements and raw anchor `href`s from a single parse of `html`
    pub fn extract_with_hrefs(html: &str) -> (PageElements, Vec<String>) {
        let document = Html::parse_document(html);
        (
            Self::extract_document(&document),
            Self::document_hrefs(&document),
        )
    }

    /// Raw `href` values of every anchor, in document order
    pub fn extract_hrefs(html: &str) -> Vec<String> {
        Self::document_hrefs(&Html::parse_document(html))
    }

    fn extract_document(document: &Html) -> PageElements {
        let (images, missing_alt) = Self::count_images(document);

        PageElements {
            title: Self::extract_title(document),
            meta_description: Self::extract_meta_description(document),
            h1_tags: Self::extract_headings(document, &H1_SELECTOR),
            h2_tags: Self::extract_headings(document, &H2_SELECTOR),
            image_total: images,
            images_missing_alt: missing_alt,
            link_count: document.select(&ANCHOR_SELECTOR).count(),
            word_count: Self::count_words(document),
            has_open_graph: Self::has_open_graph(document),
            has_twitter_card: Self::has_twitter_card(document),
        }
    }

    fn document_hrefs(document: &Html) -> Vec<String> {
        document
            .select(&ANCHOR_SELECTOR)
            .filter_map(|el| el.value().attr("href"))
            .map(|href| href.trim().to_string())
            .collect()
    }

    fn extract_title(document: &Html) -> String {
        document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| inner_text(&el))
            .unwrap_or_default()
    }

    fn extract_meta_description(document: &Html) -> String {
        document
            .select(&META_SELECTOR)
            .filter(|el| {
                el.value()
                    .attr("name")
                    .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
            })
            .find_map(|el| el.value().attr("content"))
            .map(|content| content.trim().to_string())
            .unwrap_or_default()
    }

    fn extract_headings(document: &Html, selector: &Selector) -> Vec<String> {
        document.select(selector).map(|el| inner_text(&el)).collect()
    }

    fn count_images(document: &Html) -> (usize, usize) {
        document
            .select(&IMG_SELECTOR)
            .fold((0, 0), |(total, missing), el| {
                let has_alt = el.value().attr("alt").is_some();
                (total + 1, missing + usize::from(!has_alt))
            })
    }

    fn count_words(document: &Html) -> usize {
        // Text nodes are visited separately so that adjacent elements never glue words together
        document
            .root_element()
            .text()
            .map(|chunk| chunk.split_whitespace().count())
            .sum()
    }

    fn has_open_graph(document: &Html) -> bool {
        document.select(&META_SELECTOR).any(|el| {
            el.value().attr("property").is_some_and(|property| {
                property
                    .trim()
                    .get(..3)
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case("og:"))
            })
        })
    }

    fn has_twitter_card(document: &Html) -> bool {
        document.select(&META_SELECTOR).any(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("twitter:card"))
        })
    }
}

fn inner_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
