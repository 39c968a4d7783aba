use std::collections::HashSet;
use url::Url;

/// Link schemes that never point at a crawlable page
const SKIPPED_PREFIXES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Returns true for hrefs that are dropped before resolution:
/// empty values, bare fragments and non-navigational schemes.
pub fn is_excluded(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return true;
    }

    SKIPPED_PREFIXES.iter().any(|prefix| {
        href.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Resolves `href` against `base_url` and strips its fragment.
///
/// Handles absolute, root-relative (`/path`), protocol-relative (`//host/path`)
/// and directory-relative (`path`) forms. Returns `None` when either side is
/// malformed or the result is not an http(s) URL.
pub fn normalize(href: &str, base_url: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    let mut resolved = base.join(href.trim()).ok()?;

    match resolved.scheme() {
        "http" | "https" => {}
        _ => return None,
    }

    resolved.set_fragment(None);
    Some(resolved.to_string())
}

/// `scheme://host[:port]` of an http(s) URL
pub fn origin(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed.origin().ascii_serialization()),
        _ => None,
    }
}

pub fn is_same_origin(url: &str, base_origin: &str) -> bool {
    origin(url).is_some_and(|o| o == base_origin)
}

/// Every distinct same-origin link among a page's raw `hrefs`, resolved against
/// `current_url`, in first-seen order
pub fn internal_links<S: AsRef<str>>(
    hrefs: &[S],
    current_url: &str,
    base_origin: &str,
) -> Vec<String> {
    let mut seen = HashSet::new();

    hrefs
        .iter()
        .map(AsRef::as_ref)
        .filter(|href| !is_excluded(href))
        .filter_map(|href| normalize(href, current_url))
        .filter(|link| is_same_origin(link, base_origin))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}
