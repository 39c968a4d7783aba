use crate::error::AuditError;
use crate::extractor::Extractor;
use crate::fetcher::HtmlFetcher;
use crate::models::{HTML_CONTENT_SOURCE, PageAudit, PageElements};
use crate::seo_analyzer::SeoAnalyzer;

/// Audits a single page, fetching it through `F` when no HTML is supplied
pub struct Auditor<F> {
    fetcher: F,
}

impl<F: HtmlFetcher> Auditor<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Audits `html` when given, otherwise fetches `url`.
    ///
    /// Empty strings count as absent. A URL without a scheme is fetched over https.
    pub async fn audit(
        &self,
        url: Option<&str>,
        html: Option<&str>,
    ) -> Result<PageAudit, AuditError> {
        let url = url.map(str::trim).filter(|u| !u.is_empty());
        let html = html.filter(|h| !h.is_empty());

        match (url, html) {
            (url, Some(html)) => Ok(audit_html(url, html)),
            (Some(url), None) => self.inspect_url(url).await.map(|page| page.audit),
            (None, None) => Err(AuditError::NoContent),
        }
    }

    /// Fetches `url` and audits it, keeping the page's raw links for the crawler.
    ///
    /// The document is parsed once for both. An empty body is `NoContent`.
    pub async fn inspect_url(&self, url: &str) -> Result<InspectedPage, AuditError> {
        let target = ensure_scheme(url);
        let html = self.fetcher.fetch_html(&target).await.map_err(|source| {
            tracing::debug!(url = %target, error = %source, "Failed to fetch page for audit");
            AuditError::Fetch {
                url: target.clone(),
                source,
            }
        })?;
        if html.is_empty() {
            return Err(AuditError::NoContent);
        }

        let (elements, hrefs) = Extractor::extract_with_hrefs(&html);
        Ok(InspectedPage {
            audit: build_audit(Some(url), elements),
            hrefs,
        })
    }
}

/// A fetched page's audit plus the anchor `href`s found on it, in document order
#[derive(Debug, Clone)]
pub struct InspectedPage {
    pub audit: PageAudit,
    pub hrefs: Vec<String>,
}

/// Scores already-retrieved HTML. Pure apart from the timestamp.
pub fn audit_html(source_url: Option<&str>, html: &str) -> PageAudit {
    build_audit(source_url, Extractor::extract(html))
}

fn build_audit(source_url: Option<&str>, elements: PageElements) -> PageAudit {
    let card = SeoAnalyzer::score(&elements);

    PageAudit {
        source_url: source_url.unwrap_or(HTML_CONTENT_SOURCE).to_string(),
        audited_at: chrono::Utc::now().to_rfc3339(),
        elements,
        score: card.score,
        grade: SeoAnalyzer::grade(card.score),
        issues: card.issues,
        recommendations: card.recommendations,
    }
}

/// Prepends `https://` when the URL has no http(s) scheme
pub fn ensure_scheme(url: &str) -> String {
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
