use crate::error::FetchError;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, header};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Browser-like headers used for the first attempt at every page
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const CONNECTION: &str = "keep-alive";

/// Bare User-Agent sent when a site rejects the browser-like request with 403
const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_REDIRECTS: usize = 5;

/// Retrieves the HTML body behind a URL.
///
/// The auditor and crawler only ever talk to the network through this trait,
/// so tests and embedding applications can supply their own transport.
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: HtmlFetcher + ?Sized> HtmlFetcher for Arc<T> {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        (**self).fetch_html(url).await
    }
}

/// Creates a reqwest client with standard browser-like headers and configuration
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static(ACCEPT_LANGUAGE),
    );
    headers.insert(
        header::CONNECTION,
        header::HeaderValue::from_static(CONNECTION),
    );
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        header::HeaderValue::from_static("1"),
    );
    headers.insert(
        header::HeaderName::from_static("sec-fetch-dest"),
        header::HeaderValue::from_static("document"),
    );
    headers.insert(
        header::HeaderName::from_static("sec-fetch-mode"),
        header::HeaderValue::from_static("navigate"),
    );
    headers.insert(
        header::HeaderName::from_static("sec-fetch-site"),
        header::HeaderValue::from_static("none"),
    );
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("max-age=0"),
    );

    let client = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(client)
}

fn build_fallback_client(timeout: Duration) -> Result<Client> {
    let client = ClientBuilder::new()
        .user_agent(FALLBACK_USER_AGENT)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;

    Ok(client)
}

/// [`HtmlFetcher`] backed by reqwest
pub struct HttpFetcher {
    client: Client,
    fallback: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            fallback: build_fallback_client(timeout)?,
        })
    }

    async fn get(client: &Client, url: &Url) -> Result<String, FetchError> {
        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_request_error)?;

        // 3xx that reqwest did not follow (304, no Location) still carries a usable body
        let status = response.status();
        if !status.is_success() && !status.is_redirection() {
            return Err(FetchError::from_status(status.as_u16()));
        }

        if let Some(content_type) = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            let ct_lower = content_type.to_lowercase();
            if !ct_lower.contains("text/html") && !ct_lower.contains("application/xhtml") {
                tracing::warn!(
                    url = %url,
                    content_type = %content_type,
                    "Non-HTML content type detected, auditing anyway"
                );
            }
        }

        response.text().await.map_err(|e| FetchError::Body {
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl HtmlFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        match Self::get(&self.client, &parsed).await {
            Err(FetchError::Blocked) => {
                tracing::warn!(url = %url, "403 received, retrying with simpler headers");
                Self::get(&self.fallback, &parsed).await
            }
            result => result,
        }
    }
}

fn classify_request_error(error: reqwest::Error) -> FetchError {
    if let Some(status) = error.status() {
        return FetchError::from_status(status.as_u16());
    }

    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };

    FetchError::Unreachable { reason }
}
