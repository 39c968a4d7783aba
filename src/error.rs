use crate::models::{CrawlFailure, CrawlStats};
use thiserror::Error;

/// Failure to retrieve HTML for a URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error(
        "Website blocked automated access (403 Forbidden). Try supplying the HTML content directly or a different URL."
    )]
    Blocked,

    #[error("Page not found (404). Please check if the URL is correct.")]
    NotFound,

    #[error("Server error ({status}). The website server encountered an error.")]
    ServerError { status: u16 },

    #[error("HTTP {status}. Failed to fetch URL.")]
    Http { status: u16 },

    #[error("No response from server ({reason}). The URL might be unreachable.")]
    Unreachable { reason: String },

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Failed to read response body: {reason}")]
    Body { reason: String },
}

impl FetchError {
    /// Maps a non-success HTTP status to its error kind
    pub fn from_status(status: u16) -> Self {
        match status {
            403 => FetchError::Blocked,
            404 => FetchError::NotFound,
            500..=599 => FetchError::ServerError { status },
            _ => FetchError::Http { status },
        }
    }
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to fetch URL {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Either URL or HTML content must be provided")]
    NoContent,

    /// Extraction is total over any input text, so this is not produced by the bundled extractor
    #[error("Failed to parse HTML content: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid starting URL: {0}")]
    InvalidSeed(String),

    #[error("Invalid crawl limits: {0}")]
    InvalidJob(String),

    #[error("No pages were successfully crawled ({} errors)", .errors.len())]
    NoPagesCrawled {
        errors: Vec<CrawlFailure>,
        stats: CrawlStats,
    },
}
