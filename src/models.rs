use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Marker used as the audit source when raw HTML was supplied instead of a URL
pub const HTML_CONTENT_SOURCE: &str = "HTML Content Provided";

/// SEO-relevant facts extracted from a single HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageElements {
    pub title: String,
    pub meta_description: String,
    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,
    pub image_total: usize,
    pub images_missing_alt: usize,
    pub link_count: usize,
    pub word_count: usize,
    pub has_open_graph: bool,
    pub has_twitter_card: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Title,
    MetaDescription,
    Heading,
    Images,
    Content,
    Social,
}

impl IssueCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCategory::Title => "title",
            IssueCategory::MetaDescription => "meta_description",
            IssueCategory::Heading => "heading",
            IssueCategory::Images => "images",
            IssueCategory::Content => "content",
            IssueCategory::Social => "social",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub category: IssueCategory,
    pub message: String,
    pub impact: Impact,
}

impl Issue {
    /// Critical and warning issues are the ones surfaced in a site's top issues
    pub fn is_actionable(&self) -> bool {
        matches!(self.kind, IssueKind::Critical | IssueKind::Warning)
    }
}

/// Letter bucket for a 0-100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// Outcome of the rule scorer for one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    pub score: u32,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAudit {
    pub source_url: String,
    pub audited_at: String,
    pub elements: PageElements,
    pub score: u32,
    pub grade: Grade,
    pub issues: Vec<Issue>,
    pub recommendations: Vec<String>,
}

/// Limits for one deep crawl. Built through [`CrawlJob::new`] so the limits are always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlJob {
    pub seed_url: String,
    pub max_depth: usize,
    pub max_pages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub url: String,
    pub depth: usize,
}

/// A successfully audited page together with the depth it was discovered at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawledPage {
    pub url: String,
    pub depth: usize,
    pub audit: PageAudit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlFailure {
    pub url: String,
    pub message: String,
}

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlTermination {
    /// The frontier ran dry
    Exhausted,
    /// `max_pages` audits completed
    PageLimit,
    /// The overall time budget ran out
    Deadline,
    /// The job's cancellation token fired
    Cancelled,
}

impl fmt::Display for CrawlTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            CrawlTermination::Exhausted => "no more links to follow",
            CrawlTermination::PageLimit => "page limit reached",
            CrawlTermination::Deadline => "crawl time limit reached",
            CrawlTermination::Cancelled => "cancelled",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    pub pages_crawled: usize,
    pub max_depth: usize,
    pub max_pages: usize,
    pub actual_depth: usize,
    pub error_count: usize,
    pub termination: CrawlTermination,
}

/// An issue tagged with the page it was found on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIssue {
    pub url: String,
    #[serde(flatten)]
    pub issue: Issue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub average_score: u32,
    pub grade: Grade,
    pub total_issues: usize,
    pub total_recommendations: usize,
    pub issues_by_category: BTreeMap<IssueCategory, Vec<SiteIssue>>,
    pub top_issues: Vec<SiteIssue>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub url: String,
    pub depth: usize,
    pub score: u32,
    pub grade: Grade,
    pub issue_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteReport {
    pub start_url: String,
    pub timestamp: String,
    pub crawl_stats: CrawlStats,
    pub aggregate: AggregateSummary,
    pub pages: Vec<PageSummary>,
    pub detailed_pages: Vec<CrawledPage>,
    pub errors: Vec<CrawlFailure>,
}
