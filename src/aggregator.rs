use crate::models::{
    AggregateSummary, CrawlFailure, CrawlJob, CrawlStats, CrawlTermination, CrawledPage, Grade,
    IssueCategory, PageSummary, SiteIssue, SiteReport,
};
use std::collections::{BTreeMap, HashSet};

/// Maximum number of critical/warning issues listed in a site report
pub const TOP_ISSUES_LIMIT: usize = 20;

/// Folds per-page audits into site-level figures
pub struct Aggregator;

impl Aggregator {
    pub fn aggregate(pages: &[CrawledPage]) -> AggregateSummary {
        let average_score = Self::average_score(pages);

        let mut issues_by_category: BTreeMap<IssueCategory, Vec<SiteIssue>> = BTreeMap::new();
        let mut top_issues = Vec::new();
        let mut total_issues = 0;
        let mut recommendations = Vec::new();
        let mut seen_recommendations = HashSet::new();

        for page in pages {
            for issue in &page.audit.issues {
                total_issues += 1;
                let tagged = SiteIssue {
                    url: page.url.clone(),
                    issue: issue.clone(),
                };

                if issue.is_actionable() && top_issues.len() < TOP_ISSUES_LIMIT {
                    top_issues.push(tagged.clone());
                }
                issues_by_category
                    .entry(issue.category)
                    .or_default()
                    .push(tagged);
            }

            for recommendation in &page.audit.recommendations {
                if seen_recommendations.insert(recommendation.as_str()) {
                    recommendations.push(recommendation.clone());
                }
            }
        }

        AggregateSummary {
            average_score,
            grade: Grade::from_score(average_score),
            total_issues,
            total_recommendations: recommendations.len(),
            issues_by_category,
            top_issues,
            recommendations,
        }
    }

    /// Rounded mean score, 0 for an empty crawl
    pub fn average_score(pages: &[CrawledPage]) -> u32 {
        if pages.is_empty() {
            return 0;
        }

        let total: u64 = pages.iter().map(|p| u64::from(p.audit.score)).sum();
        (total as f64 / pages.len() as f64).round().max(0.0) as u32
    }

    pub fn crawl_stats(
        job: &CrawlJob,
        pages: &[CrawledPage],
        error_count: usize,
        termination: CrawlTermination,
    ) -> CrawlStats {
        CrawlStats {
            pages_crawled: pages.len(),
            max_depth: job.max_depth,
            max_pages: job.max_pages,
            actual_depth: pages.iter().map(|p| p.depth).max().unwrap_or(0),
            error_count,
            termination,
        }
    }

    pub fn page_summaries(pages: &[CrawledPage]) -> Vec<PageSummary> {
        pages
            .iter()
            .map(|page| PageSummary {
                url: page.url.clone(),
                depth: page.depth,
                score: page.audit.score,
                grade: page.audit.grade,
                issue_count: page.audit.issues.len(),
            })
            .collect()
    }

    /// Builds the final report once a crawl has stopped
    pub fn build_report(
        job: &CrawlJob,
        pages: Vec<CrawledPage>,
        errors: Vec<CrawlFailure>,
        termination: CrawlTermination,
    ) -> SiteReport {
        SiteReport {
            start_url: job.seed_url.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            crawl_stats: Self::crawl_stats(job, &pages, errors.len(), termination),
            aggregate: Self::aggregate(&pages),
            pages: Self::page_summaries(&pages),
            detailed_pages: pages,
            errors,
        }
    }
}
