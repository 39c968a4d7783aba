use crate::aggregator::Aggregator;
use crate::auditor::{Auditor, InspectedPage, ensure_scheme};
use crate::error::{AuditError, CrawlError};
use crate::fetcher::HtmlFetcher;
use crate::models::{
    CrawlFailure, CrawlJob, CrawlTermination, CrawledPage, FrontierEntry, SiteReport,
};
use crate::resolver;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::time::{Instant, sleep, sleep_until};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const DEFAULT_MAX_PAGES: usize = 10;
pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_millis(500);

/// Queued pages plus completed pages may not exceed this multiple of `max_pages`
const FRONTIER_FACTOR: usize = 2;

impl CrawlJob {
    /// Validates limits and normalizes the seed.
    ///
    /// A seed without a scheme is crawled over https; its fragment is dropped.
    pub fn new(seed_url: &str, max_depth: usize, max_pages: usize) -> Result<Self, CrawlError> {
        if max_pages == 0 {
            return Err(CrawlError::InvalidJob(
                "max_pages must be at least 1".to_string(),
            ));
        }

        let candidate = ensure_scheme(seed_url.trim());
        let seed_url = resolver::normalize(&candidate, &candidate)
            .filter(|url| resolver::origin(url).is_some())
            .ok_or_else(|| CrawlError::InvalidSeed(seed_url.to_string()))?;

        Ok(Self {
            seed_url,
            max_depth,
            max_pages,
        })
    }
}

/// Timing knobs for a crawl
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Pause between successive page fetches
    pub politeness_delay: Duration,
    /// Overall wall-clock budget; reaching it ends the crawl cleanly
    pub time_budget: Option<Duration>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            politeness_delay: DEFAULT_POLITENESS_DELAY,
            time_budget: None,
        }
    }
}

/// Mutable traversal state, owned by a single `crawl` call
struct CrawlState {
    visited: HashSet<String>,
    queue: VecDeque<FrontierEntry>,
    completed: Vec<CrawledPage>,
    errors: Vec<CrawlFailure>,
}

impl CrawlState {
    fn new(seed_url: &str) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry {
            url: seed_url.to_string(),
            depth: 0,
        });

        Self {
            visited: HashSet::new(),
            queue,
            completed: Vec::new(),
            errors: Vec::new(),
        }
    }
}

/// Breadth-first site auditor.
///
/// Pages are fetched one at a time in discovery order. Failed pages are
/// recorded and skipped; the crawl only fails when nothing could be audited.
pub struct Crawler<F> {
    auditor: Auditor<F>,
    job: CrawlJob,
    options: CrawlOptions,
    base_origin: String,
    progress_bar: Option<ProgressBar>,
}

impl<F: HtmlFetcher> Crawler<F> {
    pub fn new(fetcher: F, job: CrawlJob, options: CrawlOptions) -> Result<Self, CrawlError> {
        let base_origin = resolver::origin(&job.seed_url)
            .ok_or_else(|| CrawlError::InvalidSeed(job.seed_url.clone()))?;

        Ok(Self {
            auditor: Auditor::new(fetcher),
            job,
            options,
            base_origin,
            progress_bar: None,
        })
    }

    pub fn job(&self) -> &CrawlJob {
        &self.job
    }

    /// Enable progress bar for crawling
    pub fn enable_progress_bar(&mut self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("[{elapsed_precise}] {spinner:.cyan} Auditing: {pos} pages {msg}")
                .expect("Progress bar template should be valid"),
        );
        self.progress_bar = Some(pb);
    }

    /// Runs the crawl to completion, cancellation, or deadline.
    ///
    /// Cancellation and deadlines are not errors: they return the report over
    /// whatever was audited so far.
    pub async fn crawl(&self, cancel: &CancellationToken) -> Result<SiteReport, CrawlError> {
        let deadline = self.options.time_budget.map(|budget| Instant::now() + budget);
        let max_pages = self.job.max_pages;
        let mut state = CrawlState::new(&self.job.seed_url);

        tracing::info!(
            seed = %self.job.seed_url,
            max_depth = self.job.max_depth,
            max_pages,
            "Starting deep crawl"
        );

        if let Some(ref pb) = self.progress_bar {
            pb.set_position(0);
        }

        let termination = 'crawl: loop {
            if cancel.is_cancelled() {
                break CrawlTermination::Cancelled;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break CrawlTermination::Deadline;
            }
            if state.completed.len() >= max_pages {
                break CrawlTermination::PageLimit;
            }
            let Some(entry) = state.queue.pop_front() else {
                break CrawlTermination::Exhausted;
            };

            if state.visited.contains(&entry.url) || entry.depth > self.job.max_depth {
                continue;
            }
            state.visited.insert(entry.url.clone());

            tracing::info!(
                url = %entry.url,
                depth = entry.depth,
                "Crawling page ({}/{})",
                state.completed.len() + 1,
                max_pages
            );

            let inspected = tokio::select! {
                biased;
                _ = cancel.cancelled() => break 'crawl CrawlTermination::Cancelled,
                _ = wait_for(deadline) => break 'crawl CrawlTermination::Deadline,
                result = self.auditor.inspect_url(&entry.url) => result,
            };

            match inspected {
                Ok(InspectedPage { audit, hrefs }) => {
                    tracing::info!(
                        url = %entry.url,
                        score = audit.score,
                        grade = %audit.grade,
                        "Audited page"
                    );
                    state.completed.push(CrawledPage {
                        url: entry.url.clone(),
                        depth: entry.depth,
                        audit,
                    });

                    if entry.depth < self.job.max_depth && state.completed.len() < max_pages {
                        self.expand_frontier(&mut state, &hrefs, &entry);
                    }
                }
                Err(AuditError::Fetch { source, .. }) => {
                    let message = format!("Failed to fetch: {}", source);
                    self.record_failure(&mut state, &entry.url, message);
                }
                Err(e) => {
                    self.record_failure(&mut state, &entry.url, e.to_string());
                }
            }

            if let Some(ref pb) = self.progress_bar {
                pb.set_position(state.completed.len() as u64);
                pb.set_message(format!("({} errors)", state.errors.len()));
            }

            let more_to_do = !state.queue.is_empty() && state.completed.len() < max_pages;
            if more_to_do && !self.options.politeness_delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break 'crawl CrawlTermination::Cancelled,
                    _ = wait_for(deadline) => break 'crawl CrawlTermination::Deadline,
                    _ = sleep(self.options.politeness_delay) => {}
                }
            }
        };

        if let Some(ref pb) = self.progress_bar {
            pb.finish_with_message(format!("Audited {} pages", state.completed.len()));
        }

        tracing::info!(
            pages = state.completed.len(),
            errors = state.errors.len(),
            termination = ?termination,
            "Deep crawl finished"
        );

        let ran_to_end = matches!(
            termination,
            CrawlTermination::Exhausted | CrawlTermination::PageLimit
        );
        if state.completed.is_empty() && ran_to_end {
            let stats = Aggregator::crawl_stats(&self.job, &[], state.errors.len(), termination);
            return Err(CrawlError::NoPagesCrawled {
                errors: state.errors,
                stats,
            });
        }

        Ok(Aggregator::build_report(
            &self.job,
            state.completed,
            state.errors,
            termination,
        ))
    }

    fn expand_frontier(&self, state: &mut CrawlState, hrefs: &[String], entry: &FrontierEntry) {
        let links = resolver::internal_links(hrefs, &entry.url, &self.base_origin);
        let limit = self.job.max_pages.saturating_mul(FRONTIER_FACTOR);
        let mut queued = 0;

        for link in &links {
            if state.visited.contains(link) {
                continue;
            }
            if state.queue.len() + state.completed.len() >= limit {
                break;
            }
            state.queue.push_back(FrontierEntry {
                url: link.clone(),
                depth: entry.depth + 1,
            });
            queued += 1;
        }

        tracing::debug!(
            url = %entry.url,
            found = links.len(),
            queued,
            frontier = state.queue.len(),
            "Expanded frontier"
        );
    }

    fn record_failure(&self, state: &mut CrawlState, url: &str, message: String) {
        tracing::warn!(url = %url, error = %message, "Failed to crawl page");
        state.errors.push(CrawlFailure {
            url: url.to_string(),
            message,
        });
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
