pub mod aggregator;
pub mod auditor;
pub mod cli;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod reporter;
pub mod resolver;
pub mod seo_analyzer;

use anyhow::{Context, Result};
use auditor::Auditor;
use cli::Cli;
use colored::*;
use config::Config;
use crawler::{CrawlOptions, Crawler};
use error::CrawlError;
use fetcher::HttpFetcher;
use models::CrawlJob;
use reporter::Reporter;
use serde::Serialize;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub use auditor::audit_html;
pub use error::{AuditError, FetchError};
pub use fetcher::HtmlFetcher;
pub use models::{PageAudit, SiteReport};

/// Audits one page: from `html` when given, otherwise by fetching `url`
pub async fn audit_single_page(
    fetcher: impl HtmlFetcher,
    url: Option<&str>,
    html: Option<&str>,
) -> Result<PageAudit, AuditError> {
    Auditor::new(fetcher).audit(url, html).await
}

/// Crawls a site breadth-first from `seed_url` and aggregates every audited page
pub async fn deep_crawl(
    fetcher: impl HtmlFetcher,
    seed_url: &str,
    max_depth: usize,
    max_pages: usize,
    options: CrawlOptions,
    cancel: &CancellationToken,
) -> Result<SiteReport, CrawlError> {
    let job = CrawlJob::new(seed_url, max_depth, max_pages)?;
    Crawler::new(fetcher, job, options)?.crawl(cancel).await
}

pub async fn run(args: Cli) -> Result<()> {
    let args = match Config::load_for(&args)? {
        Some(config) => config.merge_with_cli(&args),
        None => args,
    };

    let text_output = args.output != "json";
    if text_output {
        println!(
            "{}",
            "PageGrade - SEO Auditor & Site Crawler".bright_cyan().bold()
        );
        println!("{}", "=".repeat(50).bright_blue());
        println!();
    }

    if args.deep {
        run_deep_crawl(&args, text_output).await
    } else {
        run_single_audit(&args, text_output).await
    }
}

async fn run_single_audit(args: &Cli, text_output: bool) -> Result<()> {
    let html = match &args.html {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read HTML file: {}", path))?,
        ),
        None => None,
    };

    if args.url.is_none() && html.is_none() {
        anyhow::bail!("Either a URL or an --html file must be provided");
    }

    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout))?;
    let audit = audit_single_page(fetcher, args.url.as_deref(), html.as_deref()).await?;

    emit(args, &audit, text_output, || Reporter::print_audit_report(&audit))
}

async fn run_deep_crawl(args: &Cli, text_output: bool) -> Result<()> {
    let Some(url) = args.url.as_deref() else {
        anyhow::bail!("A deep crawl needs a starting URL");
    };
    if args.html.is_some() {
        anyhow::bail!("--html cannot be combined with --deep; crawled pages are always fetched");
    }

    let job = CrawlJob::new(url, args.depth, args.max_pages)?;
    if text_output {
        println!("{} {}", "Starting crawl:".bright_white().bold(), job.seed_url);
        println!("{} {}", "Max depth:".bright_white().bold(), job.max_depth);
        println!("{} {}", "Max pages:".bright_white().bold(), job.max_pages);
        println!();
    }

    let options = CrawlOptions {
        politeness_delay: Duration::from_millis(args.delay_ms),
        time_budget: args.crawl_timeout.map(Duration::from_secs),
    };
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout))?;
    let mut crawler = Crawler::new(fetcher, job, options)?;
    if args.verbose {
        crawler.enable_progress_bar();
    }

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let result = crawler.crawl(&cancel).await;
    ctrl_c.abort();

    match result {
        Ok(report) => emit(args, &report, text_output, || {
            Reporter::print_site_report(&report)
        }),
        Err(e) => {
            if let CrawlError::NoPagesCrawled { errors, .. } = &e {
                Reporter::print_crawl_failures(errors);
            }
            Err(e.into())
        }
    }
}

fn emit<T: Serialize>(
    args: &Cli,
    report: &T,
    text_output: bool,
    print_text: impl FnOnce(),
) -> Result<()> {
    if text_output {
        print_text();
    } else {
        let json = serde_json::to_string_pretty(report)?;
        println!("{}", json);
    }

    // Save to file if requested
    if let Some(filename) = &args.save {
        Reporter::save_json_report(report, filename)?;
    }

    Ok(())
}
