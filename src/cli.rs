use clap::Parser;

pub const DEFAULT_DEPTH: usize = 3;
pub const DEFAULT_MAX_PAGES: usize = 10;
pub const DEFAULT_DELAY_MS: u64 = 500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_OUTPUT: &str = "text";

#[derive(Parser, Debug, Clone)]
#[command(name = "pagegrade")]
#[command(about = "A rule-based SEO auditor and site crawler", long_about = None)]
pub struct Cli {
    /// The URL to audit, or to start crawling from with --deep
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Audit HTML read from this file instead of fetching the URL
    #[arg(long, value_name = "FILE")]
    pub html: Option<String>,

    /// Crawl the site's internal links and report on every page
    #[arg(long)]
    pub deep: bool,

    /// Maximum crawl depth (default: 3)
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Maximum number of pages to audit (default: 10)
    #[arg(short, long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Delay between page fetches in milliseconds (default: 500)
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    pub delay_ms: u64,

    /// Per-request timeout in seconds (default: 15)
    #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Stop a deep crawl after this many seconds and report what was audited
    #[arg(long, value_name = "SECS")]
    pub crawl_timeout: Option<u64>,

    /// Output format: text or json
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: String,

    /// Save report to file
    #[arg(short, long)]
    pub save: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to configuration file (JSON, TOML, or YAML)
    #[arg(long)]
    pub config: Option<String>,
}
