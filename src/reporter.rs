use crate::models::{CrawlFailure, Grade, Issue, IssueKind, PageAudit, SiteReport};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

pub struct Reporter;

impl Reporter {
    pub fn print_audit_report(audit: &PageAudit) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "PageGrade - SEO Audit".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!("{}: {}", "Source".bright_white().bold(), audit.source_url);
        println!("{}: {}", "Timestamp".bright_white().bold(), audit.audited_at);
        println!(
            "{}: {} ({})",
            "Score".bright_white().bold(),
            audit.score,
            Self::colored_grade(audit.grade)
        );
        println!();

        let elements = &audit.elements;
        println!("{}", "Elements".bright_yellow().bold().underline());
        println!(
            "  Title:            {}",
            if elements.title.is_empty() {
                "(none)".dimmed()
            } else {
                elements.title.bright_white()
            }
        );
        println!(
            "  Meta description: {} chars",
            elements.meta_description.chars().count()
        );
        println!("  H1 tags:          {}", elements.h1_tags.len());
        println!("  H2 tags:          {}", elements.h2_tags.len());
        println!(
            "  Images:           {} ({} missing alt)",
            elements.image_total, elements.images_missing_alt
        );
        println!("  Links:            {}", elements.link_count);
        println!("  Words:            {}", elements.word_count);
        println!(
            "  Open Graph:       {}",
            Self::yes_no(elements.has_open_graph)
        );
        println!(
            "  Twitter Card:     {}",
            Self::yes_no(elements.has_twitter_card)
        );
        println!();

        if !audit.issues.is_empty() {
            println!("{}", "Issues".bright_yellow().bold().underline());
            for issue in &audit.issues {
                Self::print_issue(issue, "  ");
            }
            println!();
        }

        if !audit.recommendations.is_empty() {
            println!("{}", "Recommendations".bright_yellow().bold().underline());
            for recommendation in &audit.recommendations {
                println!("  - {}", recommendation);
            }
            println!();
        }

        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_site_report(report: &SiteReport) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "PageGrade - Site Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        println!(
            "{}: {}",
            "Start URL".bright_white().bold(),
            report.start_url
        );
        println!(
            "{}: {}",
            "Timestamp".bright_white().bold(),
            report.timestamp
        );
        println!();

        let stats = &report.crawl_stats;
        let aggregate = &report.aggregate;
        println!("{}", "Summary".bright_yellow().bold().underline());
        println!(
            "  Pages Crawled:   {}",
            stats.pages_crawled.to_string().bright_green()
        );
        println!(
            "  Depth Reached:   {} (limit {})",
            stats.actual_depth, stats.max_depth
        );
        println!("  Page Limit:      {}", stats.max_pages);
        println!("  Stopped:         {}", stats.termination);
        println!(
            "  Errors:          {}",
            if stats.error_count > 0 {
                stats.error_count.to_string().bright_red()
            } else {
                stats.error_count.to_string().bright_green()
            }
        );
        println!(
            "  Average Score:   {} ({})",
            aggregate.average_score,
            Self::colored_grade(aggregate.grade)
        );
        println!("  Total Issues:    {}", aggregate.total_issues);
        println!();

        if !report.pages.is_empty() {
            println!("{}", "Pages".bright_yellow().bold().underline());
            for page in &report.pages {
                println!(
                    "  [{}] {:>3} {} (depth {}, {} issues)",
                    Self::colored_grade(page.grade),
                    page.score,
                    page.url,
                    page.depth,
                    page.issue_count
                );
            }
            println!();
        }

        if !aggregate.top_issues.is_empty() {
            println!("{}", "Top Issues".bright_yellow().bold().underline());
            for site_issue in &aggregate.top_issues {
                println!("  {} {}", "URL:".bright_white().bold(), site_issue.url);
                Self::print_issue(&site_issue.issue, "    ");
            }
            println!();
        }

        if !aggregate.recommendations.is_empty() {
            println!("{}", "Recommendations".bright_yellow().bold().underline());
            for recommendation in &aggregate.recommendations {
                println!("  - {}", recommendation);
            }
            println!();
        }

        Self::print_crawl_failures(&report.errors);

        println!("{}", "=".repeat(80).bright_blue());
    }

    pub fn print_crawl_failures(errors: &[CrawlFailure]) {
        if errors.is_empty() {
            return;
        }

        println!("{}", "Failed Pages".bright_red().bold().underline());
        for failure in errors {
            println!("  {} {}", failure.url, failure.message.dimmed());
        }
        println!();
    }

    pub fn save_json_report<T: Serialize>(report: &T, filename: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        let mut file = File::create(filename)
            .with_context(|| format!("Failed to create report file: {}", filename))?;
        file.write_all(json.as_bytes())?;
        // stderr, so stdout stays parseable in JSON mode
        eprintln!("Report saved to: {}", filename.bright_green());
        Ok(())
    }

    fn print_issue(issue: &Issue, indent: &str) {
        let severity_str = match issue.kind {
            IssueKind::Critical => "CRIT ".bright_red(),
            IssueKind::Warning => "WARN ".yellow(),
            IssueKind::Info => "INFO ".bright_cyan(),
        };
        println!(
            "{}[{}] {} ({})",
            indent,
            severity_str,
            issue.message,
            issue.category.as_str()
        );
    }

    fn colored_grade(grade: Grade) -> ColoredString {
        let letter = grade.to_string();
        match grade {
            Grade::A | Grade::B => letter.bright_green().bold(),
            Grade::C | Grade::D => letter.yellow().bold(),
            Grade::F => letter.bright_red().bold(),
        }
    }

    fn yes_no(present: bool) -> ColoredString {
        if present {
            "yes".bright_green()
        } else {
            "no".bright_red()
        }
    }
}
