use crate::models::{Grade, Impact, Issue, IssueCategory, IssueKind, PageElements, ScoreCard};

const TITLE_MIN_CHARS: usize = 30;
const TITLE_MAX_CHARS: usize = 60;
const META_DESC_MIN_CHARS: usize = 120;
const META_DESC_MAX_CHARS: usize = 160;
const MIN_WORD_COUNT: usize = 300;

/// Deterministic rule scorer. Every page starts at 100 and loses points per failed check.
pub struct SeoAnalyzer;

impl SeoAnalyzer {
    pub fn score(elements: &PageElements) -> ScoreCard {
        let mut card = Checklist::default();

        // Title
        let title_len = elements.title.chars().count();
        if elements.title.is_empty() {
            card.flag(
                IssueKind::Critical,
                IssueCategory::Title,
                "Missing page title".to_string(),
                15,
                "Add a descriptive <title> tag (50-60 characters recommended)".to_string(),
            );
        } else if title_len < TITLE_MIN_CHARS {
            card.flag(
                IssueKind::Warning,
                IssueCategory::Title,
                format!("Title too short ({} characters)", title_len),
                5,
                "Increase title length to 50-60 characters for better SEO".to_string(),
            );
        } else if title_len > TITLE_MAX_CHARS {
            card.flag(
                IssueKind::Warning,
                IssueCategory::Title,
                format!("Title too long ({} characters)", title_len),
                3,
                "Reduce title length to 50-60 characters to avoid truncation".to_string(),
            );
        }

        // Meta description
        let desc_len = elements.meta_description.chars().count();
        if elements.meta_description.is_empty() {
            card.flag(
                IssueKind::Critical,
                IssueCategory::MetaDescription,
                "Missing meta description".to_string(),
                10,
                "Add a meta description tag (150-160 characters recommended)".to_string(),
            );
        } else if desc_len < META_DESC_MIN_CHARS {
            card.flag(
                IssueKind::Warning,
                IssueCategory::MetaDescription,
                format!("Meta description too short ({} characters)", desc_len),
                3,
                "Increase meta description to 150-160 characters".to_string(),
            );
        } else if desc_len > META_DESC_MAX_CHARS {
            card.flag(
                IssueKind::Warning,
                IssueCategory::MetaDescription,
                format!("Meta description too long ({} characters)", desc_len),
                2,
                "Reduce meta description to 150-160 characters".to_string(),
            );
        }

        // H1
        match elements.h1_tags.len() {
            0 => card.flag(
                IssueKind::Critical,
                IssueCategory::Heading,
                "Missing H1 tag".to_string(),
                10,
                "Add exactly one H1 tag to your page".to_string(),
            ),
            1 => {}
            count => card.flag(
                IssueKind::Warning,
                IssueCategory::Heading,
                format!("Multiple H1 tags found ({})", count),
                5,
                "Use only one H1 tag per page for better SEO".to_string(),
            ),
        }

        // H2
        if elements.h2_tags.is_empty() {
            card.flag(
                IssueKind::Info,
                IssueCategory::Heading,
                "No H2 tags found".to_string(),
                2,
                "Add H2 tags to structure your content".to_string(),
            );
        }

        // Images, two points per image without alt text
        let missing_alt = elements.images_missing_alt;
        if missing_alt > 0 {
            card.flag(
                IssueKind::Warning,
                IssueCategory::Images,
                format!("{} image(s) missing alt text", missing_alt),
                missing_alt.saturating_mul(2),
                format!(
                    "Add alt text to {} image(s) for accessibility and SEO",
                    missing_alt
                ),
            );
        }

        // Content length
        if elements.word_count < MIN_WORD_COUNT {
            card.flag(
                IssueKind::Warning,
                IssueCategory::Content,
                format!("Low word count ({} words)", elements.word_count),
                5,
                "Increase content length to at least 300 words for better SEO".to_string(),
            );
        }

        // Social
        if !elements.has_open_graph {
            card.flag(
                IssueKind::Info,
                IssueCategory::Social,
                "Missing Open Graph tags".to_string(),
                3,
                "Add Open Graph meta tags for better social media sharing".to_string(),
            );
        }
        if !elements.has_twitter_card {
            card.flag(
                IssueKind::Info,
                IssueCategory::Social,
                "Missing Twitter Card tags".to_string(),
                2,
                "Add Twitter Card meta tags for better Twitter sharing".to_string(),
            );
        }

        card.finish()
    }

    pub fn grade(score: u32) -> Grade {
        Grade::from_score(score)
    }
}

#[derive(Default)]
struct Checklist {
    deducted: usize,
    issues: Vec<Issue>,
    recommendations: Vec<String>,
}

impl Checklist {
    fn flag(
        &mut self,
        kind: IssueKind,
        category: IssueCategory,
        message: String,
        deduction: usize,
        recommendation: String,
    ) {
        let impact = match kind {
            IssueKind::Critical => Impact::High,
            IssueKind::Warning => Impact::Medium,
            IssueKind::Info => Impact::Low,
        };
        self.issues.push(Issue {
            kind,
            category,
            message,
            impact,
        });
        self.deducted = self.deducted.saturating_add(deduction);
        if !self.recommendations.contains(&recommendation) {
            self.recommendations.push(recommendation);
        }
    }

    fn finish(self) -> ScoreCard {
        ScoreCard {
            score: 100usize.saturating_sub(self.deducted) as u32,
            issues: self.issues,
            recommendations: self.recommendations,
        }
    }
}
