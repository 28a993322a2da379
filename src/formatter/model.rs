use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::formatter::settings::AdvancedArticleSettings;

/// Optional AI-analysis hints passed into a formatting call: a suggested
/// excerpt for the intro quote and candidate related-article links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentAnalysisSummary {
    pub excerpt: Option<String>,
    pub related_articles: Vec<RelatedArticle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedArticle {
    pub url: String,
    pub title: String,
}

/// Audit metadata attached to every formatting result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattingMetadata {
    pub has_header_disclaimer: bool,
    pub has_footer_disclaimer: bool,
    pub author_name: Option<String>,
    /// One human-readable entry per transformation actually applied,
    /// in application order.
    pub applied_rules: Vec<String>,
    pub processed_at: DateTime<Utc>,
    pub error: Option<String>,
}

/// Output of one `format_article` call. Created fresh per call and never
/// mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleFormattingResult {
    pub formatted_content: String,
    pub applied_settings: AdvancedArticleSettings,
    pub metadata: FormattingMetadata,
}
