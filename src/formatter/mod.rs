pub mod errors;
pub mod model;
pub mod passes;
pub mod registry;
pub mod settings;

#[cfg(test)]
mod tests;

pub use errors::FormatError;
pub use model::{ArticleFormattingResult, ContentAnalysisSummary, FormattingMetadata, RelatedArticle};
pub use registry::{DisclaimerTemplate, get_template};
pub use settings::{AdvancedArticleSettings, DisclaimerType, validate_settings};

use chrono::Utc;
use tracing::{debug, warn};

use crate::formatter::registry::{AUTHOR_TOKEN, DEFAULT_EXCERPT, DEFAULT_RELATED_ARTICLES};

/// Inputs larger than this are almost certainly not a single article body
/// and are refused (soft failure, original content returned).
const MAX_CONTENT_BYTES: usize = 1_048_576;

/// Substituted for the author token when no author name was configured.
const FALLBACK_AUTHOR: &str = "the sponsor";

/// Run the deterministic formatting pipeline over an HTML article body.
///
/// Best-effort contract: this never fails. Internal errors surface as
/// `metadata.error` with `formatted_content` falling back to the original,
/// unmodified input, so formatting can never block publishing.
pub fn format_article(
    content: &str,
    settings: &AdvancedArticleSettings,
    analysis: Option<&ContentAnalysisSummary>,
) -> ArticleFormattingResult {
    for warning in validate_settings(settings) {
        warn!(%warning, "article settings warning");
    }

    match run_passes(content, settings, analysis) {
        Ok(outcome) => ArticleFormattingResult {
            formatted_content: outcome.html,
            applied_settings: settings.clone(),
            metadata: FormattingMetadata {
                has_header_disclaimer: outcome.header_applied,
                has_footer_disclaimer: outcome.footer_applied,
                author_name: settings.author_name.clone(),
                applied_rules: outcome.rules,
                processed_at: Utc::now(),
                error: None,
            },
        },
        Err(err) => {
            warn!(error = %err, "formatting failed, returning original content");
            ArticleFormattingResult {
                formatted_content: content.to_string(),
                applied_settings: settings.clone(),
                metadata: FormattingMetadata {
                    has_header_disclaimer: false,
                    has_footer_disclaimer: false,
                    author_name: settings.author_name.clone(),
                    applied_rules: vec![format!(
                        "formatting skipped, original content returned: {err}"
                    )],
                    processed_at: Utc::now(),
                    error: Some(err.to_string()),
                },
            }
        }
    }
}

struct PassOutcome {
    html: String,
    rules: Vec<String>,
    header_applied: bool,
    footer_applied: bool,
}

fn run_passes(
    content: &str,
    settings: &AdvancedArticleSettings,
    analysis: Option<&ContentAnalysisSummary>,
) -> Result<PassOutcome, FormatError> {
    if content.trim().is_empty() {
        return Err(FormatError::EmptyContent);
    }
    if content.len() > MAX_CONTENT_BYTES {
        return Err(FormatError::ContentTooLarge {
            size: content.len(),
            limit: MAX_CONTENT_BYTES,
        });
    }

    let header_template = registry::get_template(&settings.header_disclaimer);
    let footer_template = registry::get_template(&settings.footer_disclaimer);

    let mut html = content.to_string();
    let mut rules = Vec::new();
    let mut header_applied = false;
    let mut footer_applied = false;

    // 1. Heading renormalization.
    if let Some(next) = passes::demote_headings(&html) {
        html = next;
        rules.push("demoted heading levels by one (h2-h4)".to_string());
    }

    // 2. Intro-quote block.
    let excerpt = analysis
        .and_then(|a| a.excerpt.as_deref())
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(DEFAULT_EXCERPT);
    html = passes::prepend_intro_quote(&html, excerpt, header_template);
    rules.push("inserted intro quote block".to_string());

    // 3. Header disclaimer, anchored right after the intro quote.
    if !settings.header_disclaimer.is_none()
        && let Some(fragment_template) = header_template.header_html
    {
        let author = settings
            .author_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(FALLBACK_AUTHOR);
        let fragment = fragment_template.replace(AUTHOR_TOKEN, author);
        html = passes::insert_header_disclaimer(&html, &fragment);
        header_applied = true;
        rules.push(format!(
            "inserted header disclaimer ({})",
            settings.header_disclaimer.label()
        ));
    }

    // 4. Dropcap on the first body paragraph.
    if let Some(next) = passes::apply_dropcap(&html, header_template) {
        html = next;
        rules.push("applied dropcap to first body paragraph".to_string());
    } else {
        debug!("no qualifying paragraph for dropcap");
    }

    // 5. Footer disclaimer.
    if !settings.footer_disclaimer.is_none()
        && let Some(fragment) = footer_template.footer_html
    {
        html = passes::append_footer_disclaimer(&html, fragment);
        footer_applied = true;
        rules.push(format!(
            "appended footer disclaimer ({})",
            settings.footer_disclaimer.label()
        ));
    }

    // 6. Banner and related articles.
    let related = analysis
        .map(|a| a.related_articles.as_slice())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_RELATED_ARTICLES.as_slice());
    html = passes::append_banner_and_related(&html, related, header_template);
    rules.push("appended banner and related articles".to_string());

    Ok(PassOutcome {
        html,
        rules,
        header_applied,
        footer_applied,
    })
}
