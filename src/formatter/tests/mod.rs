use crate::formatter::{
    AdvancedArticleSettings, ContentAnalysisSummary, DisclaimerType, RelatedArticle,
    format_article,
};

fn sponsored_settings() -> AdvancedArticleSettings {
    AdvancedArticleSettings {
        header_disclaimer: DisclaimerType::Sponsored,
        footer_disclaimer: DisclaimerType::Sponsored,
        author_name: Some("Acme Co".to_string()),
    }
}

#[test]
fn test_full_sponsored_scenario() {
    let content = "<p>First paragraph of the story.</p>\n<p>Second paragraph.</p>";
    let result = format_article(content, &sponsored_settings(), None);

    assert!(result.metadata.error.is_none());
    assert!(result.metadata.has_header_disclaimer);
    assert!(result.metadata.has_footer_disclaimer);
    assert!(result.metadata.applied_rules.len() >= 5);

    // Author substituted into the header fragment.
    assert!(result.formatted_content.contains("Acme Co"));

    // Exactly one hr-separated footer block, at the end of the body.
    assert_eq!(result.formatted_content.matches("<hr />").count(), 1);
    let hr = result.formatted_content.find("<hr />").unwrap();
    let footer = result
        .formatted_content
        .find("disclaimer-sponsored\"><em>This publication is sponsored")
        .unwrap();
    assert!(hr < footer);

    // Ordering: intro quote, then header disclaimer, then dropcapped body.
    let quote = result.formatted_content.find("intro_quote").unwrap();
    let header = result
        .formatted_content
        .find("Sponsored content")
        .unwrap();
    let dropcap = result.formatted_content.find("dropcap").unwrap();
    assert!(quote < header);
    assert!(header < dropcap);

    // Dropcap wraps the body text, never the intro quote.
    assert!(result.formatted_content.contains(">F</span>irst paragraph"));
}

#[test]
fn test_plain_settings_apply_only_content_passes() {
    let content = "<h2>Section</h2><p>Alpha beta.</p>";
    let result = format_article(content, &AdvancedArticleSettings::default(), None);

    assert!(result.metadata.error.is_none());
    assert!(!result.metadata.has_header_disclaimer);
    assert!(!result.metadata.has_footer_disclaimer);
    assert!(!result.formatted_content.contains("<hr />"));
    assert!(result.formatted_content.contains("<h3>Section</h3>"));
    assert!(result.formatted_content.contains("intro_quote"));
    assert!(result.formatted_content.contains("tg-banner"));

    let rules = &result.metadata.applied_rules;
    assert_eq!(rules.len(), 4);
    assert!(rules[0].contains("heading"));
    assert!(rules[1].contains("intro quote"));
    assert!(rules[2].contains("dropcap"));
    assert!(rules[3].contains("banner"));
}

#[test]
fn test_analysis_excerpt_and_related_links_used() {
    let analysis = ContentAnalysisSummary {
        excerpt: Some("Markets moved sharply overnight.".to_string()),
        related_articles: vec![RelatedArticle {
            url: "https://news.example.com/markets".to_string(),
            title: "Market wrap".to_string(),
        }],
    };
    let result = format_article(
        "<p>Body text.</p>",
        &AdvancedArticleSettings::default(),
        Some(&analysis),
    );

    assert!(
        result
            .formatted_content
            .contains("Markets moved sharply overnight.")
    );
    assert!(result.formatted_content.contains("Market wrap"));
    // Analysis-supplied links replace the placeholders entirely.
    assert!(!result.formatted_content.contains("editors-picks"));
}

#[test]
fn test_empty_content_falls_back() {
    let result = format_article("   ", &sponsored_settings(), None);

    assert_eq!(result.formatted_content, "   ");
    assert!(result.metadata.error.is_some());
    assert!(!result.metadata.has_header_disclaimer);
    assert_eq!(result.metadata.applied_rules.len(), 1);
    assert!(result.metadata.applied_rules[0].contains("formatting skipped"));
}

#[test]
fn test_oversized_content_falls_back() {
    let content = "<p>a</p>".repeat(200_000);
    let result = format_article(&content, &AdvancedArticleSettings::default(), None);

    assert_eq!(result.formatted_content, content);
    let error = result.metadata.error.unwrap();
    assert!(error.contains("too large"));
}

#[test]
fn test_unknown_disclaimer_behaves_like_none() {
    let settings = AdvancedArticleSettings {
        header_disclaimer: DisclaimerType::Unknown("advertorial".to_string()),
        footer_disclaimer: DisclaimerType::Unknown("advertorial".to_string()),
        author_name: None,
    };
    let result = format_article("<p>Body text.</p>", &settings, None);

    assert!(result.metadata.error.is_none());
    assert!(!result.metadata.has_header_disclaimer);
    assert!(!result.metadata.has_footer_disclaimer);
    assert!(!result.formatted_content.contains("disclaimer"));
}

#[test]
fn test_result_echoes_settings() {
    let settings = sponsored_settings();
    let result = format_article("<p>Body.</p>", &settings, None);
    assert_eq!(
        result.applied_settings.header_disclaimer,
        DisclaimerType::Sponsored
    );
    assert_eq!(result.metadata.author_name.as_deref(), Some("Acme Co"));
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_format_article_never_panics(
            content in ".*",
            author in proptest::option::of("[a-zA-Z ]{0,32}"),
        ) {
            let settings = AdvancedArticleSettings {
                header_disclaimer: DisclaimerType::Sponsored,
                footer_disclaimer: DisclaimerType::Sponsored,
                author_name: author,
            };
            let _ = format_article(&content, &settings, None);
        }

        #[test]
        fn test_fallback_preserves_original_on_error(content in "\\s*") {
            let result = format_article(&content, &AdvancedArticleSettings::default(), None);
            // Whitespace-only input always takes the fallback path.
            prop_assert_eq!(result.formatted_content, content);
            prop_assert!(result.metadata.error.is_some());
        }
    }
}
