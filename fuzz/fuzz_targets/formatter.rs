#![no_main]

use libfuzzer_sys::fuzz_target;

use pressroom::formatter::{AdvancedArticleSettings, DisclaimerType, format_article};

fuzz_target!(|data: &[u8]| {
    // Convert raw bytes to string, handling invalid UTF-8 gracefully
    let content = String::from_utf8_lossy(data).to_string();

    let settings = AdvancedArticleSettings {
        header_disclaimer: DisclaimerType::Sponsored,
        footer_disclaimer: DisclaimerType::Sponsored,
        author_name: Some("Fuzz Author".to_string()),
    };

    // The formatter should never panic regardless of input
    let result = format_article(&content, &settings, None);

    // And the soft-failure contract must hold: on error the original
    // content comes back unchanged.
    if result.metadata.error.is_some() {
        assert_eq!(result.formatted_content, content);
    }
});
