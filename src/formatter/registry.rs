//! Static template registry backing the formatting passes.
//!
//! One entry per disclaimer type. Entries are read-only and loaded at
//! startup; unknown disclaimer types resolve to the neutral entry so that
//! formatting stays best-effort instead of failing on a bad key.

use std::sync::LazyLock;

use crate::formatter::model::RelatedArticle;
use crate::formatter::settings::DisclaimerType;

/// Token in header fragments replaced with the configured author name.
pub const AUTHOR_TOKEN: &str = "{author}";

/// Token in the intro-quote template replaced with the article excerpt.
pub const EXCERPT_TOKEN: &str = "{excerpt}";

/// Token in the dropcap style replaced with the first letter.
pub const LETTER_TOKEN: &str = "{letter}";

/// Excerpt used when the AI analysis did not supply one.
pub const DEFAULT_EXCERPT: &str =
    "Key developments at a glance, with background and context linked below.";

const DROPCAP_STYLE_HTML: &str = "<span class=\"dropcap\" style=\"float:left;font-size:3.1em;line-height:0.85;padding-right:0.08em;font-weight:700;\">{letter}</span>";

const INTRO_QUOTE_TEMPLATE: &str = "<p class=\"intro_quote\"><em>{excerpt}</em><br /><a href=\"https://news.example.com/tag/background\">Background</a> &middot; <a href=\"https://news.example.com/tag/context\">Context</a></p>";

const TG_BANNER_HTML: &str = "<p class=\"tg-banner\"><a href=\"https://t.me/newsroom_example\">Follow our Telegram channel for breaking updates</a></p>";

const RELATED_ARTICLES_HEADER_HTML: &str = "<h4 class=\"related-articles\">Related articles</h4>";

const RELATED_ARTICLE_LINK_TEMPLATE: &str =
    "<p class=\"related-article\"><a href=\"{url}\">{title}</a></p>";

const SPONSORED_HEADER_HTML: &str = "<p class=\"disclaimer disclaimer-sponsored\"><em>Sponsored content. This article was prepared and paid for by {author} and does not reflect the views of the editorial team.</em></p>";

const SPONSORED_FOOTER_HTML: &str = "<p class=\"disclaimer disclaimer-sponsored\"><em>This publication is sponsored material. Readers should do their own research before acting on any information it contains.</em></p>";

const PRESS_RELEASE_HEADER_HTML: &str = "<p class=\"disclaimer disclaimer-press-release\"><em>This article is based on a press release distributed by the issuing organization. The newsroom has not independently verified its claims.</em></p>";

const PRESS_RELEASE_FOOTER_HTML: &str = "<p class=\"disclaimer disclaimer-press-release\"><em>Press-release material. Statements and figures are attributable to the issuer.</em></p>";

/// Per-disclaimer bundle of HTML fragments consumed by the formatting passes.
#[derive(Debug, Clone, Copy)]
pub struct DisclaimerTemplate {
    pub header_html: Option<&'static str>,
    pub footer_html: Option<&'static str>,
    pub dropcap_style_html: &'static str,
    pub intro_quote_template: &'static str,
    pub tg_banner_html: &'static str,
    pub related_articles_header_html: &'static str,
    pub related_article_link_template: &'static str,
}

const NEUTRAL_TEMPLATE: DisclaimerTemplate = DisclaimerTemplate {
    header_html: None,
    footer_html: None,
    dropcap_style_html: DROPCAP_STYLE_HTML,
    intro_quote_template: INTRO_QUOTE_TEMPLATE,
    tg_banner_html: TG_BANNER_HTML,
    related_articles_header_html: RELATED_ARTICLES_HEADER_HTML,
    related_article_link_template: RELATED_ARTICLE_LINK_TEMPLATE,
};

const SPONSORED_TEMPLATE: DisclaimerTemplate = DisclaimerTemplate {
    header_html: Some(SPONSORED_HEADER_HTML),
    footer_html: Some(SPONSORED_FOOTER_HTML),
    ..NEUTRAL_TEMPLATE
};

const PRESS_RELEASE_TEMPLATE: DisclaimerTemplate = DisclaimerTemplate {
    header_html: Some(PRESS_RELEASE_HEADER_HTML),
    footer_html: Some(PRESS_RELEASE_FOOTER_HTML),
    ..NEUTRAL_TEMPLATE
};

/// Placeholder related-article links used when the analysis provides none.
pub static DEFAULT_RELATED_ARTICLES: LazyLock<Vec<RelatedArticle>> = LazyLock::new(|| {
    vec![
        RelatedArticle {
            url: "https://news.example.com/editors-picks".to_string(),
            title: "Editor's picks: this week's most-read stories".to_string(),
        },
        RelatedArticle {
            url: "https://news.example.com/explainers".to_string(),
            title: "Explainers: the background behind the headlines".to_string(),
        },
    ]
});

/// Look up the template bundle for a disclaimer type. Unknown types behave
/// exactly like `None`.
pub fn get_template(kind: &DisclaimerType) -> &'static DisclaimerTemplate {
    match kind {
        DisclaimerType::Sponsored => &SPONSORED_TEMPLATE,
        DisclaimerType::PressRelease => &PRESS_RELEASE_TEMPLATE,
        DisclaimerType::None | DisclaimerType::Unknown(_) => &NEUTRAL_TEMPLATE,
    }
}
