//! The individual text-rewrite passes behind `format_article`.
//!
//! Each pass operates on the running HTML string with bounded pattern
//! matching, not a parsed DOM tree. A pass returns `Some(new_html)` when it
//! changed something and `None` when it did not apply, so the driver can
//! record an audit-trail entry per applied transformation.

use regex::Regex;
use std::sync::LazyLock;

use crate::formatter::model::RelatedArticle;
use crate::formatter::registry::{DisclaimerTemplate, EXCERPT_TOKEN, LETTER_TOKEN};

static H4_OPEN_OR_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)h4([\s>])").unwrap());
static H3_OPEN_OR_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)h3([\s>])").unwrap());
static H2_OPEN_OR_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<(/?)h2([\s>])").unwrap());

static INTRO_QUOTE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<p[^>]*class="[^"]*intro_quote[^"]*"[^>]*>"#).unwrap());

static PARAGRAPH_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p(\s[^>]*)?>").unwrap());

static PARAGRAPH_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</p>").unwrap());

/// Demote every heading by one level, h1 excluded. Deepest level first:
/// running the h2 rule last means a freshly demoted h3 can never be caught
/// again by a later substitution.
pub(crate) fn demote_headings(html: &str) -> Option<String> {
    let rules: [(&Regex, &str); 3] = [
        (&H4_OPEN_OR_CLOSE, "h5"),
        (&H3_OPEN_OR_CLOSE, "h4"),
        (&H2_OPEN_OR_CLOSE, "h3"),
    ];

    let mut out = html.to_string();
    let mut changed = false;
    for (re, target) in rules {
        if re.is_match(&out) {
            changed = true;
            out = re
                .replace_all(&out, |caps: &regex::Captures| {
                    format!("<{}{}{}", &caps[1], target, &caps[2])
                })
                .into_owned();
        }
    }
    changed.then_some(out)
}

/// Render the intro-quote block from the registry template and prepend it.
pub(crate) fn prepend_intro_quote(
    html: &str,
    excerpt: &str,
    template: &DisclaimerTemplate,
) -> String {
    let block = template.intro_quote_template.replace(EXCERPT_TOKEN, excerpt);
    format!("{block}\n{html}")
}

/// Insert a header disclaimer fragment immediately after the intro-quote
/// block when one exists, otherwise at the very start of the content.
pub(crate) fn insert_header_disclaimer(html: &str, fragment: &str) -> String {
    if let Some(open) = INTRO_QUOTE_OPEN.find(html)
        && let Some(close) = PARAGRAPH_CLOSE.find_at(html, open.end())
    {
        let at = close.end();
        return format!("{}\n{}{}", &html[..at], fragment, &html[at..]);
    }
    format!("{fragment}\n{html}")
}

/// Wrap the first letter of the first body paragraph in the dropcap span.
///
/// Paragraphs tagged as the intro quote or as disclaimers are not content
/// and are skipped. Applies only when the chosen paragraph starts with an
/// alphabetic character (covers CJK); otherwise the pass is a no-op.
pub(crate) fn apply_dropcap(html: &str, template: &DisclaimerTemplate) -> Option<String> {
    for caps in PARAGRAPH_OPEN.captures_iter(html) {
        let attrs = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        if attrs.contains("intro_quote") || attrs.contains("disclaimer") {
            continue;
        }

        let content_start = caps.get(0).unwrap().end();
        let rest = &html[content_start..];
        let leading_ws = rest.len() - rest.trim_start().len();
        let Some(first) = rest.trim_start().chars().next() else {
            return None;
        };
        if !first.is_alphabetic() {
            return None;
        }

        let span = template
            .dropcap_style_html
            .replace(LETTER_TOKEN, &first.to_string());
        let at = content_start + leading_ws;
        let mut out = String::with_capacity(html.len() + span.len());
        out.push_str(&html[..at]);
        out.push_str(&span);
        out.push_str(&html[at + first.len_utf8()..]);
        return Some(out);
    }
    None
}

/// Append a horizontal-rule separator and the footer disclaimer fragment.
pub(crate) fn append_footer_disclaimer(html: &str, fragment: &str) -> String {
    format!("{}\n<hr />\n{}", html.trim_end(), fragment)
}

/// Append the promotional banner and the rendered related-articles section.
pub(crate) fn append_banner_and_related(
    html: &str,
    related: &[RelatedArticle],
    template: &DisclaimerTemplate,
) -> String {
    let links = related
        .iter()
        .map(|article| {
            template
                .related_article_link_template
                .replace("{url}", &article.url)
                .replace("{title}", &article.title)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n{}\n{}\n{}",
        html.trim_end(),
        template.tg_banner_html,
        template.related_articles_header_html,
        links
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::registry;
    use crate::formatter::settings::DisclaimerType;

    fn neutral() -> &'static DisclaimerTemplate {
        registry::get_template(&DisclaimerType::None)
    }

    #[test]
    fn test_demote_headings_no_chained_substitution() {
        let html = "<h2>A</h2><h3>B</h3><h4>C</h4>";
        let out = demote_headings(html).unwrap();
        assert_eq!(out, "<h3>A</h3><h4>B</h4><h5>C</h5>");
    }

    #[test]
    fn test_demote_headings_preserves_attributes_and_h1() {
        let html = r#"<h1>Title</h1><h2 class="sub">Sub</h2>"#;
        let out = demote_headings(html).unwrap();
        assert_eq!(out, r#"<h1>Title</h1><h3 class="sub">Sub</h3>"#);
    }

    #[test]
    fn test_demote_headings_noop_without_headings() {
        assert!(demote_headings("<p>no headings here</p>").is_none());
    }

    #[test]
    fn test_prepend_intro_quote_substitutes_excerpt() {
        let out = prepend_intro_quote("<p>Body</p>", "A short summary.", neutral());
        assert!(out.starts_with("<p class=\"intro_quote\">"));
        assert!(out.contains("A short summary."));
        assert!(out.ends_with("<p>Body</p>"));
    }

    #[test]
    fn test_header_disclaimer_lands_after_intro_quote() {
        let html = "<p class=\"intro_quote\">Quote</p>\n<p>Body</p>";
        let out = insert_header_disclaimer(html, "<p class=\"disclaimer\">D</p>");

        let quote = out.find("intro_quote").unwrap();
        let disclaimer = out.find("disclaimer").unwrap();
        let body = out.find("<p>Body</p>").unwrap();
        assert!(quote < disclaimer);
        assert!(disclaimer < body);
    }

    #[test]
    fn test_header_disclaimer_prepends_without_intro_quote() {
        let out = insert_header_disclaimer("<p>Body</p>", "<p class=\"disclaimer\">D</p>");
        assert!(out.starts_with("<p class=\"disclaimer\">D</p>"));
    }

    #[test]
    fn test_dropcap_skips_intro_quote() {
        let html = "<p class=\"intro_quote\">X</p><p>Real text</p>";
        let out = apply_dropcap(html, neutral()).unwrap();
        assert!(out.contains("<p class=\"intro_quote\">X</p>"));
        assert!(out.contains(">R</span>eal text"));
    }

    #[test]
    fn test_dropcap_skips_disclaimer_paragraphs() {
        let html = "<p class=\"disclaimer\">Note</p><p>Story begins</p>";
        let out = apply_dropcap(html, neutral()).unwrap();
        assert!(out.contains("<p class=\"disclaimer\">Note</p>"));
        assert!(out.contains(">S</span>tory begins"));
    }

    #[test]
    fn test_dropcap_handles_cjk() {
        let html = "<p>世界の最新ニュース</p>";
        let out = apply_dropcap(html, neutral()).unwrap();
        assert!(out.contains(">世</span>界の最新ニュース"));
    }

    #[test]
    fn test_dropcap_noop_on_non_alphabetic_lead() {
        assert!(apply_dropcap("<p>42 things happened</p>", neutral()).is_none());
        assert!(apply_dropcap("<div>no paragraphs</div>", neutral()).is_none());
    }

    #[test]
    fn test_footer_appended_behind_rule() {
        let out = append_footer_disclaimer("<p>Body</p>\n", "<p class=\"disclaimer\">F</p>");
        assert_eq!(out, "<p>Body</p>\n<hr />\n<p class=\"disclaimer\">F</p>");
    }

    #[test]
    fn test_banner_and_related_rendering() {
        let related = vec![RelatedArticle {
            url: "https://news.example.com/a".to_string(),
            title: "Article A".to_string(),
        }];
        let out = append_banner_and_related("<p>Body</p>", &related, neutral());
        assert!(out.contains("tg-banner"));
        assert!(out.contains("Related articles"));
        assert!(out.contains("<a href=\"https://news.example.com/a\">Article A</a>"));
    }
}
