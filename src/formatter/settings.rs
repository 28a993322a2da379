use serde::{Deserialize, Serialize};

use crate::formatter::registry;

/// Editorial disclaimer variant selected by the user. Labels arriving from
/// the UI are matched case-insensitively; anything unrecognized is kept as
/// `Unknown` and behaves like `None` during formatting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DisclaimerType {
    #[default]
    None,
    Sponsored,
    PressRelease,
    Unknown(String),
}

impl DisclaimerType {
    pub fn label(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Sponsored => "sponsored",
            Self::PressRelease => "press-release",
            Self::Unknown(label) => label,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None | Self::Unknown(_))
    }
}

impl From<String> for DisclaimerType {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "" | "none" => Self::None,
            "sponsored" => Self::Sponsored,
            "press-release" | "press_release" => Self::PressRelease,
            _ => Self::Unknown(label),
        }
    }
}

impl From<DisclaimerType> for String {
    fn from(kind: DisclaimerType) -> Self {
        kind.label().to_string()
    }
}

/// User-chosen options for one formatting call. Immutable input; echoed back
/// in the result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdvancedArticleSettings {
    pub header_disclaimer: DisclaimerType,
    pub footer_disclaimer: DisclaimerType,
    pub author_name: Option<String>,
}

/// Sanity-check settings before formatting. Warnings are advisory and never
/// block `format_article`.
pub fn validate_settings(settings: &AdvancedArticleSettings) -> Vec<String> {
    let mut warnings = Vec::new();

    if let DisclaimerType::Unknown(label) = &settings.header_disclaimer {
        warnings.push(format!(
            "unrecognized header disclaimer type '{label}', treated as none"
        ));
    }
    if let DisclaimerType::Unknown(label) = &settings.footer_disclaimer {
        warnings.push(format!(
            "unrecognized footer disclaimer type '{label}', treated as none"
        ));
    }

    let header_template = registry::get_template(&settings.header_disclaimer);
    let header_needs_author = header_template
        .header_html
        .map(|html| html.contains(registry::AUTHOR_TOKEN))
        .unwrap_or(false);
    if header_needs_author && settings.author_name.as_deref().map_or(true, str::is_empty) {
        warnings.push(format!(
            "header disclaimer '{}' expects an author name but none was provided",
            settings.header_disclaimer.label()
        ));
    }

    if settings.header_disclaimer == DisclaimerType::Sponsored
        && settings.footer_disclaimer != DisclaimerType::Sponsored
    {
        warnings.push(
            "sponsored header disclaimer without a matching sponsored footer".to_string(),
        );
    }

    warnings
}
