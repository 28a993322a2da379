use thiserror::Error;

/// Internal formatting failures. These never cross the public boundary:
/// `format_article` downgrades them to `metadata.error` and returns the
/// original content unchanged.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("content is empty")]
    EmptyContent,

    #[error("content too large ({size} bytes, limit {limit})")]
    ContentTooLarge { size: usize, limit: usize },
}
