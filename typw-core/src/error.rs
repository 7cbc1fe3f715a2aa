//! Error types for typw-core (made by FontLab https://www.fontlab.com/)

use thiserror::Error;

/// Failures surfaced by the resolution and fetch pipeline.
///
/// Transport problems and resolution misses are distinct variants so callers
/// can tell an unreachable endpoint from a query that matched nothing.
/// Parse-level gaps inside a stylesheet are never errors; malformed blocks
/// are skipped during extraction.
#[derive(Debug, Error)]
pub enum FontError {
    /// The metadata or stylesheet endpoint could not be reached, or answered
    /// with a non-success status. Not retried.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The metadata payload was not the JSON shape we expect.
    #[error("malformed family metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// No catalog entry matched the query, exactly or by substring.
    #[error("no font family matches {query:?}")]
    NotFound { query: String },

    /// The HTTP client could not be constructed.
    #[error("http client setup failed: {0}")]
    ClientSetup(String),
}

impl FontError {
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn not_found(query: impl Into<String>) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_display_names_the_url() {
        let err = FontError::transport("https://example.test/css", "connection refused");
        let rendered = format!("{err}");
        assert!(rendered.contains("https://example.test/css"), "{rendered}");
        assert!(rendered.contains("connection refused"), "{rendered}");
    }

    #[test]
    fn not_found_quotes_the_query() {
        let err = FontError::not_found("Robotto");
        assert_eq!(format!("{err}"), "no font family matches \"Robotto\"");
    }
}
