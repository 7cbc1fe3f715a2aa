//! Remote endpoints for family metadata and stylesheets (made by FontLab https://www.fontlab.com/)

use std::time::Duration;

use tracing::debug;

use crate::error::{FontError, Result};
use crate::stylesheet::css_request_url;

pub const DEFAULT_METADATA_ENDPOINT: &str = "https://fonts.google.com/metadata/fonts";
pub const DEFAULT_CSS_ENDPOINT: &str = "https://fonts.googleapis.com/css2";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Transport seam for the resolution pipeline: HTTP in production, canned
/// bodies in tests. Implementations must be shareable across the background
/// preview tasks.
pub trait RemoteSource: Send + Sync {
    /// Fetch the raw family-metadata payload.
    fn catalog_json(&self) -> Result<String>;

    /// Fetch the stylesheet for a canonical family name.
    fn stylesheet(&self, family: &str) -> Result<String>;
}

/// Live HTTP implementation over the public web font endpoints.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::blocking::Client,
    metadata_url: String,
    css_base: String,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        Self::with_endpoints(DEFAULT_METADATA_ENDPOINT, DEFAULT_CSS_ENDPOINT)
    }

    /// Point the client at alternate endpoints (mirrors, local fixtures).
    pub fn with_endpoints(
        metadata_url: impl Into<String>,
        css_base: impl Into<String>,
    ) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| FontError::ClientSetup(err.to_string()))?;

        Ok(Self {
            client,
            metadata_url: metadata_url.into(),
            css_base: css_base.into(),
        })
    }

    fn get_text(&self, url: &str) -> Result<String> {
        debug!(url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| FontError::transport(url, err.to_string()))?
            .error_for_status()
            .map_err(|err| FontError::transport(url, err.to_string()))?;

        response
            .text()
            .map_err(|err| FontError::transport(url, err.to_string()))
    }
}

impl RemoteSource for HttpSource {
    fn catalog_json(&self) -> Result<String> {
        self.get_text(&self.metadata_url)
    }

    fn stylesheet(&self, family: &str) -> Result<String> {
        self.get_text(&css_request_url(&self.css_base, family))
    }
}
