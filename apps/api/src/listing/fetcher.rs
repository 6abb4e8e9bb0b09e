use std::time::Duration;

use reqwest::{header, Client, Url};
use tracing::{debug, info};

use crate::listing::{extract_listing, ExtractedProjectData, FetchError};

/// Downloads listing pages from a single freelance site.
#[derive(Clone)]
pub struct ListingFetcher {
    http: Client,
    site_domain: String,
}

impl ListingFetcher {
    pub fn new(
        site_domain: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            site_domain: site_domain.into().to_ascii_lowercase(),
        })
    }

    pub fn site_domain(&self) -> &str {
        &self.site_domain
    }

    /// Rejects anything that is not an http(s) URL on the configured site.
    /// Runs before any network traffic.
    pub fn check_url(&self, raw: &str) -> Result<Url, FetchError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FetchError::InvalidUrl("URL não fornecida".to_string()));
        }

        let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(raw.to_string()));
        }

        let host = url
            .host_str()
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| FetchError::InvalidUrl(raw.to_string()))?;

        let on_site =
            host == self.site_domain || host.ends_with(&format!(".{}", self.site_domain));
        if !on_site {
            return Err(FetchError::ForeignSite {
                host,
                expected: self.site_domain.clone(),
            });
        }

        Ok(url)
    }

    /// GETs the page body. Any non-2xx status is an error.
    pub async fn fetch_page(&self, raw_url: &str) -> Result<String, FetchError> {
        let url = self.check_url(raw_url)?;
        debug!("Fetching listing page {url}");

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Fetches the listing and runs the field extractors over it.
    pub async fn extract(&self, raw_url: &str) -> Result<ExtractedProjectData, FetchError> {
        let html = self.fetch_page(raw_url).await?;
        let data = extract_listing(&html);
        info!(
            "Extracted listing data (client: {}, value: {})",
            data.client_name, data.value
        );
        Ok(data)
    }
}
