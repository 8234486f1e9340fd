use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use instructor_load::fetch::{BasicClient, fetch_text};

use crate::services::schedule_api::{ScheduleSource, SearchQuery};

/// Default host of the public class-search application. Overridable through
/// the `SCHEDULE_BASE_URL` environment variable.
pub const DEFAULT_BASE_URL: &str = "https://webapps.sfsu.edu";

/// HTTP-backed [`ScheduleSource`] over the public class-search application.
///
/// Holds the one HTTP session for a run; constructing it is the run's
/// resource-acquisition step and failure here is fatal before any scraping.
pub struct ClassSearchClient {
    base_url: String,
    http: BasicClient,
}

impl ClassSearchClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: BasicClient::new()?,
        })
    }

    /// Reads the base URL from `SCHEDULE_BASE_URL`, falling back to
    /// [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("SCHEDULE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn results_url(&self, query: &SearchQuery) -> String {
        // Query values are pre-validated alphanumerics, no escaping needed.
        format!(
            "{}/public/classservices/classsearch/results?term={}&classCategory={}&subject={}",
            self.base_url, query.term, query.class_category, query.subject
        )
    }
}

#[async_trait]
impl ScheduleSource for ClassSearchClient {
    async fn search_results(&self, query: &SearchQuery) -> Result<String> {
        let url = self.results_url(query);
        debug!(url = %url, "Fetching search results page");
        fetch_text(&self.http, &url).await
    }

    async fn detail_page(&self, link: &str) -> Result<String> {
        debug!(url = %link, "Fetching section detail page");
        fetch_text(&self.http, link).await
    }
}
