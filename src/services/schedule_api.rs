//! Trait and types for interacting with a class-schedule provider.

use anyhow::Result;

/// One schedule search: which term, subject, and class category to pull.
///
/// Values are validated at the CLI boundary (4-digit term, 2-5 letter
/// subject and category codes) before they reach a provider.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// 4-digit term code, e.g. "2253" for Spring 2025.
    pub term: String,
    /// Department code, upcased, e.g. "FIN".
    pub subject: String,
    /// Class category code, e.g. "REG" (regular session) or "EXT".
    pub class_category: String,
}

/// Abstraction over the schedule web application.
///
/// Implementations return raw page HTML; all structure extraction lives in
/// [`crate::parser`]. One provider session is acquired per run and driven
/// sequentially, never concurrently.
#[async_trait::async_trait]
pub trait ScheduleSource {
    /// Fetches the search-results page for a query.
    async fn search_results(&self, query: &SearchQuery) -> Result<String>;

    /// Fetches one section's detail page by its (already absolute) link.
    async fn detail_page(&self, link: &str) -> Result<String>;
}
