mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, bail};

/// Fetches a URL and returns the response body as text.
///
/// Non-success HTTP statuses are errors; callers decide whether that is
/// fatal (results page) or defaulted (a single detail page).
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        bail!("GET {url} returned status {status}");
    }
    Ok(resp.text().await?)
}
