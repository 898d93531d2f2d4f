//! Source-page scraping.
//!
//! Contract: `scrape(url)` yields whitespace-collapsed visible text, or an
//! empty string on any failure. Ingestion treats an empty result as "no
//! content" and skips the URL without aborting the run.

use crate::types::{AppError, Result};
use async_trait::async_trait;
use scraper::{Html, Selector};

#[async_trait]
pub trait Scraper: Send + Sync {
    async fn scrape(&self, url: &str) -> String;
}

pub struct HttpScraper {
    client: reqwest::Client,
}

impl HttpScraper {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<String> {
        self.client
            .get(url)
            .header(reqwest::header::USER_AGENT, "pitchside-ingest/0.1")
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::Scrape(format!("Failed to fetch {}: {}", url, e)))?
            .text()
            .await
            .map_err(|e| AppError::Scrape(format!("Failed to read body of {}: {}", url, e)))
    }
}

impl Default for HttpScraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the document body's text and collapse runs of whitespace into
/// single spaces. Kept synchronous: `Html` is not `Send` and must not live
/// across an await point.
fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(body) = Selector::parse("body") else {
        return String::new();
    };

    let text = match document.select(&body).next() {
        Some(element) => element.text().collect::<Vec<_>>().join(" "),
        None => return String::new(),
    };

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn scrape(&self, url: &str) -> String {
        let html = match self.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url, "failed to scrape page: {}", e);
                return String::new();
            }
        };

        extract_text(&html)
    }
}
