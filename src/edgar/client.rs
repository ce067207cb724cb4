use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::edgar::rate_limiter::RateLimiter;
use crate::error::{FilinglensError, Result};
use crate::narrative::DocumentFetcher;

pub const EDGAR_DATA_URL: &str = "https://data.sec.gov";
pub const EDGAR_ARCHIVES_URL: &str = "https://www.sec.gov/Archives/edgar/data";

/// HTTP client for the SEC EDGAR endpoints.
///
/// Holds the identifying user agent SEC requires and a semaphore bounding
/// concurrent requests. Responses are returned in full; there is no retry
/// loop, a failed fetch surfaces as a transport error.
pub struct EdgarClient {
    client: Client,
    user_agent: String,
    rate_limiter: RateLimiter,
}

impl EdgarClient {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(EdgarClient {
            client,
            user_agent: user_agent.to_string(),
            rate_limiter: RateLimiter::default(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let _permit = self.rate_limiter.acquire().await;
        log::debug!("Fetching URL: {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .header(reqwest::header::ACCEPT_ENCODING, "gzip, deflate")
            .send()
            .await?;

        log::debug!("Response status: {}", response.status());
        if !response.status().is_success() {
            return Err(FilinglensError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        Ok(self.get(url).await?.json().await?)
    }

    pub async fn get_text(&self, url: &str) -> Result<String> {
        Ok(self.get(url).await?.text().await?)
    }

    /// Submissions feed for a 10-digit zero-padded CIK.
    pub async fn submissions(&self, cik: &str) -> Result<super::Submissions> {
        let url = format!("{}/submissions/CIK{}.json", EDGAR_DATA_URL, cik);
        self.get_json(&url).await
    }

    /// XBRL companyfacts for a company, kept as an opaque JSON document.
    /// Concept coverage varies company-to-company, so the structure is
    /// projected lazily by the facts module instead of deserialized whole.
    pub async fn company_facts(&self, cik: &str) -> Result<Value> {
        let url = format!(
            "{}/api/xbrl/companyfacts/CIK{}.json",
            EDGAR_DATA_URL, cik
        );
        self.get_json(&url).await
    }

    /// Raw text of a filing document in the EDGAR archives.
    pub async fn filing_document(&self, url: &Url) -> Result<String> {
        self.get_text(url.as_str()).await
    }
}

#[async_trait]
impl DocumentFetcher for EdgarClient {
    async fn fetch_document(&self, url: &Url) -> Result<String> {
        self.filing_document(url).await
    }
}
