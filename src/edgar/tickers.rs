use anyhow::anyhow;
use serde::Deserialize;
use std::collections::HashMap;

use crate::edgar::client::EdgarClient;
use crate::error::Result;

pub const TICKER_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// An exchange ticker symbol, validated and upper-cased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(ticker: &str) -> anyhow::Result<Self> {
        let uppercase_ticker = ticker.trim().to_uppercase();
        if uppercase_ticker.is_empty() {
            return Err(anyhow!("Ticker cannot be empty"));
        }
        if !uppercase_ticker
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        {
            return Err(anyhow!(
                "Ticker must contain only alphanumeric characters, hyphens or dots: {}",
                ticker
            ));
        }
        Ok(Ticker(uppercase_ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Deserialize)]
struct TickerEntry {
    cik_str: u64,
    ticker: String,
    title: String,
}

/// Ticker -> (10-digit zero-padded CIK, company name), loaded once at
/// startup and read-only afterwards. Injected into the request layer rather
/// than held as a process global so the rest of the code stays testable
/// without network access.
#[derive(Debug, Clone)]
pub struct TickerMap {
    ticker_to_cik: HashMap<String, (String, String)>,
}

impl TickerMap {
    /// Download the SEC company_tickers.json mapping.
    pub async fn fetch(edgar: &EdgarClient) -> Result<Self> {
        log::debug!("Fetching tickers from {}", TICKER_URL);
        let raw: HashMap<String, TickerEntry> = edgar.get_json(TICKER_URL).await?;
        log::debug!("Found {} ticker entries", raw.len());
        Ok(Self::from_entries(raw.into_values()))
    }

    fn from_entries(entries: impl IntoIterator<Item = TickerEntry>) -> Self {
        let mut ticker_to_cik = HashMap::new();
        for entry in entries {
            let Ok(ticker) = Ticker::new(&entry.ticker) else {
                log::debug!("Skipping malformed ticker entry: {:?}", entry.ticker);
                continue;
            };
            let cik = format!("{:010}", entry.cik_str);
            ticker_to_cik.insert(ticker.as_str().to_string(), (cik, entry.title));
        }
        TickerMap { ticker_to_cik }
    }

    /// 10-digit zero-padded CIK for a ticker, if known.
    pub fn cik_for(&self, ticker: &Ticker) -> Option<&str> {
        self.ticker_to_cik
            .get(ticker.as_str())
            .map(|(cik, _)| cik.as_str())
    }

    pub fn company_name(&self, ticker: &Ticker) -> Option<&str> {
        self.ticker_to_cik
            .get(ticker.as_str())
            .map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.ticker_to_cik.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticker_to_cik.is_empty()
    }
}
