pub mod client;
pub mod rate_limiter;
pub mod report;
pub mod submissions;
pub mod tickers;

pub use client::EdgarClient;
pub use report::ReportType;
pub use submissions::{build_filing_url, latest_report, list_reports, ReportSummary, Submissions};
pub use tickers::{Ticker, TickerMap};
