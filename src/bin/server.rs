use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Json, Router,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use filinglens::core::FilinglensConfig;
use filinglens::edgar::{
    build_filing_url, latest_report, list_reports, EdgarClient, ReportSummary, Ticker, TickerMap,
};
use filinglens::facts::{build_metrics, build_statements};
use filinglens::narrative::extract_narrative;
use filinglens::ConceptDictionary;

const RECENT_REPORT_LIMIT: usize = 6;

struct AppState {
    edgar: EdgarClient,
    tickers: TickerMap,
    concepts: ConceptDictionary,
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (status, Json(json!({ "detail": detail.into() })))
}

fn upstream_error(e: filinglens::FilinglensError) -> ApiError {
    log::error!("Upstream failure: {}", e);
    match e {
        filinglens::FilinglensError::Configuration(msg) => {
            api_error(StatusCode::BAD_REQUEST, msg)
        }
        other => api_error(
            StatusCode::BAD_GATEWAY,
            format!("Error fetching SEC data: {}", other),
        ),
    }
}

#[derive(Debug, Deserialize)]
struct TickerQuery {
    ticker: String,
}

#[derive(Debug, Serialize)]
struct ReportsResponse {
    ticker: String,
    cik: String,
    reports: Vec<ReportSummary>,
}

#[derive(Debug, Serialize)]
struct LatestReportResponse {
    ticker: String,
    cik: String,
    #[serde(flatten)]
    report: ReportSummary,
}

fn resolve_ticker(state: &AppState, raw: &str) -> Result<(Ticker, String), ApiError> {
    let ticker = Ticker::new(raw)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;
    let cik = state
        .tickers
        .cik_for(&ticker)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Ticker not found"))?
        .to_string();
    Ok((ticker, cik))
}

async fn health() -> &'static str {
    "OK"
}

async fn get_latest_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TickerQuery>,
) -> Result<Json<LatestReportResponse>, ApiError> {
    let (ticker, cik) = resolve_ticker(&state, &query.ticker)?;

    let subs = state.edgar.submissions(&cik).await.map_err(upstream_error)?;
    let report = latest_report(&subs, &cik)
        .map_err(upstream_error)?
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No report found"))?;

    Ok(Json(LatestReportResponse {
        ticker: ticker.to_string(),
        cik,
        report,
    }))
}

async fn get_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TickerQuery>,
) -> Result<Json<ReportsResponse>, ApiError> {
    let (ticker, cik) = resolve_ticker(&state, &query.ticker)?;

    let subs = state.edgar.submissions(&cik).await.map_err(upstream_error)?;
    let reports = list_reports(&subs, &cik, RECENT_REPORT_LIMIT).map_err(upstream_error)?;
    if reports.is_empty() {
        return Err(api_error(StatusCode::NOT_FOUND, "No reports found"));
    }

    Ok(Json(ReportsResponse {
        ticker: ticker.to_string(),
        cik,
        reports,
    }))
}

#[derive(Debug, Deserialize)]
struct ReportDetailsQuery {
    cik: String,
    accession: String,
    primary_doc: String,
    filing_date: String,
    #[serde(default)]
    report_date: String,
}

async fn get_report_details(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportDetailsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let facts = state
        .edgar
        .company_facts(&query.cik)
        .await
        .map_err(upstream_error)?;

    // XBRL observations are keyed by period end, which the submissions feed
    // calls the report date; the filing date is a last-resort fallback.
    let end_date = if query.report_date.is_empty() {
        query.filing_date.as_str()
    } else {
        query.report_date.as_str()
    };

    let metrics = build_metrics(&state.concepts, &facts, &query.accession, end_date)
        .map_err(upstream_error)?;
    let statements = build_statements(&state.concepts, &facts, &query.accession, end_date)
        .map_err(upstream_error)?;

    let mda_html = match build_filing_url(&query.cik, &query.accession, &query.primary_doc) {
        Ok(url) => extract_narrative(&state.edgar, &url).await,
        Err(e) => {
            log::debug!("Skipping narrative, bad filing URL: {}", e);
            None
        }
    };

    Ok(Json(json!({
        "cik": query.cik,
        "accession": query.accession,
        "filing_date": query.filing_date,
        "report_date": query.report_date,
        "metrics": metrics,
        "mda_html": mda_html,
        "statements": statements,
    })))
}

#[derive(Debug, Deserialize)]
struct ProxyFilingQuery {
    cik: String,
    accession: String,
    primary_doc: String,
}

static HEAD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<head>").unwrap());

/// Proxy a filing so the frontend can embed it; SEC blocks direct iframes.
/// A `<base href>` keeps the filing's relative assets resolving against the
/// archive, and a minimal style override keeps it readable.
async fn proxy_filing(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProxyFilingQuery>,
) -> Result<Html<String>, ApiError> {
    let url = build_filing_url(&query.cik, &query.accession, &query.primary_doc)
        .map_err(upstream_error)?;

    let body = state
        .edgar
        .filing_document(&url)
        .await
        .map_err(upstream_error)?;

    let base_href = url
        .as_str()
        .rsplit_once('/')
        .map(|(dir, _)| format!("{}/", dir))
        .unwrap_or_else(|| url.to_string());

    let style_injection = "\n<style>\n\
        html, body { background: #ffffff !important; color: #000000 !important; }\n\
        a { color: #0645ad !important; }\n\
        </style>\n";
    let injection = format!("<base href=\"{}\">{}", base_href, style_injection);

    let patched = match HEAD_RE.find(&body) {
        Some(m) => {
            let mut s = String::with_capacity(body.len() + injection.len());
            s.push_str(&body[..m.end()]);
            s.push_str(&injection);
            s.push_str(&body[m.end()..]);
            s
        }
        None => format!("{}{}", injection, body),
    };

    Ok(Html(patched))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = FilinglensConfig::from_env()?;
    let edgar = EdgarClient::new(&config.user_agent, config.request_timeout_secs)?;

    log::info!("Loading SEC ticker map");
    let tickers = TickerMap::fetch(&edgar).await?;
    log::info!("Loaded {} tickers", tickers.len());

    let state = Arc::new(AppState {
        edgar,
        tickers,
        concepts: ConceptDictionary::standard(),
    });

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/latest-report", get(get_latest_report))
        .route("/api/reports", get(get_reports))
        .route("/api/report-details", get(get_report_details))
        .route("/proxy-filing", get(proxy_filing))
        .layer(CorsLayer::permissive())
        .with_state(state);

    log::info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
