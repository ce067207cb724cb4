use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use super::report::ReportType;
use crate::error::{FilinglensError, Result};

/// Submissions feed for one company. Parallel vectors, one entry per filing,
/// most recent first; EDGAR serves them in camelCase.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecentFilings {
    #[serde(rename = "accessionNumber")]
    pub accession_number: Vec<String>,
    #[serde(rename = "filingDate")]
    pub filing_date: Vec<NaiveDate>,
    // May be "" for filings without a covered period, so kept as strings.
    #[serde(rename = "reportDate")]
    pub report_date: Vec<String>,
    #[serde(rename = "form")]
    pub report_type: Vec<ReportType>,
    #[serde(rename = "primaryDocument")]
    pub primary_document: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FilingsData {
    pub recent: RecentFilings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Submissions {
    pub cik: String,
    pub name: String,
    #[serde(default)]
    pub tickers: Vec<String>,
    pub filings: FilingsData,
}

/// One periodic report, flattened out of the parallel vectors.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub form: ReportType,
    pub accession: String,
    pub primary_doc: String,
    pub filing_date: NaiveDate,
    pub report_date: String,
    pub filing_url: String,
}

/// Archives URL for a filing document. The CIK loses its zero padding and
/// the accession number its dashes in the archive path layout.
pub fn build_filing_url(cik_padded: &str, accession: &str, primary_doc: &str) -> Result<Url> {
    let cik_stripped: u64 = cik_padded.parse().map_err(|_| {
        FilinglensError::Configuration(format!("CIK is not numeric: {}", cik_padded))
    })?;
    let accession_clean = accession.replace('-', "");
    let url = format!(
        "{}/{}/{}/{}",
        super::client::EDGAR_ARCHIVES_URL,
        cik_stripped,
        accession_clean,
        primary_doc
    );
    Ok(Url::parse(&url)?)
}

/// Up to `limit` most recent 10-Q / 10-K / 20-F filings, each with its
/// archive URL already built.
pub fn list_reports(
    submissions: &Submissions,
    cik_padded: &str,
    limit: usize,
) -> Result<Vec<ReportSummary>> {
    let recent = &submissions.filings.recent;

    let mut reports = Vec::new();
    for (((form, accession), (primary_doc, filing_date)), report_date) in recent
        .report_type
        .iter()
        .zip(recent.accession_number.iter())
        .zip(recent.primary_document.iter().zip(recent.filing_date.iter()))
        .zip(recent.report_date.iter())
    {
        if form.is_periodic_report() {
            reports.push(ReportSummary {
                form: form.clone(),
                accession: accession.clone(),
                primary_doc: primary_doc.clone(),
                filing_date: *filing_date,
                report_date: report_date.clone(),
                filing_url: build_filing_url(cik_padded, accession, primary_doc)?.into(),
            });
        }
        if reports.len() >= limit {
            break;
        }
    }

    Ok(reports)
}

/// The most recent periodic report, or `None` when the company has none.
pub fn latest_report(submissions: &Submissions, cik_padded: &str) -> Result<Option<ReportSummary>> {
    Ok(list_reports(submissions, cik_padded, 1)?.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submissions_fixture() -> Submissions {
        Submissions {
            cik: "1652044".to_string(),
            name: "Alphabet Inc.".to_string(),
            tickers: vec!["GOOGL".to_string()],
            filings: FilingsData {
                recent: RecentFilings {
                    accession_number: vec![
                        "0001652044-25-000101".to_string(),
                        "0001652044-25-000091".to_string(),
                        "0001652044-25-000014".to_string(),
                    ],
                    filing_date: vec![
                        "2025-11-03".parse().unwrap(),
                        "2025-10-29".parse().unwrap(),
                        "2025-02-05".parse().unwrap(),
                    ],
                    report_date: vec![
                        "".to_string(),
                        "2025-09-30".to_string(),
                        "2024-12-31".to_string(),
                    ],
                    report_type: vec![
                        "8-K".parse().unwrap(),
                        "10-Q".parse().unwrap(),
                        "10-K".parse().unwrap(),
                    ],
                    primary_document: vec![
                        "goog-8k.htm".to_string(),
                        "goog-20250930.htm".to_string(),
                        "goog-20241231.htm".to_string(),
                    ],
                },
            },
        }
    }

    #[test]
    fn test_build_filing_url() {
        let url =
            build_filing_url("0001652044", "0001652044-25-000091", "goog-20250930.htm").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.sec.gov/Archives/edgar/data/1652044/000165204425000091/goog-20250930.htm"
        );
    }

    #[test]
    fn test_list_reports_skips_non_periodic_forms() {
        let subs = submissions_fixture();
        let reports = list_reports(&subs, "0001652044", 6).unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].accession, "0001652044-25-000091");
        assert_eq!(reports[0].report_date, "2025-09-30");
        assert_eq!(reports[1].form, ReportType::Form10K);
    }

    #[test]
    fn test_latest_report_is_first_periodic() {
        let subs = submissions_fixture();
        let latest = latest_report(&subs, "0001652044").unwrap().unwrap();
        assert_eq!(latest.form, ReportType::Form10Q);
        assert_eq!(latest.primary_doc, "goog-20250930.htm");
    }
}
