use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::Result;

/// Fetches the raw text of a document by URL. The EDGAR client implements
/// this; tests substitute a stub so extraction runs without network access.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_document(&self, url: &Url) -> Result<String>;
}

/// MD&A headings, tried in list order; the first phrase present anywhere in
/// the document wins, even when a later phrase occurs earlier in the text.
const START_MARKERS: &[&str] = &[
    "item 2. management's discussion and analysis",
    "item 7. management's discussion and analysis",
    "management's discussion and analysis of financial condition and results of operations",
];

/// Headings of the sections that follow MD&A in 10-Q/10-K layouts; the
/// earliest occurrence past the start heading bounds the excerpt.
const END_MARKERS: &[&str] = &[
    "item 3.",
    "item 4.",
    "item 7a.",
    "item 8.",
    "quantitative and qualitative disclosures about market risk",
];

/// Offset skipped past the start match before searching for an end marker,
/// so the heading's own item number cannot terminate the section.
const HEADING_SKIP: usize = 50;

/// Fallback excerpt length, in characters, when no subsequent heading is
/// found.
const MAX_EXCERPT_CHARS: usize = 40_000;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Management's Discussion & Analysis excerpt from a filing document,
/// fetched through `fetcher`.
///
/// Best-effort by contract: transport failures and unrecognized documents
/// both come back as `None` so the surrounding report still renders.
pub async fn extract_narrative(fetcher: &dyn DocumentFetcher, url: &Url) -> Option<String> {
    let raw_html = match fetcher.fetch_document(url).await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("Narrative fetch failed for {}: {}", url, e);
            return None;
        }
    };
    narrative_from_html(&raw_html)
}

/// Heuristic MD&A extraction from raw filing HTML.
///
/// Strips markup to plain text, finds the section start by the known heading
/// phrases, bounds it at the next section heading (or a length cap), then
/// collapses whitespace and returns the excerpt escaped and wrapped as a
/// display-ready fragment.
pub fn narrative_from_html(raw_html: &str) -> Option<String> {
    let normalized = normalize_quotes(raw_html);

    let text = TAG_RE.replace_all(&normalized, " ");
    let text_lower = text.to_lowercase();

    let start_idx = START_MARKERS
        .iter()
        .find_map(|marker| text_lower.find(marker))?;

    // Offsets come from the lower-cased copy; clamp to char boundaries in
    // the original before slicing, since lowercasing can shift byte lengths.
    let start = char_floor(&text, start_idx.min(text.len()));

    let search_from = char_floor(&text_lower, (start_idx + HEADING_SKIP).min(text_lower.len()));
    let end_idx = END_MARKERS
        .iter()
        .filter_map(|marker| {
            text_lower[search_from..]
                .find(marker)
                .map(|i| search_from + i)
        })
        .min()
        .unwrap_or_else(|| {
            // The cap counts characters, not bytes, matching the heading
            // search semantics over decoded text.
            text[start..]
                .char_indices()
                .nth(MAX_EXCERPT_CHARS)
                .map(|(i, _)| start + i)
                .unwrap_or(text.len())
        });

    let end = char_floor(&text, end_idx.min(text.len())).max(start);

    let snippet = WHITESPACE_RE
        .replace_all(&text[start..end], " ")
        .trim()
        .to_string();

    if snippet.is_empty() {
        return None;
    }

    let escaped = html_escape::encode_text(&snippet);
    Some(format!(
        "<div style='white-space:pre-wrap; font-size:12px;'>{}</div>",
        escaped
    ))
}

/// Typographic quotes to their ASCII forms, so the heading search is not
/// defeated by curly apostrophes in "Management's".
fn normalize_quotes(text: &str) -> String {
    text.replace('\u{2019}', "'")
        .replace('\u{2018}', "'")
        .replace('\u{201c}', "\"")
        .replace('\u{201d}', "\"")
}

/// Largest char boundary at or below `idx`.
fn char_floor(text: &str, mut idx: usize) -> usize {
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_between_item_2_and_item_3() {
        let html = "<html><body>\
            <p>Item 1. Financial Statements</p>\
            <h2>Item 2. Management\u{2019}s Discussion and Analysis of Financial \
            Condition and Results of Operations</h2>\
            <p>body   text about\nthe quarter</p>\
            <h2>Item 3. Quantitative and Qualitative Disclosures About Market Risk</h2>\
            <p>market risk content</p></body></html>";

        let fragment = narrative_from_html(html).unwrap();
        assert!(fragment.contains("body text about the quarter"));
        assert!(!fragment.contains("market risk content"));
        assert!(!fragment.contains("Item 3"));
        assert!(fragment.starts_with("<div style="));
    }

    #[test]
    fn test_start_marker_priority_is_list_order() {
        // The generic phrase appears before any Item heading; the Item 7
        // marker still wins because the list is scanned in order.
        let html = "management's discussion and analysis of financial condition \
            and results of operations appears in the table of contents. \
            Item 7. Management's Discussion and Analysis of results. \
            annual narrative here Item 8. Financial Statements";
        let fragment = narrative_from_html(html).unwrap();
        assert!(fragment.contains("annual narrative here"));
        assert!(fragment.contains("Item 7. Management"));
    }

    #[test]
    fn test_no_heading_returns_none() {
        assert_eq!(narrative_from_html("<p>Nothing of interest here</p>"), None);
    }

    #[test]
    fn test_no_end_marker_caps_excerpt() {
        let mut html = String::from("Item 2. Management's Discussion and Analysis ");
        html.push_str(&"narrative word ".repeat(5000));
        let fragment = narrative_from_html(&html).unwrap();
        assert!(fragment.len() <= MAX_EXCERPT_CHARS + 100);
    }

    #[test]
    fn test_cap_counts_characters_not_bytes() {
        // Two-byte chars: a byte-offset cap would cut the excerpt roughly
        // in half.
        let mut html = String::from("Item 2. Management's Discussion and Analysis ");
        html.push_str(&"é".repeat(50_000));
        let fragment = narrative_from_html(&html).unwrap();
        let inner = fragment
            .strip_prefix("<div style='white-space:pre-wrap; font-size:12px;'>")
            .and_then(|s| s.strip_suffix("</div>"))
            .unwrap();
        assert_eq!(inner.chars().count(), MAX_EXCERPT_CHARS);
    }

    #[test]
    fn test_escape_round_trips() {
        let html = "Item 2. Management's Discussion and Analysis of the \"strong\" \
            quarter & outlook Item 3. other";
        let fragment = narrative_from_html(html).unwrap();
        let inner = fragment
            .strip_prefix("<div style='white-space:pre-wrap; font-size:12px;'>")
            .and_then(|s| s.strip_suffix("</div>"))
            .unwrap();
        let decoded = html_escape::decode_html_entities(inner);
        assert_eq!(
            decoded,
            "Item 2. Management's Discussion and Analysis of the \"strong\" quarter & outlook"
        );
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_to_none() {
        struct FailingFetcher;

        #[async_trait]
        impl DocumentFetcher for FailingFetcher {
            async fn fetch_document(&self, url: &Url) -> Result<String> {
                Err(crate::error::FilinglensError::Status {
                    status: reqwest::StatusCode::BAD_GATEWAY,
                    url: url.to_string(),
                })
            }
        }

        let url = Url::parse("https://www.sec.gov/Archives/edgar/doc.htm").unwrap();
        assert_eq!(extract_narrative(&FailingFetcher, &url).await, None);
    }
}
