use serde::Serialize;
use serde_json::Value;

use super::store::observations;

pub const DEFAULT_MAX_POINTS: usize = 4;

/// One point of a concept's reporting history, serialized with the feed's
/// own key names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub end: String,
    pub val: f64,
    pub form: Option<String>,
    pub fy: Option<i64>,
    pub fp: Option<String>,
}

/// The value a specific filing reported for a concept, matched by exact
/// accession and period-end equality. Matching on the accession rather than
/// the date alone keeps a restated filing that shares a period-end from
/// shadowing the requested one.
///
/// Returns `None` when the filing did not report the concept, which is
/// routine. Entries matching the filing but carrying no value are skipped,
/// the scan continues. When the feed carries duplicate (concept, accession,
/// end) entries with values, the first in feed order wins; which duplicate
/// is authoritative is unspecified upstream.
pub fn resolve_at(
    facts: &Value,
    concept: &str,
    accession: &str,
    period_end: &str,
    unit: &str,
) -> Option<f64> {
    observations(facts, concept, unit)
        .into_iter()
        .find(|obs| {
            obs.val.is_some()
                && obs.accn.as_deref() == Some(accession)
                && obs.end.as_deref() == Some(period_end)
        })
        .and_then(|obs| obs.val)
}

/// Up to `max_points` most recent observations of a concept, newest first.
///
/// Deliberately ignores accession boundaries: the history spans every filing
/// that reported the concept, restatements included. Entries missing a value
/// or period-end are dropped rather than failing the request. The sort is
/// stable, so entries sharing a period-end keep their feed order; the fixed
/// ISO date format makes the lexicographic compare a date compare.
pub fn series(facts: &Value, concept: &str, max_points: usize, unit: &str) -> Vec<TimeSeriesPoint> {
    let mut points: Vec<TimeSeriesPoint> = observations(facts, concept, unit)
        .into_iter()
        .filter_map(|obs| {
            Some(TimeSeriesPoint {
                end: obs.end?,
                val: obs.val?,
                form: obs.form,
                fy: obs.fy,
                fp: obs.fp,
            })
        })
        .collect();

    points.sort_by(|a, b| b.end.cmp(&a.end));
    points.truncate(max_points);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn facts_fixture() -> Value {
        json!({
            "facts": {"us-gaap": {"Revenues": {"units": {"USD": [
                {"accn": "0001-25-000091", "end": "2025-09-30", "val": 100.0, "form": "10-Q", "fy": 2025, "fp": "Q3"},
                {"accn": "0001-25-000060", "end": "2025-06-30", "val": 95.0, "form": "10-Q", "fy": 2025, "fp": "Q2"},
                {"accn": "0001-25-000030", "end": "2025-03-31", "val": 88.0, "form": "10-Q", "fy": 2025, "fp": "Q1"},
                {"accn": "0001-25-000014", "end": "2024-12-31", "val": 130.0, "form": "10-K", "fy": 2024, "fp": "FY"},
                {"accn": "0001-24-000080", "end": "2024-09-30", "val": 82.0, "form": "10-Q", "fy": 2024, "fp": "Q3"}
            ]}}}}
        })
    }

    #[test]
    fn test_resolve_exact_match() {
        let facts = facts_fixture();
        assert_eq!(
            resolve_at(&facts, "Revenues", "0001-25-000091", "2025-09-30", "USD"),
            Some(100.0)
        );
    }

    #[test]
    fn test_resolve_requires_both_accession_and_end() {
        let facts = facts_fixture();
        // Right accession, wrong period end.
        assert_eq!(
            resolve_at(&facts, "Revenues", "0001-25-000091", "2025-06-30", "USD"),
            None
        );
        // Right period end, wrong accession.
        assert_eq!(
            resolve_at(&facts, "Revenues", "0001-24-000080", "2025-09-30", "USD"),
            None
        );
    }

    #[test]
    fn test_resolve_missing_concept_is_none() {
        let facts = facts_fixture();
        assert_eq!(
            resolve_at(&facts, "GrossProfit", "0001-25-000091", "2025-09-30", "USD"),
            None
        );
    }

    #[test]
    fn test_resolve_skips_matching_entries_without_a_value() {
        let facts = json!({
            "facts": {"us-gaap": {"Assets": {"units": {"USD": [
                {"accn": "0001-25-000091", "end": "2025-09-30"},
                {"accn": "0001-25-000091", "end": "2025-09-30", "val": 5.0}
            ]}}}}
        });
        assert_eq!(
            resolve_at(&facts, "Assets", "0001-25-000091", "2025-09-30", "USD"),
            Some(5.0)
        );
    }

    #[test]
    fn test_resolve_duplicate_takes_first_in_feed_order() {
        let facts = json!({
            "facts": {"us-gaap": {"Assets": {"units": {"USD": [
                {"accn": "0001-25-000091", "end": "2025-09-30", "val": 1.0},
                {"accn": "0001-25-000091", "end": "2025-09-30", "val": 2.0}
            ]}}}}
        });
        assert_eq!(
            resolve_at(&facts, "Assets", "0001-25-000091", "2025-09-30", "USD"),
            Some(1.0)
        );
    }

    #[test]
    fn test_series_caps_and_orders_descending() {
        let facts = facts_fixture();
        let points = series(&facts, "Revenues", 4, "USD");
        let ends: Vec<&str> = points.iter().map(|p| p.end.as_str()).collect();
        assert_eq!(
            ends,
            vec!["2025-09-30", "2025-06-30", "2025-03-31", "2024-12-31"]
        );
    }

    #[test]
    fn test_series_drops_incomplete_entries() {
        let facts = json!({
            "facts": {"us-gaap": {"Assets": {"units": {"USD": [
                {"accn": "a", "end": "2025-09-30", "val": 1.0},
                {"accn": "b", "end": "2025-06-30"},
                {"accn": "c", "val": 3.0}
            ]}}}}
        });
        let points = series(&facts, "Assets", 4, "USD");
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].val, 1.0);
    }

    #[test]
    fn test_series_date_ties_keep_feed_order() {
        let facts = json!({
            "facts": {"us-gaap": {"Assets": {"units": {"USD": [
                {"accn": "first", "end": "2025-09-30", "val": 1.0, "form": "10-Q"},
                {"accn": "second", "end": "2025-09-30", "val": 2.0, "form": "10-K"}
            ]}}}}
        });
        let points = series(&facts, "Assets", 4, "USD");
        assert_eq!(points[0].val, 1.0);
        assert_eq!(points[1].val, 2.0);
    }
}
