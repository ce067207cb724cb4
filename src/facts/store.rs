use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_UNIT: &str = "USD";
pub const GAAP_TAXONOMY: &str = "us-gaap";

/// One recorded XBRL fact. Every field the feed marks optional stays
/// optional here; downstream lookups decide what completeness they need.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub accn: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub val: Option<f64>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub fy: Option<i64>,
    #[serde(default)]
    pub fp: Option<String>,
}

/// Observations recorded for a (concept, unit) pair in a companyfacts
/// document, in feed order.
///
/// Absence at any level (taxonomy, concept, units, unit) yields an empty
/// vector, never an error: concept coverage varies company-to-company and a
/// missing concept is routine. Entries that do not decode are dropped.
pub fn observations(facts: &Value, concept: &str, unit: &str) -> Vec<Observation> {
    let Some(entries) = facts
        .get("facts")
        .and_then(|f| f.get(GAAP_TAXONOMY))
        .and_then(|t| t.get(concept))
        .and_then(|c| c.get("units"))
        .and_then(|u| u.get(unit))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect()
}
