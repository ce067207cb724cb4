use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use super::concepts::{ConceptDictionary, StatementType};
use super::lookup::{resolve_at, series, TimeSeriesPoint, DEFAULT_MAX_POINTS};
use crate::error::Result;

/// Metrics tracked per filing: (response key, statement line to pull the
/// alternatives from, display label).
const TRACKED_METRICS: &[(&str, StatementType, &str, &str)] = &[
    ("revenue", StatementType::Income, "Revenue", "Revenue"),
    ("net_income", StatementType::Income, "Net Income", "Net income"),
    (
        "eps_diluted",
        StatementType::Income,
        "EPS (Diluted)",
        "EPS (diluted)",
    ),
    (
        "cfo",
        StatementType::CashFlow,
        "Net Cash from Operating",
        "Operating cash flow",
    ),
];

/// A headline metric for one filing: its point-in-time value plus the
/// concept's recent reporting history.
#[derive(Debug, Clone, Serialize)]
pub struct MetricBundle {
    pub label: String,
    pub concept: String,
    pub unit: String,
    pub current: Option<f64>,
    pub series: Vec<TimeSeriesPoint>,
}

/// Headline metric bundles for one filing, keyed by metric name.
///
/// Each metric tries its dictionary alternatives in order and keeps the
/// first concept that resolved for this filing; the time series then follows
/// that concept. When none resolved, the first alternative still anchors the
/// series so history renders even without a current value.
pub fn build_metrics(
    dictionary: &ConceptDictionary,
    facts: &Value,
    accession: &str,
    period_end: &str,
) -> Result<BTreeMap<String, MetricBundle>> {
    let mut metrics = BTreeMap::new();

    for (key, statement_type, line_label, display_label) in TRACKED_METRICS {
        let alternatives = dictionary.alternatives(*statement_type, line_label)?;
        let unit = super::statement::unit_for_label(line_label);

        let mut current = None;
        let mut chosen_concept = alternatives[0];
        for concept in alternatives {
            if let Some(val) = resolve_at(facts, concept, accession, period_end, unit) {
                current = Some(val);
                chosen_concept = concept;
                break;
            }
        }

        let history = series(facts, chosen_concept, DEFAULT_MAX_POINTS, unit);

        metrics.insert(
            key.to_string(),
            MetricBundle {
                label: display_label.to_string(),
                concept: chosen_concept.to_string(),
                unit: unit.to_string(),
                current,
                series: history,
            },
        );
    }

    Ok(metrics)
}
