use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

use super::concepts::{ConceptDictionary, StatementType};
use super::lookup::resolve_at;
use crate::error::{FilinglensError, Result};

pub const PER_SHARE_UNIT: &str = "USD/sh";

/// One resolved line of a standardized statement. `value` and `concept` are
/// absent together when no alternative concept matched the filing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatementLine {
    pub label: String,
    pub value: Option<f64>,
    pub unit: String,
    pub concept: Option<String>,
}

/// Unit implied by a display label. EPS lines are per-share, everything
/// else is plain USD.
pub fn unit_for_label(label: &str) -> &'static str {
    if label.contains("EPS") {
        PER_SHARE_UNIT
    } else {
        super::store::DEFAULT_UNIT
    }
}

/// Standardized statements for one filing, keyed by statement type.
///
/// Every label in the dictionary appears in the output, value or not, so
/// the schema is identical across companies regardless of which concepts
/// they report under. Missing values never fail the build; only an
/// inconsistent dictionary does.
pub fn build_statements(
    dictionary: &ConceptDictionary,
    facts: &Value,
    accession: &str,
    period_end: &str,
) -> Result<BTreeMap<StatementType, Vec<StatementLine>>> {
    let mut statements = BTreeMap::new();

    for statement_type in StatementType::iter() {
        let mut lines = Vec::new();
        for group in dictionary.lines(statement_type)? {
            if group.alternatives.is_empty() {
                return Err(FilinglensError::Configuration(format!(
                    "empty alternative list for {:?}",
                    group.label
                )));
            }

            let unit = unit_for_label(group.label);
            let resolved = group.alternatives.iter().find_map(|concept| {
                resolve_at(facts, concept, accession, period_end, unit)
                    .map(|val| (concept.to_string(), val))
            });

            let (concept, value) = match resolved {
                Some((concept, val)) => (Some(concept), Some(val)),
                None => (None, None),
            };

            lines.push(StatementLine {
                label: group.label.to_string(),
                value,
                unit: unit.to_string(),
                concept,
            });
        }
        statements.insert(statement_type, lines);
    }

    Ok(statements)
}
