pub mod concepts;
pub mod lookup;
pub mod metrics;
pub mod statement;
pub mod store;

pub use concepts::{ConceptDictionary, StatementType};
pub use lookup::{resolve_at, series, TimeSeriesPoint};
pub use metrics::{build_metrics, MetricBundle};
pub use statement::{build_statements, StatementLine};
pub use store::{observations, Observation};
