pub mod core;
pub mod edgar;
pub mod error;
pub mod facts;
pub mod narrative;

// Re-exports
pub use error::{FilinglensError, Result};
pub use facts::concepts::{ConceptDictionary, StatementType};
