use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// SEC form type as reported in the submissions feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportType {
    Form10K,
    Form10Q,
    Form20F,
    Form8K,
    Form6K,
    Other(String),
}

impl ReportType {
    /// Forms that carry a full set of periodic financial statements.
    pub fn is_periodic_report(&self) -> bool {
        matches!(
            self,
            ReportType::Form10K | ReportType::Form10Q | ReportType::Form20F
        )
    }
}

impl TryFrom<String> for ReportType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ReportType::from_str(&s)
    }
}

impl From<ReportType> for String {
    fn from(r: ReportType) -> String {
        r.to_string()
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportType::Form10K => write!(f, "10-K"),
            ReportType::Form10Q => write!(f, "10-Q"),
            ReportType::Form20F => write!(f, "20-F"),
            ReportType::Form8K => write!(f, "8-K"),
            ReportType::Form6K => write!(f, "6-K"),
            ReportType::Other(s) => write!(f, "{}", s),
        }
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<ReportType, String> {
        match s.to_uppercase().as_str() {
            "10-K" => Ok(ReportType::Form10K),
            "10-Q" => Ok(ReportType::Form10Q),
            "20-F" => Ok(ReportType::Form20F),
            "8-K" => Ok(ReportType::Form8K),
            "6-K" => Ok(ReportType::Form6K),
            _ => Ok(ReportType::Other(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periodic_forms() {
        assert!("10-Q".parse::<ReportType>().unwrap().is_periodic_report());
        assert!("10-K".parse::<ReportType>().unwrap().is_periodic_report());
        assert!("20-F".parse::<ReportType>().unwrap().is_periodic_report());
        assert!(!"8-K".parse::<ReportType>().unwrap().is_periodic_report());
        assert!(!"S-1".parse::<ReportType>().unwrap().is_periodic_report());
    }

    #[test]
    fn test_roundtrip_display() {
        let r: ReportType = "def 14a".parse().unwrap();
        assert_eq!(r, ReportType::Other("def 14a".to_string()));
        assert_eq!("10-K".parse::<ReportType>().unwrap().to_string(), "10-K");
    }
}
