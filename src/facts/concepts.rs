use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::EnumIter;

use crate::error::{FilinglensError, Result};

/// The three standardized statement schemas the dictionary covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum StatementType {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "balance")]
    Balance,
    #[serde(rename = "cash_flow")]
    CashFlow,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementType::Income => write!(f, "income"),
            StatementType::Balance => write!(f, "balance"),
            StatementType::CashFlow => write!(f, "cash_flow"),
        }
    }
}

impl FromStr for StatementType {
    type Err = FilinglensError;

    fn from_str(s: &str) -> Result<StatementType> {
        match s {
            "income" => Ok(StatementType::Income),
            "balance" => Ok(StatementType::Balance),
            "cash_flow" => Ok(StatementType::CashFlow),
            other => Err(FilinglensError::Configuration(format!(
                "unsupported statement type: {}",
                other
            ))),
        }
    }
}

/// One display line of a statement schema: the UI label and the us-gaap
/// concepts to try for it, in preference order. Companies tag the same
/// economic line under different concepts, so the first alternative that
/// yields a value for the target filing wins.
#[derive(Debug, Clone, Copy)]
pub struct ConceptGroup {
    pub label: &'static str,
    pub alternatives: &'static [&'static str],
}

/// Read-only mapping from statement type to its ordered line schema.
///
/// Built once at startup and injected where needed; order of both lines and
/// alternatives is the declared order, never rearranged at runtime.
#[derive(Debug, Clone)]
pub struct ConceptDictionary {
    tables: Vec<(StatementType, &'static [ConceptGroup])>,
}

const INCOME_LINES: &[ConceptGroup] = &[
    ConceptGroup {
        label: "Revenue",
        alternatives: &[
            "Revenues",
            "RevenueFromContractWithCustomerExcludingAssessedTax",
            "SalesRevenueNet",
            "SalesRevenueServicesNet",
            "SalesRevenueGoodsNet",
        ],
    },
    ConceptGroup {
        label: "Cost of Revenue",
        alternatives: &[
            "CostOfRevenue",
            "CostOfGoodsAndServicesSold",
            "CostOfGoodsSold",
            "CostOfServices",
        ],
    },
    ConceptGroup {
        label: "Gross Profit",
        alternatives: &["GrossProfit"],
    },
    ConceptGroup {
        label: "Operating Expenses",
        alternatives: &["OperatingExpenses", "OperatingCostsAndExpenses"],
    },
    ConceptGroup {
        label: "Operating Income",
        alternatives: &["OperatingIncomeLoss"],
    },
    ConceptGroup {
        label: "Net Income",
        alternatives: &["NetIncomeLoss", "ProfitLoss"],
    },
    ConceptGroup {
        label: "EPS (Basic)",
        alternatives: &["EarningsPerShareBasic"],
    },
    ConceptGroup {
        label: "EPS (Diluted)",
        alternatives: &["EarningsPerShareDiluted"],
    },
];

const BALANCE_LINES: &[ConceptGroup] = &[
    ConceptGroup {
        label: "Cash & Equivalents",
        alternatives: &[
            "CashAndCashEquivalentsAtCarryingValue",
            "CashAndCashEquivalents",
        ],
    },
    ConceptGroup {
        label: "Short-term Investments",
        alternatives: &[
            "MarketableSecuritiesCurrent",
            "AvailableForSaleSecuritiesCurrent",
        ],
    },
    ConceptGroup {
        label: "Total Current Assets",
        alternatives: &["AssetsCurrent"],
    },
    ConceptGroup {
        label: "Total Assets",
        alternatives: &["Assets"],
    },
    ConceptGroup {
        label: "Accounts Payable",
        alternatives: &["AccountsPayableCurrent", "AccountsPayableTradeCurrent"],
    },
    ConceptGroup {
        label: "Total Current Liabilities",
        alternatives: &["LiabilitiesCurrent"],
    },
    ConceptGroup {
        label: "Total Liabilities",
        alternatives: &["Liabilities"],
    },
    ConceptGroup {
        label: "Retained Earnings",
        alternatives: &["RetainedEarningsAccumulatedDeficit"],
    },
    ConceptGroup {
        label: "Total Equity",
        alternatives: &[
            "StockholdersEquity",
            "StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest",
        ],
    },
];

const CASH_FLOW_LINES: &[ConceptGroup] = &[
    ConceptGroup {
        label: "Net Cash from Operating",
        alternatives: &["NetCashProvidedByUsedInOperatingActivities"],
    },
    ConceptGroup {
        label: "Depreciation & Amortization",
        alternatives: &[
            "DepreciationDepletionAndAmortization",
            "Depreciation",
            "AmortizationOfIntangibleAssets",
        ],
    },
    ConceptGroup {
        label: "Net Cash from Investing",
        alternatives: &["NetCashProvidedByUsedInInvestingActivities"],
    },
    ConceptGroup {
        label: "CapEx",
        alternatives: &[
            "PaymentsToAcquirePropertyPlantAndEquipment",
            "PaymentsToAcquireProductiveAssets",
        ],
    },
    ConceptGroup {
        label: "Net Cash from Financing",
        alternatives: &["NetCashProvidedByUsedInFinancingActivities"],
    },
    ConceptGroup {
        label: "Dividends Paid",
        alternatives: &["PaymentsOfDividends", "PaymentsOfDividendsCommonStock"],
    },
];

impl ConceptDictionary {
    /// The standard statement schemas.
    pub fn standard() -> Self {
        ConceptDictionary {
            tables: vec![
                (StatementType::Income, INCOME_LINES),
                (StatementType::Balance, BALANCE_LINES),
                (StatementType::CashFlow, CASH_FLOW_LINES),
            ],
        }
    }

    /// Ordered line schema for one statement type. A missing table is a
    /// construction defect, not missing data, so it fails hard.
    pub fn lines(&self, statement_type: StatementType) -> Result<&'static [ConceptGroup]> {
        self.tables
            .iter()
            .find(|(st, _)| *st == statement_type)
            .map(|(_, lines)| *lines)
            .ok_or_else(|| {
                FilinglensError::Configuration(format!(
                    "no concept table for statement type: {}",
                    statement_type
                ))
            })
    }

    /// Alternatives for one display label within a statement type.
    pub fn alternatives(
        &self,
        statement_type: StatementType,
        label: &str,
    ) -> Result<&'static [&'static str]> {
        let group = self
            .lines(statement_type)?
            .iter()
            .find(|g| g.label == label)
            .ok_or_else(|| {
                FilinglensError::Configuration(format!(
                    "no concept group labeled {:?} in {} statement",
                    label, statement_type
                ))
            })?;
        if group.alternatives.is_empty() {
            return Err(FilinglensError::Configuration(format!(
                "empty alternative list for {:?}",
                label
            )));
        }
        Ok(group.alternatives)
    }
}

impl Default for ConceptDictionary {
    fn default() -> Self {
        Self::standard()
    }
}
