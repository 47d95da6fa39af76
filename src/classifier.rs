//! Risk Classifier
//!
//! Maps a client's age, investment amount and stated risk level to a
//! bond/equity split. Rules are ordered and the first match wins:
//! - Young clients or very large amounts: high risk
//! - Clients near retirement: no risk
//! - Otherwise the stated risk level decides

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

const YOUNG_AGE_MAX: i64 = 20;
const RETIREMENT_AGE_MIN: i64 = 60;
const LARGE_INVESTMENT_MIN: i64 = 5_000_000;

const BOND_TICKER: &str = "AGG";
const EQUITY_TICKER: &str = "SPY";

/// Risk level stated by the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Case-insensitive. Missing or unrecognized values fall back to `Medium`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_lowercase()).as_deref() {
            Some("low") => RiskLevel::Low,
            Some("medium") => RiskLevel::Medium,
            Some("high") => RiskLevel::High,
            other => {
                warn!(risk_level = ?other, "Unrecognized risk level, defaulting to medium");
                RiskLevel::Medium
            }
        }
    }
}

/// Recommended portfolio bracket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskBracket {
    NoRisk,
    Low,
    Medium,
    High,
}

impl RiskBracket {
    /// (bonds %, equities %)
    pub fn allocation(&self) -> (u8, u8) {
        match self {
            RiskBracket::NoRisk => (100, 0),
            RiskBracket::Low => (60, 40),
            RiskBracket::Medium => (40, 60),
            RiskBracket::High => (20, 80),
        }
    }
}

impl From<RiskLevel> for RiskBracket {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => RiskBracket::Low,
            RiskLevel::Medium => RiskBracket::Medium,
            RiskLevel::High => RiskBracket::High,
        }
    }
}

/// Which input decided the bracket
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rationale {
    AgeAndAmount,
    AgeProfile,
    RiskProfile,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub bracket: RiskBracket,
    pub rationale: Rationale,
}

impl Recommendation {
    pub fn rationale_text(&self) -> &'static str {
        match self.rationale {
            Rationale::AgeAndAmount => "Given your age and investment amount we recommend a,",
            Rationale::AgeProfile => "Given your age profile we recommend a,",
            Rationale::RiskProfile => "Given your risk profile we recommend a,",
        }
    }

    pub fn strategy_text(&self) -> String {
        let (bonds, equities) = self.bracket.allocation();
        format!(
            "{} risk, {}% bonds ({}), {}% equities ({}) strategy.",
            self.bracket, bonds, BOND_TICKER, equities, EQUITY_TICKER
        )
    }
}

/// Risk classifier
pub struct RiskClassifier;

impl RiskClassifier {
    pub fn classify(age: i64, investment_amount: i64, risk_level: RiskLevel) -> Recommendation {
        if age <= YOUNG_AGE_MAX || investment_amount >= LARGE_INVESTMENT_MIN {
            Recommendation {
                bracket: RiskBracket::High,
                rationale: Rationale::AgeAndAmount,
            }
        } else if age >= RETIREMENT_AGE_MIN {
            Recommendation {
                bracket: RiskBracket::NoRisk,
                rationale: Rationale::AgeProfile,
            }
        } else {
            Recommendation {
                bracket: risk_level.into(),
                rationale: Rationale::RiskProfile,
            }
        }
    }
}

impl fmt::Display for RiskBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskBracket::NoRisk => "no",
            RiskBracket::Low => "low",
            RiskBracket::Medium => "medium",
            RiskBracket::High => "high",
        };
        write!(f, "{}", s)
    }
}
