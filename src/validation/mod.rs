//! Slot validation for the dialog phase
//!
//! Rules-based validation of numeric slots.
//! Rules run in order and the first violation wins.

use crate::models::Message;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const AGE_SLOT: &str = "age";
pub const INVESTMENT_AMOUNT_SLOT: &str = "investmentAmount";

const MAX_AGE_EXCLUSIVE: i64 = 65;
const MIN_INVESTMENT_AMOUNT: i64 = 5_000;

//
// ================= Parsing =================
//

/// Outcome of reading a numeric slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotNumber {
    Missing,
    Invalid(String),
    Value(i64),
}

impl SlotNumber {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => SlotNumber::Missing,
            Some(text) => match text.trim().parse::<i64>() {
                Ok(value) => SlotNumber::Value(value),
                Err(_) => SlotNumber::Invalid(text.to_string()),
            },
        }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            SlotNumber::Value(value) => Some(*value),
            _ => None,
        }
    }
}

//
// ================= Result =================
//

/// `violated_slot` and `message` are set iff the result is invalid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    violated_slot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<Message>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violated_slot: None,
            message: None,
        }
    }

    pub fn invalid(slot: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            violated_slot: Some(slot.into()),
            message: Some(Message::plain_text(content)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn violated_slot(&self) -> Option<&str> {
        self.violated_slot.as_deref()
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Splits an invalid result into its slot and message.
    pub fn into_violation(self) -> Option<(String, Message)> {
        match (self.violated_slot, self.message) {
            (Some(slot), Some(message)) => Some((slot, message)),
            _ => None,
        }
    }
}

//
// ================= Rules =================
//

/// Range rule over one numeric slot
pub trait SlotRule: Send + Sync {
    fn slot(&self) -> &'static str;

    fn accepts(&self, value: i64) -> bool;

    /// Re-prompt text when the value is out of range
    fn message(&self) -> &'static str;
}

/// Rule: 0 <= age < 65
pub struct AgeRule;

impl SlotRule for AgeRule {
    fn slot(&self) -> &'static str {
        AGE_SLOT
    }

    fn accepts(&self, value: i64) -> bool {
        (0..MAX_AGE_EXCLUSIVE).contains(&value)
    }

    fn message(&self) -> &'static str {
        "The age you provided is either below 0 or above 65, which is above our retirement target. \
         Please provide a new age, thank you."
    }
}

/// Rule: investment amount >= 5000
pub struct InvestmentAmountRule;

impl SlotRule for InvestmentAmountRule {
    fn slot(&self) -> &'static str {
        INVESTMENT_AMOUNT_SLOT
    }

    fn accepts(&self, value: i64) -> bool {
        value >= MIN_INVESTMENT_AMOUNT
    }

    fn message(&self) -> &'static str {
        "The minimum investment amount is $5,000, could you please provide a greater amount?"
    }
}

/// Ordered set of slot rules
pub struct Validator {
    rules: Vec<Box<dyn SlotRule>>,
}

impl Validator {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn SlotRule>) {
        self.rules.push(rule);
    }

    /// Checks each rule's slot as returned by `lookup`. Missing slots are skipped.
    pub fn validate<'a, F>(&self, lookup: F) -> ValidationResult
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        for rule in &self.rules {
            let slot = rule.slot();

            match SlotNumber::parse(lookup(slot)) {
                SlotNumber::Missing => continue,
                SlotNumber::Invalid(raw) => {
                    debug!(slot, raw = %raw, "Slot is not a number");
                    return ValidationResult::invalid(
                        slot,
                        format!("'{}' is not a number, could you please provide a number?", raw),
                    );
                }
                SlotNumber::Value(value) if !rule.accepts(value) => {
                    debug!(slot, value, "Slot out of range");
                    return ValidationResult::invalid(slot, rule.message());
                }
                SlotNumber::Value(_) => {}
            }
        }

        ValidationResult::valid()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Age rule first, then investment amount
pub fn create_default_validator() -> Validator {
    let mut validator = Validator::new();
    validator.add_rule(Box::new(AgeRule));
    validator.add_rule(Box::new(InvestmentAmountRule));
    validator
}

/// Validate the two numeric slots with the default rules
pub fn validate(age: Option<&str>, investment_amount: Option<&str>) -> ValidationResult {
    create_default_validator().validate(|slot| match slot {
        AGE_SLOT => age,
        INVESTMENT_AMOUNT_SLOT => investment_amount,
        _ => None,
    })
}

//
// ================= Tests =================
//
