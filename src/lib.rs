//! Portfolio Advisor Dialog Handler
//!
//! Code hook for a conversational bot that:
//! - Validates the age and investment amount slots while the dialog runs
//! - Re-prompts for the first invalid slot, or delegates back to the platform
//! - Classifies the client into a risk bracket at fulfillment
//! - Recommends a bond/equity split in the closing message
//!
//! FLOW:
//! REQUEST → DISPATCH (intent) → VALIDATE | CLASSIFY → RESPONSE

pub mod api;
pub mod classifier;
pub mod config;
pub mod dialog;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod validation;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use classifier::{RiskClassifier, RiskLevel};
pub use dispatch::{create_default_dispatcher, dispatch, Dispatcher, IntentHandler};
pub use validation::{validate, ValidationResult};
