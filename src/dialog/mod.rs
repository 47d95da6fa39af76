//! Dialog controller for the `recommendPortfolio` intent
//!
//! DialogCodeHook → validate → ElicitSlot | Delegate
//! FulfillmentCodeHook → classify → Close

use crate::classifier::{RiskClassifier, RiskLevel};
use crate::dispatch::IntentHandler;
use crate::models::{DialogRequest, DialogResponse, FulfillmentState, InvocationSource, Message};
use crate::validation::{
    create_default_validator, SlotNumber, Validator, AGE_SLOT, INVESTMENT_AMOUNT_SLOT,
};
use crate::Result;
use tracing::{debug, info, warn};

pub const RECOMMEND_PORTFOLIO_INTENT: &str = "recommendPortfolio";

pub const FIRST_NAME_SLOT: &str = "firstName";
pub const RISK_LEVEL_SLOT: &str = "riskLevel";

pub struct RecommendPortfolioHandler {
    validator: Validator,
}

impl RecommendPortfolioHandler {
    pub fn new() -> Self {
        Self {
            validator: create_default_validator(),
        }
    }

    /// Re-prompt for the first invalid slot, otherwise hand slot filling back to the platform.
    fn elicit(&self, request: DialogRequest) -> DialogResponse {
        let result = self.validator.validate(|slot| request.slot(slot));

        let Some((violated_slot, message)) = result.into_violation() else {
            debug!("Slots valid, delegating");
            return DialogResponse::delegate(
                request.session_attributes,
                request.current_intent.slots,
            );
        };

        info!(slot = %violated_slot, "Re-eliciting invalid slot");

        let mut slots = request.current_intent.slots;
        slots.insert(violated_slot.clone(), None);

        DialogResponse::elicit_slot(
            request.session_attributes,
            request.current_intent.name,
            slots,
            violated_slot,
            message,
        )
    }

    fn fulfill(&self, request: DialogRequest) -> DialogResponse {
        let age = SlotNumber::parse(request.slot(AGE_SLOT));
        let investment_amount = SlotNumber::parse(request.slot(INVESTMENT_AMOUNT_SLOT));

        let (Some(age), Some(investment_amount)) = (age.value(), investment_amount.value()) else {
            warn!(
                ?age,
                ?investment_amount,
                "Fulfillment requested without numeric age and investment amount"
            );
            return DialogResponse::close(
                request.session_attributes,
                FulfillmentState::Failed,
                Message::plain_text(
                    "Sorry, we could not read your age and investment amount. \
                     Please start over so we can build your recommendation.",
                ),
            );
        };

        let risk_level = RiskLevel::parse(request.slot(RISK_LEVEL_SLOT));
        let recommendation = RiskClassifier::classify(age, investment_amount, risk_level);

        info!(
            age,
            investment_amount,
            ?risk_level,
            bracket = %recommendation.bracket,
            "Portfolio recommendation ready"
        );

        let greeting = match request.slot(FIRST_NAME_SLOT) {
            Some(name) if !name.trim().is_empty() => {
                format!("Thank you {} for your information.", name.trim())
            }
            _ => "Thank you for your information.".to_string(),
        };

        let content = format!(
            "{}\n{}\n{}",
            greeting,
            recommendation.rationale_text(),
            recommendation.strategy_text()
        );

        DialogResponse::close(
            request.session_attributes,
            FulfillmentState::Fulfilled,
            Message::plain_text(content),
        )
    }
}

impl Default for RecommendPortfolioHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentHandler for RecommendPortfolioHandler {
    fn intent_name(&self) -> &'static str {
        RECOMMEND_PORTFOLIO_INTENT
    }

    fn handle(&self, request: DialogRequest) -> Result<DialogResponse> {
        let response = match request.invocation_source {
            InvocationSource::DialogCodeHook => self.elicit(request),
            InvocationSource::FulfillmentCodeHook => self.fulfill(request),
        };
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DialogAction;
    use serde_json::{json, Value};

    fn request(source: &str, slots: Value) -> DialogRequest {
        serde_json::from_value(json!({
            "invocationSource": source,
            "currentIntent": { "name": RECOMMEND_PORTFOLIO_INTENT, "slots": slots },
            "sessionAttributes": { "previous": "turn" }
        }))
        .unwrap()
    }

    fn fulfill(age: &str, amount: &str, risk: &str) -> String {
        let handler = RecommendPortfolioHandler::new();
        let response = handler
            .handle(request(
                "FulfillmentCodeHook",
                json!({
                    "firstName": "Ana",
                    "age": age,
                    "investmentAmount": amount,
                    "riskLevel": risk
                }),
            ))
            .unwrap();

        match response.dialog_action {
            DialogAction::Close {
                fulfillment_state: FulfillmentState::Fulfilled,
                message,
            } => message.content,
            other => panic!("expected fulfilled close, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_age_elicits_and_clears_slot() {
        let handler = RecommendPortfolioHandler::new();
        let response = handler
            .handle(request(
                "DialogCodeHook",
                json!({ "firstName": "Ana", "age": "70", "investmentAmount": null, "riskLevel": null }),
            ))
            .unwrap();

        assert_eq!(
            response.session_attributes.as_ref().unwrap()["previous"],
            "turn"
        );
        match response.dialog_action {
            DialogAction::ElicitSlot {
                intent_name,
                slots,
                slot_to_elicit,
                message,
            } => {
                assert_eq!(intent_name, RECOMMEND_PORTFOLIO_INTENT);
                assert_eq!(slot_to_elicit, AGE_SLOT);
                assert_eq!(slots.get(AGE_SLOT), Some(&None));
                assert_eq!(slots.get(FIRST_NAME_SLOT), Some(&Some("Ana".to_string())));
                assert!(message.content.contains("age"));
            }
            other => panic!("expected elicit slot, got {:?}", other),
        }
    }

    #[test]
    fn test_low_investment_elicits_amount() {
        let handler = RecommendPortfolioHandler::new();
        let response = handler
            .handle(request(
                "DialogCodeHook",
                json!({ "age": "30", "investmentAmount": "100" }),
            ))
            .unwrap();

        match response.dialog_action {
            DialogAction::ElicitSlot {
                slots,
                slot_to_elicit,
                ..
            } => {
                assert_eq!(slot_to_elicit, INVESTMENT_AMOUNT_SLOT);
                assert_eq!(slots.get(INVESTMENT_AMOUNT_SLOT), Some(&None));
                assert_eq!(slots.get(AGE_SLOT), Some(&Some("30".to_string())));
            }
            other => panic!("expected elicit slot, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_slots_delegate_unchanged() {
        let handler = RecommendPortfolioHandler::new();
        let req = request(
            "DialogCodeHook",
            json!({ "firstName": "Ana", "age": "30", "investmentAmount": null, "riskLevel": null }),
        );
        let expected_slots = req.current_intent.slots.clone();

        let response = handler.handle(req).unwrap();
        assert_eq!(
            response.dialog_action,
            DialogAction::Delegate {
                slots: expected_slots
            }
        );
    }

    #[test]
    fn test_fulfillment_classification() {
        assert!(fulfill("18", "10000", "low").contains("high risk, 20% bonds (AGG), 80% equities (SPY)"));
        assert!(fulfill("62", "10000", "high").contains("no risk, 100% bonds (AGG), 0% equities (SPY)"));
        assert!(fulfill("35", "10000", "Medium").contains("medium risk, 40% bonds (AGG), 60% equities (SPY)"));
        assert!(fulfill("40", "6000000", "low").contains("high risk"));
        assert!(fulfill("35", "10000", "low").contains("low risk, 60% bonds (AGG), 40% equities (SPY)"));
        assert!(fulfill("35", "10000", "aggressive").contains("medium risk"));
    }

    #[test]
    fn test_fulfillment_message_format() {
        assert_eq!(
            fulfill("62", "10000", "high"),
            "Thank you Ana for your information.\n\
             Given your age profile we recommend a,\n\
             no risk, 100% bonds (AGG), 0% equities (SPY) strategy."
        );
    }

    #[test]
    fn test_fulfillment_without_first_name() {
        let handler = RecommendPortfolioHandler::new();
        let response = handler
            .handle(request(
                "FulfillmentCodeHook",
                json!({ "age": "35", "investmentAmount": "10000", "riskLevel": "high" }),
            ))
            .unwrap();

        match response.dialog_action {
            DialogAction::Close { message, .. } => {
                assert!(message.content.starts_with("Thank you for your information."));
            }
            other => panic!("expected close, got {:?}", other),
        }
    }

    #[test]
    fn test_fulfillment_with_unreadable_numbers_fails() {
        let handler = RecommendPortfolioHandler::new();
        let response = handler
            .handle(request(
                "FulfillmentCodeHook",
                json!({ "age": "old", "investmentAmount": "10000", "riskLevel": "high" }),
            ))
            .unwrap();

        assert!(matches!(
            response.dialog_action,
            DialogAction::Close {
                fulfillment_state: FulfillmentState::Failed,
                ..
            }
        ));
    }
}
