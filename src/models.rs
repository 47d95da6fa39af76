//! Wire models for the code-hook request and the dialog response
//!
//! Field names follow the bot platform's JSON schema verbatim.

use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Slot name → current value. `None` is serialized as `null`.
pub type Slots = BTreeMap<String, Option<String>>;

/// Opaque session state owned by the platform.
pub type SessionAttributes = Map<String, Value>;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum InvocationSource {
    /// The platform is still collecting slot values.
    DialogCodeHook,
    /// All slots are filled and a final answer is expected.
    FulfillmentCodeHook,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentType {
    PlainText,
    #[serde(rename = "SSML")]
    Ssml,
    CustomPayload,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ConfirmationStatus {
    #[default]
    None,
    Confirmed,
    Denied,
}

//
// ================= Request =================
//

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogRequest {
    #[serde(default)]
    pub message_version: Option<String>,
    pub invocation_source: InvocationSource,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub output_dialog_mode: Option<String>,
    #[serde(default)]
    pub input_transcript: Option<String>,
    #[serde(default)]
    pub bot: Option<BotInfo>,
    pub current_intent: CurrentIntent,
    #[serde(default)]
    pub session_attributes: Option<SessionAttributes>,
    #[serde(default)]
    pub request_attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: Slots,
    #[serde(default)]
    pub slot_details: Option<Value>,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotInfo {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl DialogRequest {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Value of a slot, treating absent and `null` alike.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.current_intent
            .slots
            .get(name)
            .and_then(|value| value.as_deref())
    }

    pub fn intent_name(&self) -> &str {
        &self.current_intent.name
    }
}

//
// ================= Response =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: ContentType,
    pub content: String,
}

impl Message {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: ContentType::PlainText,
            content: content.into(),
        }
    }
}

/// What the platform should do next, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DialogAction {
    #[serde(rename_all = "camelCase")]
    ElicitSlot {
        intent_name: String,
        slots: Slots,
        slot_to_elicit: String,
        message: Message,
    },
    Delegate {
        slots: Slots,
    },
    #[serde(rename_all = "camelCase")]
    Close {
        fulfillment_state: FulfillmentState,
        message: Message,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub session_attributes: Option<SessionAttributes>,
    pub dialog_action: DialogAction,
}

impl DialogResponse {
    pub fn elicit_slot(
        session_attributes: Option<SessionAttributes>,
        intent_name: impl Into<String>,
        slots: Slots,
        slot_to_elicit: impl Into<String>,
        message: Message,
    ) -> Self {
        Self {
            session_attributes,
            dialog_action: DialogAction::ElicitSlot {
                intent_name: intent_name.into(),
                slots,
                slot_to_elicit: slot_to_elicit.into(),
                message,
            },
        }
    }

    pub fn delegate(session_attributes: Option<SessionAttributes>, slots: Slots) -> Self {
        Self {
            session_attributes,
            dialog_action: DialogAction::Delegate { slots },
        }
    }

    pub fn close(
        session_attributes: Option<SessionAttributes>,
        fulfillment_state: FulfillmentState,
        message: Message,
    ) -> Self {
        Self {
            session_attributes,
            dialog_action: DialogAction::Close {
                fulfillment_state,
                message,
            },
        }
    }
}

impl fmt::Display for InvocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvocationSource::DialogCodeHook => "DialogCodeHook",
            InvocationSource::FulfillmentCodeHook => "FulfillmentCodeHook",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_parses_full_event() {
        let event = json!({
            "messageVersion": "1.0",
            "invocationSource": "DialogCodeHook",
            "userId": "user-1",
            "outputDialogMode": "Text",
            "inputTranscript": "I am 34",
            "bot": { "name": "RoboAdvisor", "alias": "$LATEST", "version": "$LATEST" },
            "currentIntent": {
                "name": "recommendPortfolio",
                "slots": { "firstName": "Ana", "age": "34", "investmentAmount": null, "riskLevel": null },
                "slotDetails": {},
                "confirmationStatus": "None"
            },
            "sessionAttributes": { "turn": "3" },
            "requestAttributes": null
        });

        let request: DialogRequest = serde_json::from_value(event).unwrap();
        assert_eq!(request.invocation_source, InvocationSource::DialogCodeHook);
        assert_eq!(request.intent_name(), "recommendPortfolio");
        assert_eq!(request.slot("age"), Some("34"));
        assert_eq!(request.slot("investmentAmount"), None);
        assert_eq!(request.slot("missing"), None);
        assert_eq!(
            request.session_attributes.unwrap().get("turn"),
            Some(&json!("3"))
        );
    }

    #[test]
    fn test_request_parses_minimal_event() {
        let event = json!({
            "invocationSource": "FulfillmentCodeHook",
            "currentIntent": { "name": "recommendPortfolio" }
        });

        let request: DialogRequest = serde_json::from_value(event).unwrap();
        assert!(request.current_intent.slots.is_empty());
        assert!(request.session_attributes.is_none());
        assert_eq!(
            request.current_intent.confirmation_status,
            ConfirmationStatus::None
        );
    }

    #[test]
    fn test_response_wire_names() {
        let mut slots = Slots::new();
        slots.insert("age".to_string(), None);

        let elicit = DialogResponse::elicit_slot(
            None,
            "recommendPortfolio",
            slots,
            "age",
            Message::plain_text("again please"),
        );
        assert_eq!(
            serde_json::to_value(&elicit).unwrap(),
            json!({
                "sessionAttributes": null,
                "dialogAction": {
                    "type": "ElicitSlot",
                    "intentName": "recommendPortfolio",
                    "slots": { "age": null },
                    "slotToElicit": "age",
                    "message": { "contentType": "PlainText", "content": "again please" }
                }
            })
        );

        let close = DialogResponse::close(
            Some(SessionAttributes::new()),
            FulfillmentState::Fulfilled,
            Message::plain_text("done"),
        );
        assert_eq!(
            serde_json::to_value(&close).unwrap(),
            json!({
                "sessionAttributes": {},
                "dialogAction": {
                    "type": "Close",
                    "fulfillmentState": "Fulfilled",
                    "message": { "contentType": "PlainText", "content": "done" }
                }
            })
        );

        let delegate = DialogResponse::delegate(None, Slots::new());
        assert_eq!(
            serde_json::to_value(&delegate).unwrap()["dialogAction"],
            json!({ "type": "Delegate", "slots": {} })
        );
    }

    #[test]
    fn test_from_json_reports_serialization_error() {
        let err = DialogRequest::from_json("{ not json").unwrap_err();
        assert!(matches!(err, crate::error::DialogError::SerializationError(_)));
    }

    #[test]
    fn test_unknown_invocation_source_is_rejected() {
        let event = json!({
            "invocationSource": "SomethingElse",
            "currentIntent": { "name": "recommendPortfolio" }
        });
        assert!(serde_json::from_value::<DialogRequest>(event).is_err());
    }
}
