//! Intent handler trait and dispatcher
//!
//! Handlers are synchronous and side-effect-free.
//! The dispatcher routes a request to the handler registered for its intent.

use crate::dialog::RecommendPortfolioHandler;
use crate::error::DialogError;
use crate::models::{DialogRequest, DialogResponse};
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Trait for a single intent's dialog logic
pub trait IntentHandler: Send + Sync {
    /// Intent name as configured on the bot
    fn intent_name(&self) -> &'static str;

    fn handle(&self, request: DialogRequest) -> Result<DialogResponse>;
}

/// Intent name → handler
pub struct Dispatcher {
    handlers: HashMap<String, Arc<dyn IntentHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) {
        self.handlers
            .insert(handler.intent_name().to_string(), handler);
    }

    pub fn get(&self, intent_name: &str) -> Option<Arc<dyn IntentHandler>> {
        self.handlers.get(intent_name).cloned()
    }

    pub fn list(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Route to the intent's handler. Unknown intents fail without a response.
    pub fn dispatch(&self, request: DialogRequest) -> Result<DialogResponse> {
        let intent_name = request.intent_name().to_string();

        let Some(handler) = self.get(&intent_name) else {
            warn!(intent = %intent_name, "No handler registered for intent");
            return Err(DialogError::UnsupportedIntent(intent_name));
        };

        info!(
            intent = %intent_name,
            source = %request.invocation_source,
            user_id = request.user_id.as_deref().unwrap_or("-"),
            "Dispatching intent"
        );

        handler.handle(request)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatcher with every intent this bot supports
pub fn create_default_dispatcher() -> Dispatcher {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(Arc::new(RecommendPortfolioHandler::new()));
    dispatcher
}

/// Dispatch with the default handlers
pub fn dispatch(request: DialogRequest) -> Result<DialogResponse> {
    create_default_dispatcher().dispatch(request)
}
