//! HTTP surface for the dialog handler
//!
//! The bot platform posts the code-hook event to `/dialog` and gets the
//! dialog response back unchanged.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span};

use crate::config::ServerConfig;
use crate::dispatch::{create_default_dispatcher, Dispatcher};
use crate::models::{DialogRequest, DialogResponse};

/// =============================
/// Error Body
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub request_id: String,
    pub timestamp: String,
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Arc<Dispatcher>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Dialog Endpoint
/// =============================

async fn dialog_handler(
    State(state): State<ApiState>,
    Json(req): Json<DialogRequest>,
) -> Result<Json<DialogResponse>, (StatusCode, Json<ErrorBody>)> {
    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("dialog", %request_id, intent = %req.intent_name());

    let result = span.in_scope(|| {
        if let Some(transcript) = req.input_transcript.as_deref() {
            info!(transcript, "Received code hook");
        }
        state.dispatcher.dispatch(req)
    });

    match result {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!(error = %e, "Dialog dispatch failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                    request_id: request_id.to_string(),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                }),
            ))
        }
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(dispatcher: Arc<Dispatcher>) -> Router {
    let state = ApiState { dispatcher };

    Router::new()
        .route("/health", axum::routing::get(health))
        .route("/dialog", post(dialog_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(config: ServerConfig) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(Arc::new(create_default_dispatcher()));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!("Dialog handler listening on http://0.0.0.0:{}", config.port);

    axum::serve(listener, router).await?;

    Ok(())
}
