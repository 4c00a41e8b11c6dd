//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{Extension, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::domain::OperationContext;
use crate::error::AppError;
use crate::handlers::{
    DecodeBatchCommand, DecodeBatchHandler, DecodeBatchResult, DecodeBoletoCommand,
    DecodeBoletoHandler, DecodeBoletoResult,
};

use super::state::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeRequest {
    pub linha_digitavel: String,
}

pub type DecodeResponse = DecodeBoletoResult;

#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeBatchRequest {
    pub linhas: Vec<String>,
}

pub type DecodeBatchResponse = DecodeBatchResult;

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/boletos/decode", post(decode_boleto))
        .route("/boletos/decode/batch", post(decode_batch))
}

// =========================================================================
// POST /boletos/decode
// =========================================================================

/// Decode one digit line into expense-form values
async fn decode_boleto(
    context: Option<Extension<OperationContext>>,
    Json(request): Json<DecodeRequest>,
) -> Result<Json<DecodeResponse>, AppError> {
    let context = context.map(|Extension(c)| c).unwrap_or_default();
    let handler = DecodeBoletoHandler::new();

    let result = handler.execute(DecodeBoletoCommand::new(request.linha_digitavel), &context)?;

    Ok(Json(result))
}

// =========================================================================
// POST /boletos/decode/batch
// =========================================================================

/// Decode several digit lines; rejected lines are reported per entry
async fn decode_batch(
    State(state): State<AppState>,
    context: Option<Extension<OperationContext>>,
    Json(request): Json<DecodeBatchRequest>,
) -> Result<Json<DecodeBatchResponse>, AppError> {
    let context = context.map(|Extension(c)| c).unwrap_or_default();
    let handler = DecodeBatchHandler::new(state.max_batch_size);

    let result = handler.execute(DecodeBatchCommand::new(request.linhas), &context)?;

    Ok(Json(result))
}
