//! Lens selector endpoint
//!
//! Parse failures (undecodable reply, wrong shape, bad ranks) are answered with
//! 200 and an error marker carrying the raw model text. Callers must check for
//! the `error` key rather than rely on the status code.

use super::ServerAppState;
use crate::error::LensError;
use crate::models::LensSelectorRequest;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const PARSE_ERROR_MARKER: &str = "Could not parse JSON from model";

/// Body returned with 200 when the model reply could not be used
#[derive(Debug, Serialize)]
pub struct RawOutputResponse {
    pub raw_output: String,
    pub error: &'static str,
    pub detail: String,
}

/// Body returned with a non-2xx status
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

/// Outcome of one request
pub enum LensResponse {
    /// The validated array, passed through as the model sent it
    Ranked(Value),
    Unparsed(RawOutputResponse),
    Failed(StatusCode, ErrorResponse),
}

impl IntoResponse for LensResponse {
    fn into_response(self) -> Response {
        match self {
            LensResponse::Ranked(results) => (StatusCode::OK, Json(results)).into_response(),
            LensResponse::Unparsed(body) => (StatusCode::OK, Json(body)).into_response(),
            LensResponse::Failed(status, body) => (status, Json(body)).into_response(),
        }
    }
}

impl LensResponse {
    fn failed(status: StatusCode, err: &LensError) -> Self {
        let field = match err {
            LensError::Input(input) => Some(input.field()),
            _ => None,
        };
        LensResponse::Failed(
            status,
            ErrorResponse {
                error: err.to_string(),
                field,
            },
        )
    }
}

/// POST /api/ai/lens-selector
pub async fn lens_selector_handler(
    State(state): State<ServerAppState>,
    Json(req): Json<LensSelectorRequest>,
) -> LensResponse {
    let request_id = Uuid::new_v4();
    let selector = &state.selector;

    log::info!(
        "[{}] Lens selector request for study {} (stage '{}')",
        request_id,
        req.study_id,
        req.stage
    );

    if let Err(e) = req.idea.validate() {
        log::info!("[{}] Rejected: {}", request_id, e);
        return LensResponse::failed(StatusCode::BAD_REQUEST, &LensError::from(e));
    }

    let prompt = match selector.build_prompt(&req.idea, &req.stage) {
        Ok(prompt) => prompt,
        Err(e) => {
            log::error!("[{}] {}", request_id, e);
            return LensResponse::failed(StatusCode::INTERNAL_SERVER_ERROR, &e);
        }
    };

    let output = match selector.invoke_model(&prompt).await {
        Ok(output) => output,
        Err(e) => {
            log::error!("[{}] {}", request_id, e);
            return LensResponse::failed(StatusCode::BAD_GATEWAY, &e);
        }
    };

    match selector.extract_and_validate(&output.text) {
        Ok(reply) => {
            log::info!(
                "[{}] Returning {} ranked lenses",
                request_id,
                reply.assessments.len()
            );
            LensResponse::Ranked(reply.value)
        }
        Err(e) => {
            log::warn!("[{}] Could not use model reply: {}", request_id, e);
            LensResponse::Unparsed(RawOutputResponse {
                raw_output: output.text,
                error: PARSE_ERROR_MARKER,
                detail: e.to_string(),
            })
        }
    }
}
