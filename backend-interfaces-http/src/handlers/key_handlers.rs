use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use backend_application::commands::key_commands;
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authenticate;

#[derive(Serialize)]
pub struct KeyIssued {
    key: String,
}

#[derive(Serialize)]
pub struct KeyStatus {
    status: &'static str,
}

pub async fn create_key(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<KeyIssued>), HttpError> {
    let discord_id = headers
        .get("X-Discord-ID")
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| HttpError::BadRequest("missing X-Discord-ID header".to_string()))?;
    let key = key_commands::issue_key(&state, discord_id).await?;
    Ok((StatusCode::CREATED, Json(KeyIssued { key })))
}

/// 200 iff the presented bearer token was ever issued.
pub async fn validate_key(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<KeyStatus>, HttpError> {
    authenticate(&state, &headers).await?;
    Ok(Json(KeyStatus { status: "ok" }))
}
