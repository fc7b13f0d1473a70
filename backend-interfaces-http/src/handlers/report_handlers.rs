use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use backend_application::commands::report_commands;
use backend_application::AppState;
use backend_domain::{DeathReport, KillReport};

use crate::error::HttpError;
use crate::middleware::authenticate;

#[derive(Serialize)]
pub struct KillAck {
    status: &'static str,
}

#[derive(Serialize)]
pub struct DeathAck {
    ok: bool,
}

pub async fn report_kill(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(report): Json<KillReport>,
) -> Result<(StatusCode, Json<KillAck>), HttpError> {
    authenticate(&state, &headers).await?;
    report_commands::report_kill(&state, report).await?;
    Ok((StatusCode::CREATED, Json(KillAck { status: "ok" })))
}

pub async fn report_death(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(report): Json<DeathReport>,
) -> Result<(StatusCode, Json<DeathAck>), HttpError> {
    authenticate(&state, &headers).await?;
    report_commands::report_death(&state, report).await?;
    Ok((StatusCode::CREATED, Json(DeathAck { ok: true })))
}
