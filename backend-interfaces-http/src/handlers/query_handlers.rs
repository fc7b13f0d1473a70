use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use backend_application::queries::event_queries;
use backend_application::AppState;
use backend_domain::{DeathRecord, KillRecord};

use crate::error::HttpError;
use crate::middleware::authenticate;

pub async fn list_kills(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<KillRecord>>, HttpError> {
    authenticate(&state, &headers).await?;
    let kills = event_queries::list_kills(&state).await?;
    Ok(Json(kills))
}

pub async fn list_deaths(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<DeathRecord>>, HttpError> {
    authenticate(&state, &headers).await?;
    let deaths = event_queries::list_deaths(&state).await?;
    Ok(Json(deaths))
}
