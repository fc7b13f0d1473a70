use axum::http::HeaderMap;

use backend_application::AppState;
use backend_domain::ApiKey;

use crate::error::HttpError;

/// Validate the request's bearer token against the key store and hand
/// back the matching record for downstream use. One store read per call,
/// no caching, no expiry.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<ApiKey, HttpError> {
    let Some(token) = extract_bearer(headers) else {
        return Err(HttpError::Unauthorized);
    };
    let key = state
        .key_repo
        .find_key(&token)
        .await
        .map_err(|err| HttpError::Internal(err.to_string()))?;
    key.ok_or(HttpError::Unauthorized)
}

/// Pull the token out of `Authorization: <scheme> <token>`. The scheme is
/// matched case-insensitively; a missing or empty token counts as absent.
fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
