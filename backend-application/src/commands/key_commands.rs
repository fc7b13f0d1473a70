use time::OffsetDateTime;
use uuid::Uuid;

use backend_domain::ApiKey;

use crate::{AppError, AppState};

/// Mint a fresh opaque token for the given Discord identity and persist it.
/// Tokens never expire and there is no revocation path.
pub async fn issue_key(state: &AppState, discord_id: &str) -> Result<String, AppError> {
    let discord_id = discord_id.trim();
    if discord_id.is_empty() {
        return Err(AppError::BadRequest(
            "X-Discord-ID must not be empty".to_string(),
        ));
    }

    let token = Uuid::new_v4().to_string();
    let key = ApiKey {
        key: token.clone(),
        discord_id: discord_id.to_string(),
        created_at: OffsetDateTime::now_utc(),
    };
    state.key_repo.insert_key(key).await?;
    state.metrics.record_key_issued();
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_state_with_keys, InMemoryKeyRepo};
    use std::sync::Arc;

    #[tokio::test]
    async fn issued_token_is_persisted_with_its_identity() {
        let keys = Arc::new(InMemoryKeyRepo::default());
        let state = test_state_with_keys(keys.clone());

        let token = issue_key(&state, "12345").await.expect("token issued");
        assert_eq!(token.len(), 36);

        let stored = keys.all();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].key, token);
        assert_eq!(stored[0].discord_id, "12345");
    }

    #[tokio::test]
    async fn issued_tokens_are_unique() {
        let keys = Arc::new(InMemoryKeyRepo::default());
        let state = test_state_with_keys(keys.clone());

        let first = issue_key(&state, "12345").await.expect("token issued");
        let second = issue_key(&state, "12345").await.expect("token issued");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn blank_identity_is_rejected() {
        let keys = Arc::new(InMemoryKeyRepo::default());
        let state = test_state_with_keys(keys.clone());

        let err = issue_key(&state, "   ").await.expect_err("rejected");
        match err {
            AppError::BadRequest(message) => assert!(message.contains("X-Discord-ID")),
            _ => panic!("unexpected error type"),
        }
        assert!(keys.all().is_empty());
    }
}
