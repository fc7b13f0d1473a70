use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::warn;

/// Fixed-attempt, fixed-backoff retry budget.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }
}

/// Run `op` until it succeeds or the policy's attempt budget is spent,
/// sleeping for the fixed backoff between attempts. The last error is
/// returned once the budget is exhausted.
pub async fn retry<T, F, Fut>(policy: RetryPolicy, what: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error = None;
    for attempt in 1..=policy.max_attempts {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                warn!(
                    what,
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %err,
                    "attempt failed"
                );
                last_error = Some(err);
            }
        }
        if attempt < policy.max_attempts {
            tokio::time::sleep(policy.backoff).await;
        }
    }
    let err = last_error.unwrap_or_else(|| anyhow!("{} was never attempted", what));
    Err(err.context(format!(
        "{} failed after {} attempts",
        what, policy.max_attempts
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn succeeds_once_the_store_comes_up() {
        let attempts = AtomicU32::new(0);
        let result = retry(quick_policy(10), "schema init", || {
            let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    Err(anyhow!("store not ready"))
                } else {
                    Ok(n)
                }
            }
        })
        .await
        .expect("third attempt succeeds");
        assert_eq!(result, 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_the_attempt_budget() {
        let attempts = AtomicU32::new(0);
        let result: Result<()> = retry(quick_policy(3), "schema init", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Err(anyhow!("store not ready")) }
        })
        .await;
        let err = result.expect_err("budget exhausted");
        assert!(err.to_string().contains("after 3 attempts"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn first_success_short_circuits() {
        let attempts = AtomicU32::new(0);
        retry(quick_policy(10), "schema init", || {
            attempts.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        })
        .await
        .expect("immediate success");
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
