//! Exponential backoff for the centers fetch.
//!
//! Only network failures and 5xx answers are retried. A 4xx or a body that
//! does not parse will fail the same way on every attempt, so those are
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::Http(_) => true,
        ClientError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Runs `operation`, retrying transient failures up to `max_retries` extra
/// times with a `backoff_base_secs * 2^attempt` second pause in between.
///
/// With `max_retries = 2` the operation runs at most three times. The last
/// error is returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0u32;

    loop {
        let last_err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !is_retriable(&err) || attempt >= max_retries => return Err(err),
            Err(err) => err,
        };

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
