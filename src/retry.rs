//! Bounded sequential retry for effectful attempts.

use std::future::Future;

/// Runs `attempt_fn` up to `attempts` times, sequentially.
///
/// Attempt numbering starts at 1. Success on any attempt terminates the
/// loop immediately; a failure on the final attempt is propagated to the
/// caller verbatim. There is no delay between attempts — a collaborator
/// that wants backoff adds it inside `attempt_fn`. `attempts` of 1 means
/// exactly one attempt, no retry (0 is clamped to 1).
pub async fn retry<T, E, F, Fut>(attempts: u32, mut attempt_fn: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match attempt_fn(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) if attempt == attempts => return Err(error),
            Err(_) => attempt += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[tokio::test]
    async fn immediate_success_makes_a_single_attempt() {
        let calls = Cell::new(0);
        let result: Result<u32, String> = retry(5, |attempt| {
            calls.set(calls.get() + 1);
            async move { Ok(attempt) }
        })
        .await;

        assert_eq!(result, Ok(1));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn recovers_after_transient_failures() {
        let calls = Cell::new(0);
        let result: Result<u32, String> = retry(5, |attempt| {
            calls.set(calls.get() + 1);
            async move {
                if attempt < 3 {
                    Err(format!("attempt {attempt} failed"))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn exhaustion_propagates_the_last_failure() {
        let calls = Cell::new(0);
        let result: Result<u32, String> = retry(5, |attempt| {
            calls.set(calls.get() + 1);
            async move { Err(format!("attempt {attempt} failed")) }
        })
        .await;

        assert_eq!(result, Err("attempt 5 failed".to_string()));
        assert_eq!(calls.get(), 5);
    }

    #[tokio::test]
    async fn single_attempt_means_no_retry() {
        let calls = Cell::new(0);
        let result: Result<u32, String> = retry(1, |_| {
            calls.set(calls.get() + 1);
            async move { Err("boom".to_string()) }
        })
        .await;

        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(calls.get(), 1);
    }
}
