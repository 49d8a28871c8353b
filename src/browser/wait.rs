use crate::E2eError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Interval between checks when the caller has no preference
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Polls `check` until it yields a value or `timeout` elapses
///
/// The check runs at least once. An `Err` from the check aborts the wait
/// immediately; `Ok(None)` means "not yet".
///
/// # Arguments
///
/// * `what` - Description used in the timeout error
/// * `timeout` - Overall deadline
/// * `interval` - Pause between checks
/// * `check` - Condition check
///
/// # Returns
///
/// * `Ok(T)` - The first value produced by the check
/// * `Err(E2eError::Timeout)` - The deadline passed first
pub async fn poll_until<T, F, Fut>(
    what: &str,
    timeout: Duration,
    interval: Duration,
    mut check: F,
) -> Result<T, E2eError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<T>, E2eError>>,
{
    let started = Instant::now();

    loop {
        if let Some(value) = check().await? {
            return Ok(value);
        }

        let elapsed = started.elapsed();
        if elapsed >= timeout {
            return Err(E2eError::Timeout {
                what: what.to_string(),
                waited_ms: elapsed.as_millis() as u64,
            });
        }

        tokio::time::sleep(interval.min(timeout - elapsed)).await;
    }
}
