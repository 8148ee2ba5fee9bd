use std::fmt::Display;
use std::future::Future;

/// Run a side effect whose failure must not fail the surrounding operation.
///
/// Errors are logged at `warn` with `effect` as context and swallowed.
pub async fn best_effort<T, E, F>(effect: &str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(effect, error = %e, "Non-critical step failed");
            None
        }
    }
}
