pub mod review;

use std::fmt::Display;
use std::future::Future;

use tracing::warn;

/// Await a secondary effect whose failure must not fail the primary operation.
/// Errors are logged at `warn` and collapsed to `None`.
pub async fn best_effort<T, E, F>(effect: &str, fut: F) -> Option<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: Display,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(effect, error = %e, "Best-effort operation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_best_effort_swallows_errors() {
        let ok = best_effort("noop", async { Ok::<_, String>(7) }).await;
        assert_eq!(ok, Some(7));

        let failed = best_effort("noop", async { Err::<i32, _>("boom".to_string()) }).await;
        assert_eq!(failed, None);
    }
}
