use anyhow::Result;
use std::future::Future;
use std::time::Duration;

/// Await `fut`, failing with a descriptive error once `limit` elapses.
pub(crate) async fn run_with_deadline<T>(
    limit: Option<Duration>,
    what: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .unwrap_or_else(|_| Err(anyhow::anyhow!("{what} timed out after {limit:?}"))),
        None => fut.await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_limit() {
        let value = run_with_deadline(Some(Duration::from_secs(5)), "ocr", async { Ok(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_times_out() {
        let err = run_with_deadline(Some(Duration::from_millis(10)), "generation", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await
        .unwrap_err();
        assert!(err.to_string().starts_with("generation timed out"));
    }

    #[tokio::test]
    async fn test_no_limit_passes_errors_through() {
        let err = run_with_deadline::<()>(None, "ocr", async { anyhow::bail!("boom") })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
