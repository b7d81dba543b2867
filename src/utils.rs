//! Utility functions for common operations.

use crate::error::TranslationError;
use std::future::Future;

/// Checks if an HTTP response is successful, and if not, returns a detailed error.
///
/// This helper extracts both the status code and response body for better error messages.
pub async fn check_response_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, TranslationError> {
    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(TranslationError::ApiError(format!(
            "HTTP {}: {}",
            status, text
        )));
    }
    Ok(response)
}

/// Sends a request, and while the backend rejects it, refreshes credentials
/// and sends it again.
///
/// Only [`TranslationError::Backend`] triggers a resend; transport and parse
/// errors are returned immediately. After `max_retry` resends the last
/// backend error is returned. A failed refresh aborts the loop.
pub async fn retry_with_refresh<T, S, SFut, R, RFut>(
    max_retry: u32,
    mut send: S,
    mut refresh: R,
) -> Result<T, TranslationError>
where
    S: FnMut(u32) -> SFut,
    SFut: Future<Output = Result<T, TranslationError>>,
    R: FnMut() -> RFut,
    RFut: Future<Output = Result<(), TranslationError>>,
{
    let mut retries = 0;
    loop {
        match send(retries).await {
            Err(TranslationError::Backend { .. }) if retries < max_retry => {
                retries += 1;
                refresh().await?;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn backend_error() -> TranslationError {
        TranslationError::Backend {
            errno: 997,
            message: "token expired".to_string(),
        }
    }

    #[tokio::test]
    async fn test_success_without_retry() {
        let refreshes = AtomicU32::new(0);
        let refreshes = &refreshes;

        let result = retry_with_refresh(
            3,
            |_| async { Ok::<_, TranslationError>("done") },
            move || async move {
                refreshes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recovers_after_refresh() {
        let refreshes = AtomicU32::new(0);
        let refreshes = &refreshes;

        let result = retry_with_refresh(
            3,
            |attempt| async move {
                if attempt < 2 {
                    Err(backend_error())
                } else {
                    Ok(attempt)
                }
            },
            move || async move {
                refreshes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(refreshes.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retry() {
        let sends = AtomicU32::new(0);
        let sends = &sends;

        let result: Result<(), _> = retry_with_refresh(
            3,
            move |_| async move {
                sends.fetch_add(1, Ordering::SeqCst);
                Err(backend_error())
            },
            || async { Ok(()) },
        )
        .await;

        assert!(matches!(
            result,
            Err(TranslationError::Backend { errno: 997, .. })
        ));
        // The first send plus three resends.
        assert_eq!(sends.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_other_errors_are_not_retried() {
        let sends = AtomicU32::new(0);
        let sends = &sends;

        let result: Result<(), _> = retry_with_refresh(
            3,
            move |_| async move {
                sends.fetch_add(1, Ordering::SeqCst);
                Err(TranslationError::ParseError("bad json".to_string()))
            },
            || async { Ok(()) },
        )
        .await;

        assert!(matches!(result, Err(TranslationError::ParseError(_))));
        assert_eq!(sends.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_aborts() {
        let result: Result<(), _> = retry_with_refresh(
            3,
            |_| async { Err(backend_error()) },
            || async { Err(TranslationError::ParseError("no token".to_string())) },
        )
        .await;

        assert!(matches!(result, Err(TranslationError::ParseError(_))));
    }
}
