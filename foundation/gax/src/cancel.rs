use std::future::Future;

use tokio_util::sync::CancellationToken as InternalCancellationToken;

use crate::error::Error;

/// Cancellation handle passed to client calls.
///
/// Thin wrapper of `tokio_util::sync::CancellationToken` so that callers do not
/// need to depend on a matching `tokio-util` version.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    inner: InternalCancellationToken,
}

impl CancellationToken {
    /// Creates a new CancellationToken in the non-cancelled state.
    pub fn new() -> Self {
        Self {
            inner: InternalCancellationToken::new(),
        }
    }

    /// Creates a token which is cancelled together with this one.
    pub fn child_token(&self) -> CancellationToken {
        Self {
            inner: self.inner.child_token(),
        }
    }

    /// Cancels this token and every child token derived from it.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// Completes when cancellation is requested.
    pub async fn cancelled(&self) {
        self.inner.cancelled().await
    }
}

/// Runs `action` until it completes or `cancel` fires, whichever comes first.
pub async fn with_cancel<T>(
    cancel: Option<&CancellationToken>,
    action: impl Future<Output = Result<T, Error>>,
) -> Result<T, Error> {
    match cancel {
        Some(cancel) => {
            tokio::select! {
                _ = cancel.cancelled() => Err(Error::Cancelled),
                v = action => v
            }
        }
        None => action.await,
    }
}
