//! Wait configuration.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// How long, and under what conditions, to wait for a promise.
///
/// The default waits indefinitely, never gives up and logs nothing.
///
/// # Example
///
/// ```ignore
/// let config = WaitConfig::new()
///     .timeout(Duration::from_secs(30))
///     .warn_after(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Default)]
pub struct WaitConfig {
    /// Give up with [`Error::Timeout`](crate::Error::Timeout) after this long.
    pub timeout: Option<Duration>,

    /// Log a warning once if the promise is still unresolved after this long.
    /// Waiting continues.
    pub warn_after: Option<Duration>,

    /// Give up with [`Error::Cancelled`](crate::Error::Cancelled) when this
    /// token is cancelled.
    pub cancel: Option<CancellationToken>,
}

impl WaitConfig {
    /// Creates a wait configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the liveness warning threshold.
    #[must_use]
    pub const fn warn_after(mut self, threshold: Duration) -> Self {
        self.warn_after = Some(threshold);
        self
    }

    /// Makes the wait cancellable through `token`.
    #[must_use]
    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
