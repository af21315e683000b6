//! Explicit cooperative event loop for synchronous callers.

use std::future::Future;

use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::JoinHandle;

use super::{Promise, WaitConfig};
use crate::{Error, Result};

/// A single-threaded execution context.
///
/// Tasks spawned on the loop only make progress while some thread is inside
/// [`block_on`](Self::block_on), [`wait`](Self::wait) or
/// [`pump`](Self::pump). Several loops can coexist; nothing here is global.
#[derive(Debug)]
pub struct EventLoop {
    runtime: Runtime,
}

impl EventLoop {
    /// Creates a loop with I/O and timers enabled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the runtime cannot be built.
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self { runtime })
    }

    /// Spawns a task onto the loop.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.runtime.spawn(future)
    }

    /// Drives the loop until `future` completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] when called from a thread that is
    /// already running an event loop. Blocking there would stall every task
    /// of that loop, including whichever one would resolve the awaited
    /// promise.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output> {
        if Handle::try_current().is_ok() {
            return Err(Error::InvalidState(
                "cannot block on an event loop from inside a running one".to_string(),
            ));
        }
        Ok(self.runtime.block_on(future))
    }

    /// Runs one round of ready tasks and returns.
    ///
    /// # Errors
    ///
    /// Same as [`block_on`](Self::block_on).
    pub fn pump(&self) -> Result<()> {
        self.block_on(tokio::task::yield_now())
    }

    /// Blocks until `promise` resolves, then takes its value.
    ///
    /// An already resolved promise is returned without touching the loop.
    ///
    /// # Errors
    ///
    /// Everything [`Promise::wait_with`] returns, plus the reentrancy error
    /// of [`block_on`](Self::block_on).
    pub fn wait<T>(&self, promise: &Promise<T>, config: &WaitConfig) -> Result<T> {
        if let Some(value) = promise.try_take() {
            return Ok(value);
        }
        self.block_on(promise.wait_with(config))?
    }
}
