//! Single-resolution promises.
//!
//! A [`Promise`] correlates an outstanding command with the response that
//! eventually completes it. The connection layer resolves it exactly once;
//! any number of handles may observe it.
//!
//! ## Continuations
//!
//! Callbacks registered through [`Promise::on_resolved`] and
//! [`Promise::map`] run synchronously inside [`Promise::resolve`], before it
//! returns, in registration order. A mapped promise is therefore already
//! resolved by the time the source's `resolve` call returns. Callbacks run
//! outside the promise's lock, so they may query the promise or register
//! further callbacks on it; those are drained iteratively rather than by
//! recursion.
//!
//! ## Waiting
//!
//! [`Promise::wait`] suspends the calling task until the value arrives and
//! takes it. [`Promise::wait_with`] adds a timeout, cancellation and a
//! liveness warning. Synchronous callers go through
//! [`EventLoop::wait`](crate::EventLoop::wait).
//!
//! # Example
//!
//! ```ignore
//! let source: Promise<u32> = Promise::new();
//! let doubled = source.map(|x| x * 2);
//! source.resolve(21).unwrap();
//! assert_eq!(doubled.inspect(|x| *x), Some(42));
//! ```

mod config;
mod event_loop;

pub use config::WaitConfig;
pub use event_loop::EventLoop;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;

use crate::{Error, Result};

type Callback<T> = Box<dyn FnOnce(&mut T) + Send>;

enum Slot<T> {
    Empty,
    /// Value owned by the thread running callbacks.
    Resolving,
    Resolved(T),
    /// Value moved out by a waiter.
    Taken,
}

struct State<T> {
    slot: Slot<T>,
    callbacks: Vec<Callback<T>>,
}

struct Inner<T> {
    state: Mutex<State<T>>,
    notify: Notify,
}

/// A value that becomes available once.
///
/// Cloning yields another handle to the same promise.
pub struct Promise<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Promise<T> {
    /// Creates an unresolved promise.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    slot: Slot::Empty,
                    callbacks: Vec::new(),
                }),
                notify: Notify::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolves the promise and runs registered callbacks before returning.
    ///
    /// Only the first call takes effect.
    ///
    /// # Errors
    ///
    /// If the promise was already resolved, nothing changes and the rejected
    /// value is handed back.
    pub fn resolve(&self, value: T) -> std::result::Result<(), T> {
        let callbacks = {
            let mut state = self.lock();
            if !matches!(state.slot, Slot::Empty) {
                tracing::warn!("rejecting second resolution of a promise");
                return Err(value);
            }
            state.slot = Slot::Resolving;
            std::mem::take(&mut state.callbacks)
        };
        self.settle(value, callbacks);
        Ok(())
    }

    /// Runs `pending` and anything they register, then publishes `value`.
    fn settle(&self, mut value: T, mut pending: Vec<Callback<T>>) {
        loop {
            for callback in pending {
                callback(&mut value);
            }
            let mut state = self.lock();
            if state.callbacks.is_empty() {
                state.slot = Slot::Resolved(value);
                break;
            }
            pending = std::mem::take(&mut state.callbacks);
            drop(state);
        }
        self.inner.notify.notify_waiters();
    }

    /// Returns true once [`resolve`](Self::resolve) has been called,
    /// including while its callbacks are still running and after the value
    /// was taken.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self.lock().slot, Slot::Empty)
    }

    /// Returns true if a waiter has taken the value.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        matches!(self.lock().slot, Slot::Taken)
    }

    /// Registers a callback to run with the resolved value.
    ///
    /// If the promise is already resolved the callback runs immediately. If
    /// the value has already been taken it can never run; a warning is
    /// logged and the callback is dropped.
    pub fn on_resolved<F>(&self, callback: F)
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        let mut state = self.lock();
        let value = match std::mem::replace(&mut state.slot, Slot::Resolving) {
            Slot::Resolved(value) => value,
            Slot::Taken => {
                state.slot = Slot::Taken;
                drop(state);
                tracing::warn!("callback registered on a consumed promise will never run");
                return;
            }
            other => {
                state.slot = other;
                state.callbacks.push(Box::new(callback));
                return;
            }
        };
        drop(state);
        self.settle(value, vec![Box::new(callback)]);
    }

    /// Returns a promise resolved with `transform(value)` as soon as this one
    /// resolves.
    #[must_use]
    pub fn map<U, F>(&self, transform: F) -> Promise<U>
    where
        U: Send + 'static,
        F: FnOnce(&T) -> U + Send + 'static,
    {
        let mapped = Promise::new();
        let target = mapped.clone();
        self.on_resolved(move |value| {
            // `target` is private to this closure, so it cannot already be resolved.
            let _ = target.resolve(transform(&*value));
        });
        mapped
    }

    /// Reads the resolved value without consuming it.
    ///
    /// Returns `None` if the value is not available. `f` runs under the
    /// promise's lock and must not call back into this promise.
    pub fn inspect<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        match &self.lock().slot {
            Slot::Resolved(value) => Some(f(value)),
            _ => None,
        }
    }

    /// Takes the value if it is available.
    #[must_use]
    pub fn try_take(&self) -> Option<T> {
        let mut state = self.lock();
        match std::mem::replace(&mut state.slot, Slot::Taken) {
            Slot::Resolved(value) => Some(value),
            other => {
                state.slot = other;
                None
            }
        }
    }

    fn poll_take(&self) -> Option<Result<T>> {
        let mut state = self.lock();
        match std::mem::replace(&mut state.slot, Slot::Taken) {
            Slot::Resolved(value) => Some(Ok(value)),
            Slot::Taken => Some(Err(Error::AlreadyConsumed)),
            other => {
                state.slot = other;
                None
            }
        }
    }

    /// Waits for the value and takes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyConsumed`] if another waiter took the value.
    pub async fn wait(&self) -> Result<T> {
        loop {
            // Registered before checking, so a resolve in between still wakes us.
            let notified = self.inner.notify.notified();
            if let Some(result) = self.poll_take() {
                return result;
            }
            notified.await;
        }
    }

    /// Waits for the value under the limits in `config`.
    ///
    /// A timeout or cancellation leaves the promise untouched; it can still
    /// be resolved and waited on later.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timeout`], [`Error::Cancelled`] or
    /// [`Error::AlreadyConsumed`].
    pub async fn wait_with(&self, config: &WaitConfig) -> Result<T> {
        let bounded = async {
            let watched = self.wait_watched(config.warn_after);
            match config.timeout {
                Some(limit) => tokio::time::timeout(limit, watched)
                    .await
                    .unwrap_or_else(|_| {
                        tracing::debug!(?limit, "gave up waiting for promise");
                        Err(Error::Timeout(limit))
                    }),
                None => watched.await,
            }
        };

        match &config.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    result = bounded => result,
                    () = token.cancelled() => Err(Error::Cancelled),
                }
            }
            None => bounded.await,
        }
    }

    async fn wait_watched(&self, warn_after: Option<Duration>) -> Result<T> {
        let Some(threshold) = warn_after else {
            return self.wait().await;
        };

        let wait = self.wait();
        tokio::pin!(wait);
        tokio::select! {
            biased;
            result = &mut wait => return result,
            () = tokio::time::sleep(threshold) => {
                tracing::warn!(?threshold, "promise still unresolved, continuing to wait");
            }
        }
        wait.await
    }
}

impl<T> Default for Promise<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.lock().slot {
            Slot::Empty => "empty",
            Slot::Resolving => "resolving",
            Slot::Resolved(_) => "resolved",
            Slot::Taken => "taken",
        };
        f.debug_struct("Promise").field("state", &state).finish()
    }
}
