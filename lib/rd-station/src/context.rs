//! Per-call execution context: deadline and cooperative cancellation.
//!
//! The request pipeline races every call against its [`CallContext`]. When
//! the deadline passes or the [`Cancellation`] fires, the in-flight request
//! is dropped (releasing its connection) and the call fails with a
//! transport error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::Instant;

/// Shared cancellation token.
///
/// Clones observe the same state, so one handle can be given to the call
/// and another kept by whoever decides to abort it.
#[derive(Clone, Debug, Default)]
pub struct Cancellation {
    inner: Arc<CancellationState>,
}

#[derive(Debug, Default)]
struct CancellationState {
    flag: AtomicBool,
    notify: Notify,
}

impl Cancellation {
    /// Create a token in the "not cancelled" state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::Acquire)
    }

    /// Cancel the token, waking every pending [`Cancellation::cancelled`].
    ///
    /// Returns `true` only for the call that actually cancelled it.
    pub fn cancel(&self) -> bool {
        let first = self
            .inner
            .flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if first {
            self.inner.notify.notify_waiters();
        }
        first
    }

    /// Resolves once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag: `notify_waiters` wakes every
            // `Notified` created before it, so no wake-up is lost in between.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Why a call was interrupted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// The cancellation token fired.
    Cancelled,
    /// The deadline passed.
    DeadlineExceeded,
}

impl std::fmt::Display for Interrupt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "request cancelled"),
            Self::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

impl std::error::Error for Interrupt {}

/// Context carried by every call.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use rd_station::{CallContext, Cancellation};
///
/// let cancel = Cancellation::new();
/// let ctx = CallContext::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_cancellation(cancel.clone());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CallContext {
    cancellation: Cancellation,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context with no deadline and a fresh cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deadline `timeout` from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Set an absolute deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Use the given cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// The cancellation token.
    #[must_use]
    pub fn cancellation(&self) -> &Cancellation {
        &self.cancellation
    }

    /// The deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Resolves when the call must stop, with the reason.
    ///
    /// Never resolves for a context without deadline that is not cancelled.
    pub async fn interrupted(&self) -> Interrupt {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            () = self.cancellation.cancelled() => Interrupt::Cancelled,
            () = deadline => Interrupt::DeadlineExceeded,
        }
    }

    /// Run `future` unless the context is interrupted first.
    ///
    /// An already cancelled context does not poll `future` at all.
    pub async fn run<F: Future>(&self, future: F) -> Result<F::Output, Interrupt> {
        tokio::select! {
            biased;
            interrupt = self.interrupted() => Err(interrupt),
            output = future => Ok(output),
        }
    }
}
