//! Screen-bound requests
//!
//! egui redraws every frame and cannot await, so a screen hands its request
//! future to the tokio runtime and polls the result from `update`. Each
//! request carries a [`CancelToken`]; dropping the owning screen cancels the
//! request, and a cancelled request never delivers a result.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::debug;

use crate::shared::error::ClientError;

#[derive(Debug, Default)]
struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Shared cancellation flag; clones observe the same state
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::SeqCst) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once `cancel` has been called
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel is not missed
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// One in-flight request owned by a screen
pub struct Pending<T> {
    rx: Receiver<Result<T, ClientError>>,
    cancel: CancelToken,
}

impl<T: Send + 'static> Pending<T> {
    pub fn spawn<F>(runtime: &Handle, request: F) -> Self
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (tx, rx) = channel();
        let cancel = CancelToken::new();
        let token = cancel.clone();

        runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("screen request cancelled");
                }
                result = request => {
                    if !token.is_cancelled() {
                        let _ = tx.send(result);
                    }
                }
            }
        });

        Self { rx, cancel }
    }
}

impl<T> Pending<T> {
    /// Result if it has arrived. A request that died without answering
    /// reports a transport error.
    pub fn poll(&self) -> Option<Result<T, ClientError>> {
        if self.cancel.is_cancelled() {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(Err(ClientError::transport("request ended without a response")))
            }
        }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn token(&self) -> CancelToken {
        self.cancel.clone()
    }
}

impl<T> Drop for Pending<T> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// At most one outstanding request of a kind; doubles as the busy flag
pub struct RequestSlot<T> {
    pending: Option<Pending<T>>,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T: Send + 'static> RequestSlot<T> {
    /// Start `request` unless one is already outstanding. Returns whether it
    /// was started.
    pub fn start<F>(&mut self, runtime: &Handle, request: F) -> bool
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        if self.is_busy() {
            return false;
        }
        self.pending = Some(Pending::spawn(runtime, request));
        true
    }
}

impl<T> RequestSlot<T> {
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the result once it arrives; the slot is free again afterwards
    pub fn poll(&mut self) -> Option<Result<T, ClientError>> {
        let result = self.pending.as_ref()?.poll()?;
        self.pending = None;
        Some(result)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
