//! Cancellable debounce timer.
//!
//! A [`Debouncer`] turns a stream of rapidly changing values into a value that is
//! emitted only after the input has been quiet for the configured delay. Each push
//! restarts the timer and only the most recent value is ever emitted.
//!
//! # Design
//!
//! - The pending timer is a tokio task that sleeps, then sends on a channel.
//! - A new push aborts the pending task before spawning the next one.
//! - Every push is numbered; [`Debouncer::settled`] drops anything that is not the
//!   latest number, so a timer that fired just before a newer push is ignored.
//! - Dropping the debouncer aborts the pending task: nothing is emitted after
//!   teardown.

use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Last-write-wins debounce timer.
///
/// Must be used from within a tokio runtime.
///
/// # Examples
///
/// ```
/// use bookshelf::app::Debouncer;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut debouncer = Debouncer::new(Duration::from_millis(10));
/// debouncer.push("d");
/// debouncer.push("do");
/// debouncer.push("dog");
/// assert_eq!(debouncer.settled().await, "dog");
/// # }
/// ```
#[derive(Debug)]
pub struct Debouncer<V> {
    delay: Duration,
    tx: UnboundedSender<(u64, V)>,
    rx: UnboundedReceiver<(u64, V)>,
    seq: u64,
    pending_seq: Option<u64>,
    timer: Option<JoinHandle<()>>,
}

impl<V: Send + 'static> Debouncer<V> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            tx,
            rx,
            seq: 0,
            pending_seq: None,
            timer: None,
        }
    }

    /// Quiet period between the last push and the emission.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new input value and restarts the quiet period.
    pub fn push(&mut self, value: V) {
        self.abort_timer();

        self.seq += 1;
        let seq = self.seq;
        let deadline = tokio::time::Instant::now() + self.delay;
        let tx = self.tx.clone();

        self.pending_seq = Some(seq);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send((seq, value));
        }));
    }

    /// Cancels the pending emission, if any.
    pub fn cancel(&mut self) {
        self.abort_timer();
        self.pending_seq = None;
    }

    /// Whether a pushed value is still waiting to be emitted.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending_seq.is_some()
    }

    /// Waits for the next settled value.
    ///
    /// Never completes while nothing is pending. Cancel-safe: dropping the
    /// future before it resolves loses nothing, so it can sit in a
    /// `tokio::select!` loop.
    pub async fn settled(&mut self) -> V {
        loop {
            let Some((seq, value)) = self.rx.recv().await else {
                return std::future::pending().await;
            };

            if self.pending_seq == Some(seq) {
                self.pending_seq = None;
                self.timer = None;
                return value;
            }

            tracing::trace!(seq = seq, "discarding superseded debounce emission");
        }
    }

    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<V> Drop for Debouncer<V> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
