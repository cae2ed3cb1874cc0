//! Timers bound to the lifetime of a view.
//!
//! DESIGN
//! ======
//! Each timer is a spawned task that sleeps and then posts an [`Expired`]
//! back to the owning event loop over an unbounded channel. The registry
//! keeps every task handle; aborting the handle is the cancellation token.
//! Keyed timers replace their predecessor, which is how debounce and
//! reschedule work.
//!
//! Aborting a task cannot recall an event it has already posted, so keyed
//! timers carry a sequence number. The loop hands every received event to
//! [`TimerSet::accept`], which drops events whose key has since been
//! rescheduled or cancelled.
//!
//! TRADE-OFFS
//! ==========
//! A timer that fires after its view is gone finds the channel closed and its
//! event is dropped silently. Teardown also aborts everything still pending,
//! so in practice the send never happens.

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A timer's event as posted to the owning loop.
#[derive(Debug)]
pub struct Expired<K, E> {
    stamp: Option<(K, u64)>,
    event: E,
}

struct KeyedTimer {
    seq: u64,
    handle: JoinHandle<()>,
}

pub struct TimerSet<K, E> {
    tx: mpsc::UnboundedSender<Expired<K, E>>,
    keyed: HashMap<K, KeyedTimer>,
    detached: Vec<JoinHandle<()>>,
    next_seq: u64,
}

impl<K, E> TimerSet<K, E>
where
    K: Eq + Hash + Copy + Debug + Send + 'static,
    E: Send + 'static,
{
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<Expired<K, E>>) -> Self {
        Self { tx, keyed: HashMap::new(), detached: Vec::new(), next_seq: 0 }
    }

    /// Post `event` after `delay`. Fire-and-forget until teardown.
    pub fn schedule(&mut self, delay: Duration, event: E) {
        self.detached.retain(|handle| !handle.is_finished());
        let handle = self.spawn_after(delay, None, async move { event });
        self.detached.push(handle);
    }

    /// Post `event` after `delay`, cancelling any timer pending under `key`.
    pub fn schedule_keyed(&mut self, key: K, delay: Duration, event: E) {
        self.spawn_keyed(key, delay, async move { event });
    }

    /// Run `work` after `delay` and post its output, replacing any task
    /// pending under `key`.
    pub fn spawn_keyed<F>(&mut self, key: K, delay: Duration, work: F)
    where
        F: Future<Output = E> + Send + 'static,
    {
        if let Some(previous) = self.keyed.remove(&key) {
            debug!(?key, "timer rescheduled");
            previous.handle.abort();
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        let handle = self.spawn_after(delay, Some((key, seq)), work);
        self.keyed.insert(key, KeyedTimer { seq, handle });
    }

    /// Unwrap an event received from the channel.
    ///
    /// Returns `None` for a keyed event that is no longer current: its key
    /// was rescheduled or cancelled after the event was posted. Accepting a
    /// current keyed event clears the key.
    pub fn accept(&mut self, expired: Expired<K, E>) -> Option<E> {
        let Some((key, seq)) = expired.stamp else {
            return Some(expired.event);
        };
        match self.keyed.get(&key) {
            Some(current) if current.seq == seq => {
                self.keyed.remove(&key);
                Some(expired.event)
            }
            _ => {
                debug!(?key, seq, "stale timer event dropped");
                None
            }
        }
    }

    /// Cancel the timer pending under `key`. Returns whether one was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        self.keyed.remove(&key).is_some_and(|timer| {
            timer.handle.abort();
            true
        })
    }

    /// Whether a timer under `key` has not yet been accepted by the loop.
    #[must_use]
    pub fn is_pending(&self, key: K) -> bool {
        self.keyed.contains_key(&key)
    }

    /// Number of timers whose events have not been delivered yet.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.keyed.len() + self.detached.iter().filter(|handle| !handle.is_finished()).count()
    }

    /// Abort every pending timer. Returns how many were still pending.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending();
        for (_, timer) in self.keyed.drain() {
            timer.handle.abort();
        }
        for handle in self.detached.drain(..) {
            handle.abort();
        }
        cancelled
    }

    fn spawn_after<F>(&self, delay: Duration, stamp: Option<(K, u64)>, work: F) -> JoinHandle<()>
    where
        F: Future<Output = E> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let event = work.await;
            // Receiver gone means the view was torn down.
            let _ = tx.send(Expired { stamp, event });
        })
    }
}

impl<K, E> Drop for TimerSet<K, E> {
    fn drop(&mut self) {
        for (_, timer) in self.keyed.drain() {
            timer.handle.abort();
        }
        for handle in self.detached.drain(..) {
            handle.abort();
        }
    }
}

#[cfg(test)]
#[path = "timers_test.rs"]
mod tests;
