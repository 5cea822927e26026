//! Timer abstraction for delayed callbacks
//!
//! The globe only ever needs "call me back after this delay" and "forget that
//! callback". Schedulers hand out [`TimerId`]s; whoever owns the scheduler
//! delivers fired ids to [`Globe::on_timer`](crate::globe::Globe::on_timer).

use fxhash::FxHashMap;
use std::time::Duration;

/// Handle to a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Something that can arm and cancel one-shot timers
pub trait Scheduler {
    /// Arm a timer that fires once after `delay`
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timer; unknown or already fired ids are ignored
    fn clear_timeout(&mut self, id: TimerId);
}

impl<S: Scheduler + ?Sized> Scheduler for &mut S {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        (**self).set_timeout(delay)
    }

    fn clear_timeout(&mut self, id: TimerId) {
        (**self).clear_timeout(id)
    }
}

/// Scheduler on a virtual clock that only moves when [`advance`](Self::advance) is called
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: FxHashMap<TimerId, Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward and return the timers that came due, earliest first
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<(Duration, TimerId)> = self
            .pending
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(id, deadline)| (*deadline, *id))
            .collect();
        due.sort();

        for (_, id) in &due {
            self.pending.remove(id);
        }
        due.into_iter().map(|(_, id)| id).collect()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Time until the earliest pending timer fires
    pub fn next_due_in(&self) -> Option<Duration> {
        self.pending
            .values()
            .min()
            .map(|deadline| deadline.saturating_sub(self.now))
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, self.now + delay);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.pending.remove(&id);
    }
}

#[cfg(feature = "tokio-runtime")]
pub mod tokio_impl {
    use super::{Scheduler, TimerId};
    use fxhash::FxHashMap;
    use std::time::Duration;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
    use tokio::task::JoinHandle;

    /// Tokio-based scheduler; must be used from inside a tokio runtime
    pub struct TokioScheduler {
        next_id: u64,
        pending: FxHashMap<TimerId, JoinHandle<()>>,
        tx: UnboundedSender<TimerId>,
        rx: UnboundedReceiver<TimerId>,
    }

    impl TokioScheduler {
        pub fn new() -> Self {
            let (tx, rx) = unbounded_channel();
            Self {
                next_id: 0,
                pending: FxHashMap::default(),
                tx,
                rx,
            }
        }

        /// Wait for the next timer that fired and was not cleared meanwhile
        pub async fn next_fired(&mut self) -> Option<TimerId> {
            loop {
                let id = self.rx.recv().await?;
                if self.pending.remove(&id).is_some() {
                    return Some(id);
                }
                log::trace!("dropping cleared timer {:?}", id);
            }
        }

        pub fn pending_count(&self) -> usize {
            self.pending.len()
        }
    }

    impl Default for TokioScheduler {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Scheduler for TokioScheduler {
        fn set_timeout(&mut self, delay: Duration) -> TimerId {
            let id = TimerId(self.next_id);
            self.next_id += 1;

            let tx = self.tx.clone();
            let handle = tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = tx.send(id);
            });
            self.pending.insert(id, handle);
            id
        }

        fn clear_timeout(&mut self, id: TimerId) {
            if let Some(handle) = self.pending.remove(&id) {
                handle.abort();
            }
        }
    }

    impl Drop for TokioScheduler {
        fn drop(&mut self) {
            for (_, handle) in self.pending.drain() {
                handle.abort();
            }
        }
    }
}
