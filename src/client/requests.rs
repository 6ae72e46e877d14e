//! Superseding task slot for client fetches

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::debug;

/// Holds at most one in-flight task. Starting a new key aborts the previous
/// task; restarting the key that is already running is a no-op.
#[derive(Debug)]
pub struct RequestSlot<K> {
    in_flight: Option<(K, JoinHandle<()>)>,
}

impl<K> Default for RequestSlot<K> {
    fn default() -> Self {
        Self { in_flight: None }
    }
}

impl<K> RequestSlot<K>
where
    K: PartialEq + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start<F>(&mut self, key: K, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some((current, handle)) = self.in_flight.take() {
            if current == key && !handle.is_finished() {
                self.in_flight = Some((current, handle));
                return;
            }
            if !handle.is_finished() {
                debug!(superseded = ?current, by = ?key, "Aborting stale request");
                handle.abort();
            }
        }
        self.in_flight = Some((key, tokio::spawn(task)));
    }

    pub fn cancel(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight
            .as_ref()
            .map_or(false, |(_, handle)| !handle.is_finished())
    }

    pub fn current_key(&self) -> Option<&K> {
        self.in_flight.as_ref().map(|(key, _)| key)
    }
}

impl<K> Drop for RequestSlot<K> {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.in_flight.take() {
            handle.abort();
        }
    }
}
