//! In-process reminder queue drained by the platform shell.
//!
//! # Invariants
//! - Requests are drained in enqueue order.
//! - Queue length never exceeds the configured capacity.

use super::{ReminderRequest, ReminderScheduler, SchedulerError};
use log::debug;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Default number of undelivered reminders kept in memory.
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// Shared FIFO of reminder requests waiting for platform delivery.
///
/// Clones share the same queue.
#[derive(Debug, Clone)]
pub struct ReminderOutbox {
    queue: Arc<Mutex<VecDeque<ReminderRequest>>>,
    capacity: usize,
}

impl Default for ReminderOutbox {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_OUTBOX_CAPACITY)
    }
}

impl ReminderOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            capacity,
        }
    }

    /// Removes and returns every pending request.
    pub fn drain(&self) -> Vec<ReminderRequest> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        let drained = queue.drain(..).collect();
        drained
    }

    pub fn pending_len(&self) -> usize {
        let queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.len()
    }
}

impl ReminderScheduler for ReminderOutbox {
    fn schedule(&self, request: &ReminderRequest) -> Result<(), SchedulerError> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|_| SchedulerError::Unavailable("reminder outbox lock poisoned".into()))?;
        if queue.len() >= self.capacity {
            return Err(SchedulerError::Rejected(format!(
                "outbox full ({} pending)",
                queue.len()
            )));
        }
        queue.push_back(request.clone());
        debug!(
            "event=reminder_enqueue module=reminder status=ok reminder_id={} pending={}",
            request.id,
            queue.len()
        );
        Ok(())
    }
}
