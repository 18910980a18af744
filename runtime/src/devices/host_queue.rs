//! Host submission channel.
//!
//! Jobs are batched on enqueue and drained on [`wait`](SubmitQueue::wait),
//! in submission order, on the draining thread. That keeps the host
//! channel's ordering domain identical to a device-backed one: nothing
//! runs until the channel is drained, and nothing runs out of order.

use parking_lot::Mutex;

use xpu_device::{Job, SubmitQueue};

/// Pending-batch queue for the host device.
#[derive(Default)]
pub struct HostQueue {
    pending: Mutex<Vec<Job>>,
}

impl std::fmt::Debug for HostQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostQueue").field("pending", &self.pending.lock().len()).finish()
    }
}

impl HostQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubmitQueue for HostQueue {
    fn enqueue(&self, job: Job) {
        self.pending.lock().push(job);
    }

    fn wait(&self) -> xpu_device::Result<()> {
        // Take the batch before running it so jobs may enqueue follow-ups
        // without deadlocking on the pending lock.
        let jobs = std::mem::take(&mut *self.pending.lock());
        for job in jobs {
            job();
        }
        Ok(())
    }
}
