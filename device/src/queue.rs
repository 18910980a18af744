//! Execution queues and the per-context queue cache.
//!
//! An [`ExecutionQueue`] is an ordered submission channel bound to exactly
//! one device handle at creation time. Work submitted through it runs on
//! that device in submission order relative to other work on the same
//! channel; nothing is promised across two different devices' queues.
//!
//! # Design
//!
//! The backend-facing [`SubmitQueue`] batches host-visible jobs and drains
//! them, in order, on [`SubmitQueue::wait`]. [`ExecutionQueue`] is a cheap
//! clonable wrapper over the shared channel, so every caller that asks
//! [`QueueCache`] for the same logical device observes the same
//! relative-ordering domain.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use snafu::ResultExt;

use crate::availability::DeviceAvailability;
use crate::backend::ComputeRuntime;
use crate::error::{AcquisitionSnafu, Result, UnavailableDeviceSnafu};
use crate::id::{LogicalDeviceId, MAX_DEVICE_SLOTS};
use crate::registry::DeviceRegistry;

/// A unit of work submitted to a queue.
///
/// Jobs are host-visible closures: backends run them in submission order,
/// after any device-side work the channel ordered before them.
pub type Job = Box<dyn FnOnce() + Send>;

/// Backend submission channel bound to one device.
pub trait SubmitQueue: fmt::Debug + Send + Sync {
    /// Append a job to the channel. Non-blocking; ordering is fixed at
    /// enqueue time.
    fn enqueue(&self, job: Job);

    /// Drain the channel: synchronize any device-side work, then run every
    /// pending job in submission order.
    fn wait(&self) -> Result<()>;
}

/// Ordered submission channel for one logical device.
///
/// Clones share the underlying channel; cloning never creates a new device
/// context or reorders work.
#[derive(Clone)]
pub struct ExecutionQueue {
    device: LogicalDeviceId,
    inner: Arc<dyn SubmitQueue>,
}

impl fmt::Debug for ExecutionQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionQueue").field("device", &self.device).field("inner", &self.inner).finish()
    }
}

impl ExecutionQueue {
    /// Logical device this queue is bound to.
    pub fn device(&self) -> LogicalDeviceId {
        self.device
    }

    /// Submit a job; it runs after everything already on the channel.
    pub fn enqueue(&self, job: Job) {
        self.inner.enqueue(job);
    }

    /// Drain the channel, running pending jobs in submission order.
    pub fn wait(&self) -> Result<()> {
        self.inner.wait()
    }

    /// Whether two queue values wrap the same underlying channel.
    pub fn shares_channel(&self, other: &ExecutionQueue) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Per-context cache mapping a logical device to its single execution queue.
///
/// At most one queue is ever created per distinct id within one context;
/// repeated requests return clones wrapping the same channel. Entries are
/// never evicted. The cache is a fixed-size table indexed by the compact
/// slot derived from the id; no hashing.
pub struct QueueCache {
    runtime: Arc<dyn ComputeRuntime>,
    queues: RefCell<[Option<ExecutionQueue>; MAX_DEVICE_SLOTS]>,
}

impl fmt::Debug for QueueCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.queues.borrow().iter().filter(|entry| entry.is_some()).count();
        f.debug_struct("QueueCache").field("cached", &cached).finish()
    }
}

impl QueueCache {
    pub fn new(runtime: Arc<dyn ComputeRuntime>) -> Self {
        Self { runtime, queues: RefCell::new(std::array::from_fn(|_| None)) }
    }

    /// Queue for `id`, creating and caching it on first request.
    ///
    /// On a miss the id is resolved through `registry` first; an
    /// unavailable id fails with [`crate::Error::UnavailableDevice`]
    /// unchanged and leaves no cache entry. A runtime failure while
    /// creating the channel for a resolved handle is
    /// [`crate::Error::Acquisition`].
    pub fn get(
        &self,
        id: LogicalDeviceId,
        registry: &DeviceRegistry,
        availability: &DeviceAvailability,
    ) -> Result<ExecutionQueue> {
        if let Some(slot) = id.slot() {
            if let Some(queue) = &self.queues.borrow()[slot] {
                return Ok(queue.clone());
            }
        }

        let handle = registry.resolve(id, availability)?;
        // Resolution succeeded, so the id fits the table.
        let slot = id.slot().ok_or_else(|| UnavailableDeviceSnafu { device: id }.build())?;

        let inner = self.runtime.create_queue(&handle).context(AcquisitionSnafu { device: id })?;
        let queue = ExecutionQueue { device: id, inner };
        self.queues.borrow_mut()[slot] = Some(queue.clone());
        tracing::debug!(device = %id, class = %handle.class(), "created execution queue");
        Ok(queue)
    }

    /// Cached queue for `id`, if one was already created.
    pub fn cached(&self, id: LogicalDeviceId) -> Option<ExecutionQueue> {
        id.slot().and_then(|slot| self.queues.borrow()[slot].clone())
    }
}
