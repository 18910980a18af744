//! Explicitly constructed bundle of the discovery, registry, and queue
//! caches.
//!
//! One [`DeviceContext`] per logical thread of execution: all cache state
//! lives in the context (no globals, no thread-locals), and interior
//! mutability without synchronization makes the context `!Sync` by
//! construction. Threads that each build their own context duplicate the
//! one-time discovery work and share no warm caches; that is the intended
//! trade-off for a lock-free core.

use std::sync::Arc;

use crate::availability::DeviceAvailability;
use crate::backend::{ComputeRuntime, DeviceDescriptor, RuntimeDeviceHandle};
use crate::error::Result;
use crate::id::LogicalDeviceId;
use crate::queue::{ExecutionQueue, QueueCache};
use crate::registry::DeviceRegistry;

/// Per-thread device discovery, handle, and queue state for one runtime.
#[derive(Debug)]
pub struct DeviceContext {
    runtime: Arc<dyn ComputeRuntime>,
    availability: DeviceAvailability,
    registry: DeviceRegistry,
    queues: QueueCache,
}

impl DeviceContext {
    pub fn new(runtime: Arc<dyn ComputeRuntime>) -> Self {
        Self {
            availability: DeviceAvailability::new(Arc::clone(&runtime)),
            registry: DeviceRegistry::new(Arc::clone(&runtime)),
            queues: QueueCache::new(Arc::clone(&runtime)),
            runtime,
        }
    }

    /// The runtime this context fronts.
    pub fn runtime(&self) -> &dyn ComputeRuntime {
        self.runtime.as_ref()
    }

    /// Whether at least one device was discovered.
    pub fn is_runtime_usable(&self) -> bool {
        self.availability.is_runtime_usable()
    }

    /// Whether `id` is in the frozen available set.
    pub fn is_device_available(&self, id: LogicalDeviceId) -> bool {
        self.availability.is_available(id)
    }

    /// The frozen available set, in discovery order.
    pub fn available_devices(&self) -> Vec<LogicalDeviceId> {
        self.availability.devices().collect()
    }

    /// Whether discovery settled on the host/debug fallback device.
    pub fn used_host_fallback(&self) -> bool {
        self.availability.used_host_fallback()
    }

    /// Concrete runtime handle for `id` (cached after first resolution).
    pub fn resolve(&self, id: LogicalDeviceId) -> Result<RuntimeDeviceHandle> {
        self.registry.resolve(id, &self.availability)
    }

    /// Execution queue for `id` (at most one per id per context).
    pub fn queue(&self, id: LogicalDeviceId) -> Result<ExecutionQueue> {
        self.queues.get(id, &self.registry, &self.availability)
    }

    /// Human-readable descriptor for `id`'s resolved device.
    pub fn describe(&self, id: LogicalDeviceId) -> Result<DeviceDescriptor> {
        let handle = self.resolve(id)?;
        Ok(self.runtime.describe(&handle))
    }

    /// Availability component, for callers that need the class queries.
    pub fn availability(&self) -> &DeviceAvailability {
        &self.availability
    }

    /// Handle registry, mainly for cache inspection.
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Queue cache, mainly for cache inspection.
    pub fn queue_cache(&self) -> &QueueCache {
        &self.queues
    }
}
