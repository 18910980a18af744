//! Per-context cache mapping logical device ids to concrete runtime handles.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use snafu::ResultExt;

use crate::availability::DeviceAvailability;
use crate::backend::{ComputeRuntime, RuntimeDeviceHandle};
use crate::error::{AcquisitionSnafu, Result, UnavailableDeviceSnafu};
use crate::id::{LogicalDeviceId, MAX_DEVICE_SLOTS};

/// Lazily-populated id → handle table.
///
/// Entries are created on first resolution and live for the rest of the
/// context; there is no invalidation or eviction. The table is fixed-size
/// and indexed by the compact slot derived from the id, so cache inspection
/// is trivial and lookups never hash.
pub struct DeviceRegistry {
    runtime: Arc<dyn ComputeRuntime>,
    handles: RefCell<[Option<RuntimeDeviceHandle>; MAX_DEVICE_SLOTS]>,
}

impl fmt::Debug for DeviceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cached = self.handles.borrow().iter().filter(|entry| entry.is_some()).count();
        f.debug_struct("DeviceRegistry").field("cached", &cached).finish()
    }
}

impl DeviceRegistry {
    pub fn new(runtime: Arc<dyn ComputeRuntime>) -> Self {
        Self { runtime, handles: RefCell::new(std::array::from_fn(|_| None)) }
    }

    /// Concrete runtime handle for `id`.
    ///
    /// The id must be in the available set; an unavailable id fails with
    /// [`crate::Error::UnavailableDevice`] and creates no cache entry.
    /// First resolution re-acquires the device class that discovery
    /// recorded for the id and caches the handle; later calls return the
    /// cached handle without touching the runtime. All handles returned
    /// for a fixed id within one context compare equal.
    pub fn resolve(&self, id: LogicalDeviceId, availability: &DeviceAvailability) -> Result<RuntimeDeviceHandle> {
        let (Some(class), Some(slot)) = (availability.class_of(id), id.slot()) else {
            return UnavailableDeviceSnafu { device: id }.fail();
        };

        if let Some(handle) = &self.handles.borrow()[slot] {
            return Ok(handle.clone());
        }

        let handle = self.runtime.acquire(class).context(AcquisitionSnafu { device: id })?;
        tracing::debug!(device = %id, class = %class, name = handle.vendor_name(), "resolved device handle");
        self.handles.borrow_mut()[slot] = Some(handle.clone());
        Ok(handle)
    }

    /// Cached handle for `id`, if one was already resolved.
    pub fn cached(&self, id: LogicalDeviceId) -> Option<RuntimeDeviceHandle> {
        id.slot().and_then(|slot| self.handles.borrow()[slot].clone())
    }
}
