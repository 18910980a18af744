//! One-shot device discovery and the frozen available-device set.
//!
//! # Discovery
//!
//! Discovery runs once per context, lazily, on the first availability
//! query. Candidate device classes are probed in ranked order (GPU first,
//! then the in-process host device) and the scan stops at the first
//! success, which becomes logical device `XPU:0`. A probe answering
//! "no such device" falls through to the next candidate; any other failure
//! stops the scan with an empty set, since substituting a device after an
//! unexplained driver error would hide real problems.
//!
//! An empty result is a valid state ("no accelerator present"), not an
//! error. Explicit CPU and accelerator devices are never added to the
//! default set; diagnostics may still probe them individually.
//!
//! Once computed, the set is frozen: it never shrinks or reorders for the
//! lifetime of the context.

use std::fmt;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use smallvec::SmallVec;

use crate::backend::ComputeRuntime;
use crate::id::{DeviceClass, LogicalDeviceId};

/// Ranked acquisition candidates, most preferred first.
pub const CANDIDATE_CLASSES: [DeviceClass; 2] = [DeviceClass::Gpu, DeviceClass::Host];

/// Result of the one-shot discovery scan.
#[derive(Debug)]
struct Discovery {
    /// Discovered ids with the class that satisfied each, discovery order.
    devices: SmallVec<[(LogicalDeviceId, DeviceClass); 2]>,
    host_fallback: bool,
}

/// Queries the runtime once to produce the fixed list of usable logical
/// devices, and answers membership/listing queries against it.
pub struct DeviceAvailability {
    runtime: Arc<dyn ComputeRuntime>,
    discovered: OnceCell<Discovery>,
}

impl fmt::Debug for DeviceAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceAvailability").field("discovered", &self.discovered.get()).finish()
    }
}

impl DeviceAvailability {
    pub fn new(runtime: Arc<dyn ComputeRuntime>) -> Self {
        Self { runtime, discovered: OnceCell::new() }
    }

    fn discovery(&self) -> &Discovery {
        self.discovered.get_or_init(|| {
            let mut devices = SmallVec::new();
            let mut host_fallback = false;
            for class in CANDIDATE_CLASSES {
                match self.runtime.acquire(class) {
                    Ok(handle) => {
                        // The probe handle is transient; the registry
                        // re-acquires on first resolve.
                        let id = LogicalDeviceId::new(0);
                        devices.push((id, class));
                        if class == DeviceClass::Host {
                            host_fallback = true;
                            tracing::warn!(
                                device = %id,
                                "gpu device is not available, falling back to the host device; \
                                 the host device is intended for debugging only"
                            );
                        }
                        tracing::debug!(device = %id, class = %class, name = handle.vendor_name(), "discovered device");
                        break;
                    }
                    Err(error) if error.is_not_found() => {
                        tracing::debug!(class = %class, "no device of class");
                    }
                    Err(error) => {
                        tracing::warn!(class = %class, %error, "device probe failed");
                        break;
                    }
                }
            }
            Discovery { devices, host_fallback }
        })
    }

    /// Whether at least one device was discovered.
    pub fn is_runtime_usable(&self) -> bool {
        !self.discovery().devices.is_empty()
    }

    /// Whether `id` is a member of the frozen available set.
    pub fn is_available(&self, id: LogicalDeviceId) -> bool {
        self.discovery().devices.iter().any(|(available, _)| *available == id)
    }

    /// The frozen available set, in discovery order.
    pub fn devices(&self) -> impl Iterator<Item = LogicalDeviceId> + '_ {
        self.discovery().devices.iter().map(|(id, _)| *id)
    }

    /// Device class that satisfied `id` during discovery, if available.
    ///
    /// This is how "real GPU" and "debug host fallback" stay
    /// distinguishable even though both claim logical index 0.
    pub fn class_of(&self, id: LogicalDeviceId) -> Option<DeviceClass> {
        self.discovery().devices.iter().find(|(available, _)| *available == id).map(|(_, class)| *class)
    }

    /// Whether discovery settled on the host/debug fallback device.
    pub fn used_host_fallback(&self) -> bool {
        self.discovery().host_fallback
    }
}
