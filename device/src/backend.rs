//! The seam between this crate and the underlying parallel-compute runtime.
//!
//! Everything the core needs from a runtime is behind [`ComputeRuntime`]:
//! acquiring a device of a given class, creating a submission channel bound
//! to an acquired device, and describing a device for diagnostics. Probe
//! failures are classified as explicit result values ([`AcquireError`])
//! rather than caught exceptions, so the selection policy in
//! [`crate::availability`] can tell "no such device" apart from a genuinely
//! broken driver.

use std::fmt;
use std::sync::Arc;

use snafu::Snafu;

use crate::id::DeviceClass;
use crate::queue::SubmitQueue;

/// Why a device of a given class could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum AcquireError {
    /// The runtime enumerates no device of this class. This is the only
    /// classification that authorizes falling through to the next ranked
    /// candidate during discovery.
    #[snafu(display("no {class} device present"))]
    NotFound { class: DeviceClass },

    /// Any other runtime-level failure (driver error, platform init, ...).
    #[snafu(display("runtime error while acquiring {class} device: {message}"))]
    Backend { class: DeviceClass, message: String },
}

impl AcquireError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AcquireError::NotFound { .. })
    }
}

/// Concrete device handle owned by the underlying runtime.
///
/// The core only caches copies; the runtime remains the ultimate owner of
/// the device's lifetime. Equality is value equality: two handles compare
/// equal iff they name the same underlying device, which is all the
/// stability guarantee callers may rely on (not pointer identity).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeDeviceHandle {
    class: DeviceClass,
    ordinal: u32,
    name: Arc<str>,
}

impl RuntimeDeviceHandle {
    pub fn new(class: DeviceClass, ordinal: u32, name: impl Into<Arc<str>>) -> Self {
        Self { class, ordinal, name: name.into() }
    }

    /// Device class this handle was acquired as.
    pub fn class(&self) -> DeviceClass {
        self.class
    }

    /// Runtime enumeration ordinal within the class.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    /// Vendor-reported device name. Diagnostics only; never used for
    /// equality or caching decisions.
    pub fn vendor_name(&self) -> &str {
        &self.name
    }
}

/// Human-readable device description for diagnostics printing.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    pub backend: &'static str,
    pub class: DeviceClass,
    pub name: String,
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}] {}", self.backend, self.class, self.name)
    }
}

/// Object-safe interface to the underlying compute runtime.
///
/// Implementations are expected to treat `acquire` as a bounded, synchronous
/// probe: it may initialize the runtime's platform state as a side effect,
/// and the calling thread stalls for as long as the probe does. No timeout
/// or cancellation is provided.
pub trait ComputeRuntime: fmt::Debug + Send + Sync {
    /// Short backend name used in descriptors (e.g. `"native"`).
    fn backend_name(&self) -> &'static str;

    /// Acquire a device of the given class.
    fn acquire(&self, class: DeviceClass) -> Result<RuntimeDeviceHandle, AcquireError>;

    /// Create a submission channel bound to an acquired device.
    fn create_queue(&self, handle: &RuntimeDeviceHandle) -> Result<Arc<dyn SubmitQueue>, AcquireError>;

    /// Describe a handle for diagnostics.
    fn describe(&self, handle: &RuntimeDeviceHandle) -> DeviceDescriptor {
        DeviceDescriptor {
            backend: self.backend_name(),
            class: handle.class(),
            name: handle.vendor_name().to_owned(),
        }
    }
}
