//! In-process host device.
//!
//! The host device always acquires successfully: it is the fallback target
//! when no GPU can be acquired, and it exists for debugging the submission
//! path, not for production workloads.

use xpu_device::{DeviceClass, RuntimeDeviceHandle};

/// Acquire the in-process host device.
pub fn acquire() -> RuntimeDeviceHandle {
    RuntimeDeviceHandle::new(DeviceClass::Host, 0, format!("in-process host device ({})", std::env::consts::ARCH))
}
