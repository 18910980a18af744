//! Native backends and diagnostic tooling for the `xpu` device core.
//!
//! The `devices` module provides [`NativeRuntime`], the default
//! [`xpu_device::ComputeRuntime`]: a CUDA GPU probe behind the `cuda`
//! feature and an always-available in-process host/debug device behind the
//! `host` feature (default). Built with neither feature, every probe
//! reports "no such device": availability is empty and every
//! resolve/queue request fails with an unavailable-device error, instead
//! of the crate failing to build.
//!
//! The `diagnostics` module is peripheral tooling on top of the core:
//! best-effort device listing, the device-filter advisory, and a
//! fill-buffer self-test.

pub mod devices;
pub mod diagnostics;
pub mod error;


use std::sync::Arc;

use xpu_device::DeviceContext;

pub use devices::NativeRuntime;
pub use error::{Error, Result};

/// Context over the native runtime, for callers without their own backend.
pub fn native_context() -> DeviceContext {
    DeviceContext::new(Arc::new(NativeRuntime::new()))
}
