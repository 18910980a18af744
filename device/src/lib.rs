//! Discovery, selection, and caching of heterogeneous compute devices.
//!
//! This crate is the state-carrying core of the `xpu` workspace: it maps a
//! stable logical device id (`"XPU:0"`) to whatever concrete device the
//! underlying runtime exposes, and hands out exactly one execution queue
//! per logical device so callers never pay for re-creating device/queue
//! pairs.
//!
//! The pieces compose front to back:
//!
//! - [`availability::DeviceAvailability`] probes the runtime once (GPU
//!   preferred, host/debug fallback) and freezes the available set;
//! - [`registry::DeviceRegistry`] lazily resolves an available id to the
//!   runtime's handle and caches it;
//! - [`queue::QueueCache`] lazily creates the single queue bound to that
//!   handle and caches it;
//! - [`context::DeviceContext`] bundles the three into one explicitly
//!   constructed, per-thread object.
//!
//! Concrete runtimes implement [`backend::ComputeRuntime`]; see the
//! `xpu-runtime` crate for the native backends.

pub mod availability;
pub mod backend;
pub mod context;
pub mod error;
pub mod id;
pub mod queue;
pub mod registry;


pub use availability::{CANDIDATE_CLASSES, DeviceAvailability};
pub use backend::{AcquireError, ComputeRuntime, DeviceDescriptor, RuntimeDeviceHandle};
pub use context::DeviceContext;
pub use error::{Error, Result};
pub use id::{BACKEND_TAG, DeviceClass, LogicalDeviceId, MAX_DEVICE_SLOTS};
pub use queue::{ExecutionQueue, Job, QueueCache, SubmitQueue};
pub use registry::DeviceRegistry;
