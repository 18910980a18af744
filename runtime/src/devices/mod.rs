//! Native device backends.
//!
//! [`NativeRuntime`] dispatches per device class to whichever backends this
//! build carries: CUDA for GPU-class devices (`cuda` feature), the
//! in-process host device (`host` feature, default). Classes without a
//! compiled-in backend probe as "no such device", so a build with no
//! backend features degrades to an empty availability set rather than
//! failing to compile.

#[cfg(feature = "cuda")]
pub mod cuda;
#[cfg(feature = "host")]
pub mod host;
#[cfg(feature = "host")]
pub mod host_queue;

use std::sync::Arc;

use xpu_device::{AcquireError, ComputeRuntime, DeviceClass, RuntimeDeviceHandle, SubmitQueue};

/// The default [`ComputeRuntime`] over the locally compiled backends.
#[derive(Debug, Default)]
pub struct NativeRuntime {
    #[cfg(feature = "cuda")]
    cuda: cuda::CudaDriver,
}

impl NativeRuntime {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComputeRuntime for NativeRuntime {
    fn backend_name(&self) -> &'static str {
        "native"
    }

    fn acquire(&self, class: DeviceClass) -> Result<RuntimeDeviceHandle, AcquireError> {
        match class {
            DeviceClass::Gpu => {
                #[cfg(feature = "cuda")]
                return self.cuda.acquire();
                #[cfg(not(feature = "cuda"))]
                return Err(AcquireError::NotFound { class });
            }
            DeviceClass::Host => {
                #[cfg(feature = "host")]
                return Ok(host::acquire());
                #[cfg(not(feature = "host"))]
                return Err(AcquireError::NotFound { class });
            }
            // No native driver enumerates explicit CPU or accelerator
            // devices; they stay individually probe-able, always absent.
            DeviceClass::Cpu | DeviceClass::Accelerator => Err(AcquireError::NotFound { class }),
        }
    }

    fn create_queue(&self, handle: &RuntimeDeviceHandle) -> Result<Arc<dyn SubmitQueue>, AcquireError> {
        match handle.class() {
            DeviceClass::Gpu => {
                #[cfg(feature = "cuda")]
                return self.cuda.create_queue();
                #[cfg(not(feature = "cuda"))]
                return Err(AcquireError::Backend {
                    class: handle.class(),
                    message: "gpu backend is not compiled in".into(),
                });
            }
            DeviceClass::Host => {
                #[cfg(feature = "host")]
                return Ok(Arc::new(host_queue::HostQueue::new()));
                #[cfg(not(feature = "host"))]
                return Err(AcquireError::Backend {
                    class: handle.class(),
                    message: "host backend is not compiled in".into(),
                });
            }
            class => Err(AcquireError::Backend { class, message: "no submission channel for this device class".into() }),
        }
    }
}
