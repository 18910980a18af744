//! CUDA GPU backend.
//!
//! Device acquisition opens the driver context for ordinal 0 lazily and
//! shares it between the availability probe, handle resolution, and queue
//! creation, so the driver is initialized at most once per runtime value.
//! A missing device classifies as `NotFound` (authorizing the host
//! fallback); every other driver error is a hard `Backend` failure.

use std::sync::Arc;

use cudarc::driver::sys::CUresult;
use cudarc::driver::{CudaContext, CudaStream, DriverError};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use xpu_device::{AcquireError, DeviceClass, Job, RuntimeDeviceHandle, SubmitQueue};

fn classify(error: DriverError) -> AcquireError {
    let class = DeviceClass::Gpu;
    match error.0 {
        CUresult::CUDA_ERROR_NO_DEVICE | CUresult::CUDA_ERROR_INVALID_DEVICE => AcquireError::NotFound { class },
        _ => AcquireError::Backend { class, message: error.to_string() },
    }
}

/// Lazily-initialized driver context shared across probe and use.
#[derive(Debug, Default)]
pub struct CudaDriver {
    context: OnceCell<Arc<CudaContext>>,
}

impl CudaDriver {
    fn context(&self) -> Result<&Arc<CudaContext>, AcquireError> {
        self.context.get_or_try_init(|| CudaContext::new(0).map_err(classify))
    }

    pub fn acquire(&self) -> Result<RuntimeDeviceHandle, AcquireError> {
        let context = self.context()?;
        let name = context
            .name()
            .map_err(|error| AcquireError::Backend { class: DeviceClass::Gpu, message: error.to_string() })?;
        Ok(RuntimeDeviceHandle::new(DeviceClass::Gpu, 0, name))
    }

    pub fn create_queue(&self) -> Result<Arc<dyn SubmitQueue>, AcquireError> {
        let context = self.context()?;
        Ok(Arc::new(CudaQueue { stream: context.default_stream(), pending: Mutex::new(Vec::new()) }))
    }
}

/// Submission channel over the context's default stream.
///
/// Host-visible jobs drain after the stream synchronizes, so they observe
/// every piece of device work that was ordered before them.
pub struct CudaQueue {
    stream: Arc<CudaStream>,
    pending: Mutex<Vec<Job>>,
}

impl std::fmt::Debug for CudaQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CudaQueue").field("pending", &self.pending.lock().len()).finish()
    }
}

impl SubmitQueue for CudaQueue {
    fn enqueue(&self, job: Job) {
        self.pending.lock().push(job);
    }

    fn wait(&self) -> xpu_device::Result<()> {
        self.stream
            .synchronize()
            .map_err(|error| xpu_device::Error::Runtime { message: error.to_string() })?;
        let jobs = std::mem::take(&mut *self.pending.lock());
        for job in jobs {
            job();
        }
        Ok(())
    }
}
