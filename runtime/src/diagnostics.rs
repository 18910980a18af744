//! Best-effort diagnostic tooling on top of the device core.
//!
//! Everything here is peripheral: listing never propagates probe errors
//! (a class that cannot be acquired prints as `N/A`), and the self-test
//! is a smoke check of the submission path, not a benchmark.

use std::sync::Arc;

use parking_lot::Mutex;
use snafu::{ResultExt, ensure};

use xpu_device::{DeviceClass, DeviceContext};

use crate::error::{DeviceSnafu, NoUsableDeviceSnafu, Result, SelfTestSnafu};

/// Environment variable that restricts which devices the runtime
/// enumerates. Inspected only here: the core tolerates a filtered
/// (shrunken) device set transparently and never reads this variable.
pub const DEVICE_FILTER_ENV: &str = "XPU_DEVICE_FILTER";

const SELF_TEST_LEN: usize = 4;

/// Log the device landscape: each probe-able class (with `print_all`),
/// then the selected logical device. Prints `N/A` per class instead of
/// failing; listing is best-effort.
pub fn print_devices(ctx: &DeviceContext, print_all: bool) {
    if let Ok(filter) = std::env::var(DEVICE_FILTER_ENV) {
        tracing::warn!(
            filter = %filter,
            "{DEVICE_FILTER_ENV} is set; device ids may differ from an unfiltered run"
        );
    }

    if print_all {
        tracing::info!("probed device classes:");
        for class in [DeviceClass::Gpu, DeviceClass::Cpu, DeviceClass::Host, DeviceClass::Accelerator] {
            match ctx.runtime().acquire(class) {
                Ok(handle) => tracing::info!("- {class}: {}", ctx.runtime().describe(&handle)),
                Err(_) => tracing::info!("- {class}: N/A"),
            }
        }
    }

    tracing::info!("selected device:");
    match ctx.available_devices().first().copied() {
        Some(id) => match ctx.describe(id) {
            Ok(descriptor) => tracing::info!("- {id}: {descriptor}"),
            Err(_) => tracing::info!("- {id}: N/A"),
        },
        None => tracing::info!("- none (runtime not usable)"),
    }
}

/// Fill-buffer smoke test of the cached queue path.
///
/// Submits one job through the first available device's queue that fills a
/// small buffer with its own indexes, drains the queue, and verifies the
/// readback.
pub fn self_test(ctx: &DeviceContext) -> Result<()> {
    let Some(id) = ctx.available_devices().first().copied() else {
        return NoUsableDeviceSnafu.fail();
    };

    let queue = ctx.queue(id).context(DeviceSnafu)?;
    let buffer = Arc::new(Mutex::new(vec![0u32; SELF_TEST_LEN]));

    let target = Arc::clone(&buffer);
    queue.enqueue(Box::new(move || {
        for (index, value) in target.lock().iter_mut().enumerate() {
            *value = index as u32;
        }
    }));
    queue.wait().context(DeviceSnafu)?;

    let buffer = buffer.lock();
    for (index, &actual) in buffer.iter().enumerate() {
        let expected = index as u32;
        ensure!(actual == expected, SelfTestSnafu { index, expected, actual });
    }
    tracing::info!(device = %id, "fill-buffer self test passed");
    Ok(())
}
