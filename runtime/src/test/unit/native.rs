use std::sync::Arc;

use parking_lot::Mutex;

use xpu_device::{DeviceClass, DeviceContext, Error, LogicalDeviceId};

use crate::native_context;
use crate::test::NoDeviceRuntime;

#[test]
fn empty_runtime_reports_unusable() {
    let ctx = DeviceContext::new(Arc::new(NoDeviceRuntime));
    assert!(!ctx.is_runtime_usable());
    assert!(ctx.available_devices().is_empty());

    let err = ctx.resolve(LogicalDeviceId::new(0)).unwrap_err();
    assert!(matches!(err, Error::UnavailableDevice { .. }));
    let err = ctx.queue(LogicalDeviceId::new(0)).unwrap_err();
    assert!(matches!(err, Error::UnavailableDevice { .. }));
}

#[cfg(all(feature = "host", not(feature = "cuda")))]
#[test]
fn native_discovery_falls_back_to_host() {
    let ctx = native_context();
    assert!(ctx.is_runtime_usable());
    assert_eq!(ctx.available_devices(), vec![LogicalDeviceId::new(0)]);
    assert!(ctx.used_host_fallback());

    let handle = ctx.resolve(LogicalDeviceId::new(0)).unwrap();
    assert_eq!(handle.class(), DeviceClass::Host);
}

#[cfg(feature = "host")]
#[test]
fn native_resolve_is_stable() {
    let ctx = native_context();
    let id = LogicalDeviceId::new(0);
    assert_eq!(ctx.resolve(id).unwrap(), ctx.resolve(id).unwrap());
}

#[cfg(feature = "host")]
#[test]
fn native_queue_runs_jobs_in_submission_order() {
    let ctx = native_context();
    let id = LogicalDeviceId::new(0);

    let q1 = ctx.queue(id).unwrap();
    let q2 = ctx.queue(id).unwrap();
    assert!(q1.shares_channel(&q2));

    let log = Arc::new(Mutex::new(Vec::new()));
    for (queue, value) in [(&q1, 1), (&q2, 2), (&q1, 3)] {
        let sink = Arc::clone(&log);
        queue.enqueue(Box::new(move || sink.lock().push(value)));
    }
    q1.wait().unwrap();
    assert_eq!(*log.lock(), vec![1, 2, 3]);
}

#[cfg(feature = "host")]
#[test]
fn second_logical_index_is_unavailable() {
    let ctx = native_context();
    let err = ctx.queue(LogicalDeviceId::new(1)).unwrap_err();
    assert!(matches!(err, Error::UnavailableDevice { device } if device == LogicalDeviceId::new(1)));
}

#[cfg(feature = "host")]
#[test]
fn host_descriptor_names_the_backend() {
    let ctx = native_context();
    if ctx.used_host_fallback() {
        let descriptor = ctx.describe(LogicalDeviceId::new(0)).unwrap();
        assert!(descriptor.to_string().starts_with("[native:host]"), "descriptor: {descriptor}");
    }
}
