use crate::availability::DeviceAvailability;
use crate::error::Error;
use crate::id::{DeviceClass, LogicalDeviceId};
use crate::registry::DeviceRegistry;
use crate::test::{FakeRuntime, Outcome};

#[test]
fn resolve_is_stable() {
    let runtime = FakeRuntime::with_gpu();
    let availability = DeviceAvailability::new(runtime.clone());
    let registry = DeviceRegistry::new(runtime.clone());
    let id = LogicalDeviceId::new(0);

    let first = registry.resolve(id, &availability).unwrap();
    let second = registry.resolve(id, &availability).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.class(), DeviceClass::Gpu);

    // One acquire for discovery, one for the first resolution; the second
    // resolution came from the cache.
    assert_eq!(runtime.acquire_count(DeviceClass::Gpu), 2);
    assert_eq!(registry.cached(id), Some(first));
}

#[test]
fn unavailable_id_is_rejected_without_caching() {
    let runtime = FakeRuntime::with_gpu();
    let availability = DeviceAvailability::new(runtime.clone());
    let registry = DeviceRegistry::new(runtime.clone());
    let absent = LogicalDeviceId::new(1);

    let err = registry.resolve(absent, &availability).unwrap_err();
    assert!(matches!(err, Error::UnavailableDevice { device } if device == absent));
    assert_eq!(registry.cached(absent), None);
}

#[test]
fn out_of_capacity_index_is_unavailable() {
    let runtime = FakeRuntime::with_gpu();
    let availability = DeviceAvailability::new(runtime.clone());
    let registry = DeviceRegistry::new(runtime);
    let far = LogicalDeviceId::new(u16::MAX);

    let err = registry.resolve(far, &availability).unwrap_err();
    assert!(matches!(err, Error::UnavailableDevice { .. }));
}

#[test]
fn resolve_reacquires_the_discovered_class() {
    let runtime = FakeRuntime::host_only();
    let availability = DeviceAvailability::new(runtime.clone());
    let registry = DeviceRegistry::new(runtime.clone());

    let handle = registry.resolve(LogicalDeviceId::new(0), &availability).unwrap();
    assert_eq!(handle.class(), DeviceClass::Host);
    // Discovery probed gpu once and host once; resolution re-acquired the
    // recorded winner only.
    assert_eq!(runtime.acquire_count(DeviceClass::Gpu), 1);
    assert_eq!(runtime.acquire_count(DeviceClass::Host), 2);
}

#[test]
fn empty_runtime_rejects_every_resolve() {
    let runtime = FakeRuntime::empty();
    let availability = DeviceAvailability::new(runtime.clone());
    let registry = DeviceRegistry::new(runtime);

    for index in [0u16, 1, 2] {
        let err = registry.resolve(LogicalDeviceId::new(index), &availability).unwrap_err();
        assert!(matches!(err, Error::UnavailableDevice { .. }));
    }
}

#[test]
fn acquisition_failure_after_discovery_is_fatal() {
    // The device was discovered, then the driver broke between probe and
    // use: resolution surfaces the failure instead of substituting.
    let runtime = FakeRuntime::new(&[(DeviceClass::Gpu, Outcome::Present)]);
    let availability = DeviceAvailability::new(runtime.clone());
    // Force discovery with the healthy runtime, then swap in a broken one
    // for the same registry.
    assert!(availability.is_runtime_usable());

    let broken = FakeRuntime::new(&[(DeviceClass::Gpu, Outcome::Broken)]);
    let registry = DeviceRegistry::new(broken);
    let err = registry.resolve(LogicalDeviceId::new(0), &availability).unwrap_err();
    assert!(matches!(err, Error::Acquisition { device, .. } if device == LogicalDeviceId::new(0)));
    assert_eq!(registry.cached(LogicalDeviceId::new(0)), None);
}
