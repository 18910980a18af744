use test_case::test_case;

use crate::id::{DeviceClass, LogicalDeviceId, MAX_DEVICE_SLOTS};

#[test_case("XPU:0", 0; "canonical")]
#[test_case("xpu:3", 3; "lowercase tag")]
#[test_case("Xpu:42", 42; "mixed case tag")]
#[test_case("XPU:65535", 65535; "max index")]
fn parse_accepts(input: &str, index: u16) {
    let id: LogicalDeviceId = input.parse().unwrap();
    assert_eq!(id, LogicalDeviceId::new(index));
}

#[test_case(""; "empty")]
#[test_case("XPU"; "missing index")]
#[test_case("XPU:"; "empty index")]
#[test_case("XPU:abc"; "non numeric index")]
#[test_case("XPU:-1"; "negative index")]
#[test_case("XPU:70000"; "index overflow")]
#[test_case("CUDA:0"; "foreign tag")]
#[test_case("XPU:0:0"; "trailing component")]
fn parse_rejects(input: &str) {
    let err = input.parse::<LogicalDeviceId>().unwrap_err();
    assert!(err.to_string().contains("invalid device"), "unexpected error: {err}");
}

#[test]
fn display_is_canonical() {
    assert_eq!(LogicalDeviceId::new(0).to_string(), "XPU:0");
    assert_eq!(LogicalDeviceId::new(7).to_string(), "XPU:7");
}

#[test]
fn equality_is_value_equality() {
    let parsed: LogicalDeviceId = "xpu:2".parse().unwrap();
    assert_eq!(parsed, LogicalDeviceId::new(2));
    assert_ne!(parsed, LogicalDeviceId::new(3));
}

#[test]
fn slot_is_defined_only_below_capacity() {
    assert_eq!(LogicalDeviceId::new(0).slot(), Some(0));
    assert_eq!(LogicalDeviceId::new((MAX_DEVICE_SLOTS - 1) as u16).slot(), Some(MAX_DEVICE_SLOTS - 1));
    assert_eq!(LogicalDeviceId::new(MAX_DEVICE_SLOTS as u16).slot(), None);
}

#[test]
fn class_short_names() {
    assert_eq!(DeviceClass::Gpu.to_string(), "gpu");
    assert_eq!(DeviceClass::Cpu.to_string(), "cpu");
    assert_eq!(DeviceClass::Host.to_string(), "host");
    assert_eq!(DeviceClass::Accelerator.to_string(), "acc");
}
