//! Error types for the native runtime and diagnostics.

use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Device core error (unavailable id, acquisition failure, ...).
    #[snafu(display("device error: {source}"))]
    Device { source: xpu_device::Error },

    /// No device survived discovery; there is nothing to run on.
    #[snafu(display("no usable compute device present"))]
    NoUsableDevice,

    /// The fill-buffer self-test read back a wrong value.
    #[snafu(display("self test mismatch at index {index}: expected {expected}, got {actual}"))]
    SelfTest { index: usize, expected: u32, actual: u32 },
}
