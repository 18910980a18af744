use snafu::Snafu;

use crate::backend::AcquireError;
use crate::id::LogicalDeviceId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Requested id is not in the available device set.
    ///
    /// Fatal to the calling operation: the caller asked for a specific
    /// device, so silently substituting another one is worse than failing.
    #[snafu(display("device {device} is not available"))]
    UnavailableDevice { device: LogicalDeviceId },

    /// Runtime failed while creating the device or queue for an id that
    /// discovery reported as available. Non-retryable; no further fallback
    /// beyond the one folded into discovery.
    #[snafu(display("failed to acquire device {device} from the runtime: {source}"))]
    Acquisition { device: LogicalDeviceId, source: AcquireError },

    /// String form failed to parse as a logical device id.
    #[snafu(display("invalid device: {spec}"))]
    InvalidDevice { spec: String },

    /// Runtime-level failure while draining queued work.
    #[snafu(display("runtime error: {message}"))]
    Runtime { message: String },
}
