//! Error types for dip-switch-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HID device communication failure.
    #[error("HID error: {0}")]
    Hid(String),

    /// Device not found during enumeration.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// An outgoing report could not be delivered.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// The asynchronous read loop stopped (device removed mid-session).
    #[error("read loop terminated: {0}")]
    ReadLoopTerminated(String),

    /// Switch index outside the panel.
    #[error("switch index out of range: {index} (allowed 0..={max})")]
    IndexOutOfRange { index: usize, max: usize },

    /// A report that could not be decoded.
    #[error("malformed report: {0}")]
    Malformed(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
