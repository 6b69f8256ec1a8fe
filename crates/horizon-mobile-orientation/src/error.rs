//! Error types for orientation resolution.

use thiserror::Error;

use crate::orientation::{DeviceOrientation, OrientationMask};

/// Errors that can occur while resolving orientations.
///
/// Every variant is recoverable: callers keep their previous lock or last
/// known orientation and carry on.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationError {
    /// The wire lock code is not in the supported table.
    #[error("unsupported orientation lock code: {0}")]
    UnsupportedLockCode(i32),

    /// The mask has no wire lock code.
    #[error("orientation mask {0:?} has no wire encoding")]
    UnrepresentableMask(OrientationMask),

    /// The mask holds no concrete orientation to choose from.
    #[error("orientation mask contains no concrete orientation")]
    EmptyMask,

    /// The device reading does not describe an interface orientation.
    #[error("device orientation {0:?} has no interface orientation")]
    NoInterfaceOrientation(DeviceOrientation),

    /// The wire orientation code is not recognised.
    #[error("unsupported orientation code: {0}")]
    UnsupportedOrientationCode(i32),

    /// None of the mask's orientations can be presented on this platform.
    #[error("orientation mask {0:?} is not supported on this platform")]
    UnsupportedMask(OrientationMask),
}

/// Result type for orientation operations.
pub type OrientationResult<T> = Result<T, OrientationError>;
