//! Screen orientation policy for Horizon Mobile.
//!
//! This crate decides which interface orientation the OS should present:
//!
//! - **Orientation Types**: masks, single orientations, device readings, locks
//! - **Resolver**: pure lock codec, capability filtering, default selection,
//!   and device-to-interface mapping
//! - **Capabilities**: the orientations a platform can present, supplied by
//!   the host
//! - **Controller**: the stateful host-side wrapper that tracks the current
//!   lock and orientation and notifies listeners
//!
//! # Resolver Example
//!
//! ```
//! use horizon_mobile_orientation::resolver;
//! use horizon_mobile_orientation::{Orientation, OrientationMask, PlatformCapabilities};
//!
//! let lock = resolver::decode_lock(1).unwrap();
//! assert_eq!(lock, OrientationMask::ALL);
//!
//! let phone = PlatformCapabilities::phone();
//! assert_eq!(
//!     resolver::resolve_mask(lock, &phone),
//!     OrientationMask::ALL_BUT_UPSIDE_DOWN
//! );
//! assert_eq!(resolver::default_orientation_for(lock, &phone).unwrap(), Orientation::Portrait);
//! assert_eq!(resolver::encode_lock(lock).unwrap(), 1);
//! ```

mod capabilities;
mod controller;
mod error;
mod orientation;
pub mod resolver;

pub use capabilities::{OrientationCapabilities, PlatformCapabilities};
pub use controller::{ControllerConfig, OrientationChangeEvent, ScreenOrientationController};
pub use error::{OrientationError, OrientationResult};
pub use orientation::{DeviceOrientation, Orientation, OrientationLock, OrientationMask};
