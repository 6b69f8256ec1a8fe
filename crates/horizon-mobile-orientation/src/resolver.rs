//! Orientation policy resolution.
//!
//! Pure functions that turn an application's orientation lock into the
//! orientation the OS should present:
//!
//! ```text
//! wire lock code -> OrientationMask -> capability filter -> Orientation -> wire orientation code
//! ```
//!
//! Nothing here holds state, logs, or blocks; callers that need the last
//! known orientation keep it themselves (see
//! [`ScreenOrientationController`](crate::ScreenOrientationController)).
//!
//! # Default Selection
//!
//! When several orientations are allowed, [`default_orientation`] picks
//! `Portrait` if present, otherwise `LandscapeLeft`, otherwise the
//! lowest-ordinal remaining orientation. This decides which way the UI first
//! renders.
//!
//! # Example
//!
//! ```
//! use horizon_mobile_orientation::resolver;
//! use horizon_mobile_orientation::{Orientation, OrientationLock, PlatformCapabilities};
//!
//! let mask = resolver::decode_lock(OrientationLock::Landscape.code()).unwrap();
//! let caps = PlatformCapabilities::phone();
//! assert!(resolver::supports_mask(mask, &caps));
//! assert_eq!(
//!     resolver::default_orientation_for(mask, &caps).unwrap(),
//!     Orientation::LandscapeLeft
//! );
//! ```

use crate::capabilities::OrientationCapabilities;
use crate::error::{OrientationError, OrientationResult};
use crate::orientation::{DeviceOrientation, Orientation, OrientationLock, OrientationMask};

/// Wire lock table, indexed by lock code.
const LOCK_TABLE: [(OrientationLock, OrientationMask); 8] = [
    (OrientationLock::Default, OrientationMask::ALL_BUT_UPSIDE_DOWN),
    (OrientationLock::All, OrientationMask::ALL),
    (OrientationLock::Portrait, OrientationMask::ALL_PORTRAIT),
    (OrientationLock::PortraitUp, OrientationMask::PORTRAIT),
    (OrientationLock::PortraitDown, OrientationMask::PORTRAIT_UPSIDE_DOWN),
    (OrientationLock::Landscape, OrientationMask::ALL_LANDSCAPE),
    (OrientationLock::LandscapeLeft, OrientationMask::LANDSCAPE_LEFT),
    (OrientationLock::LandscapeRight, OrientationMask::LANDSCAPE_RIGHT),
];

/// Wire orientation table, indexed by orientation code.
const ORIENTATION_TABLE: [Orientation; 5] = [
    Orientation::Unknown,
    Orientation::Portrait,
    Orientation::PortraitUpsideDown,
    Orientation::LandscapeLeft,
    Orientation::LandscapeRight,
];

impl OrientationLock {
    /// Every lock, in wire code order.
    pub const ALL: [OrientationLock; 8] = [
        OrientationLock::Default,
        OrientationLock::All,
        OrientationLock::Portrait,
        OrientationLock::PortraitUp,
        OrientationLock::PortraitDown,
        OrientationLock::Landscape,
        OrientationLock::LandscapeLeft,
        OrientationLock::LandscapeRight,
    ];

    /// Look up a lock by wire code.
    pub fn from_code(code: i32) -> OrientationResult<Self> {
        lock_entry(code).map(|(lock, _)| lock)
    }

    /// The mask this lock allows.
    pub const fn mask(self) -> OrientationMask {
        LOCK_TABLE[self as usize].1
    }
}

fn lock_entry(code: i32) -> OrientationResult<(OrientationLock, OrientationMask)> {
    usize::try_from(code)
        .ok()
        .and_then(|index| LOCK_TABLE.get(index).copied())
        .ok_or(OrientationError::UnsupportedLockCode(code))
}

/// Decode a wire lock code into the mask it allows.
pub fn decode_lock(code: i32) -> OrientationResult<OrientationMask> {
    lock_entry(code).map(|(_, mask)| mask)
}

/// Encode a mask as a wire lock code.
///
/// Only masks that appear in the lock table have a code; anything else is a
/// construction error on the caller's side.
pub fn encode_lock(mask: OrientationMask) -> OrientationResult<i32> {
    LOCK_TABLE
        .iter()
        .find(|(_, entry)| *entry == mask)
        .map(|(lock, _)| lock.code())
        .ok_or(OrientationError::UnrepresentableMask(mask))
}

/// Whether `orientation`'s bit is set in `mask`.
#[inline]
pub fn mask_contains_orientation(mask: OrientationMask, orientation: Orientation) -> bool {
    mask.contains(orientation.mask())
}

/// The orientations of `mask` the platform can actually present.
pub fn resolve_mask<C>(mask: OrientationMask, capabilities: &C) -> OrientationMask
where
    C: OrientationCapabilities + ?Sized,
{
    mask.concrete() & capabilities.supported_orientations().concrete()
}

/// Whether at least one orientation of `mask` can be presented.
pub fn supports_mask<C>(mask: OrientationMask, capabilities: &C) -> bool
where
    C: OrientationCapabilities + ?Sized,
{
    !resolve_mask(mask, capabilities).is_empty()
}

/// Pick the orientation to present for `mask`.
///
/// Portrait wins, then LandscapeLeft, then the lowest-ordinal remaining
/// orientation. The `UNKNOWN` sentinel is never picked.
pub fn default_orientation(mask: OrientationMask) -> OrientationResult<Orientation> {
    let candidates = mask.concrete();
    if candidates.contains(OrientationMask::PORTRAIT) {
        return Ok(Orientation::Portrait);
    }
    if candidates.contains(OrientationMask::LANDSCAPE_LEFT) {
        return Ok(Orientation::LandscapeLeft);
    }
    candidates
        .orientations()
        .next()
        .ok_or(OrientationError::EmptyMask)
}

/// [`default_orientation`] over the capability-filtered mask.
pub fn default_orientation_for<C>(
    mask: OrientationMask,
    capabilities: &C,
) -> OrientationResult<Orientation>
where
    C: OrientationCapabilities + ?Sized,
{
    default_orientation(resolve_mask(mask, capabilities))
}

/// Translate a sensor reading into the interface orientation it implies.
///
/// The landscape axes cross: turning the device so its top edge points left
/// means the interface must be presented landscape-right, and vice versa.
/// Flat and unknown readings carry no interface orientation; callers keep
/// their last known one.
pub fn map_device_orientation(device: DeviceOrientation) -> OrientationResult<Orientation> {
    match device {
        DeviceOrientation::Portrait => Ok(Orientation::Portrait),
        DeviceOrientation::PortraitUpsideDown => Ok(Orientation::PortraitUpsideDown),
        DeviceOrientation::LandscapeLeft => Ok(Orientation::LandscapeRight),
        DeviceOrientation::LandscapeRight => Ok(Orientation::LandscapeLeft),
        DeviceOrientation::FaceUp | DeviceOrientation::FaceDown | DeviceOrientation::Unknown => {
            Err(OrientationError::NoInterfaceOrientation(device))
        }
    }
}

/// The mask containing only `orientation`.
#[inline]
pub fn mask_from_orientation(orientation: Orientation) -> OrientationMask {
    orientation.mask()
}

/// Encode an orientation as the wire code reported to the application.
#[inline]
pub fn encode_orientation(orientation: Orientation) -> i32 {
    orientation as i32
}

/// Decode a wire orientation code.
pub fn decode_orientation(code: i32) -> OrientationResult<Orientation> {
    usize::try_from(code)
        .ok()
        .and_then(|index| ORIENTATION_TABLE.get(index).copied())
        .ok_or(OrientationError::UnsupportedOrientationCode(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::PlatformCapabilities;

    #[test]
    fn test_decode_lock_table() {
        assert_eq!(decode_lock(0).unwrap(), OrientationMask::ALL_BUT_UPSIDE_DOWN);
        assert_eq!(decode_lock(1).unwrap(), OrientationMask::ALL);
        assert_eq!(decode_lock(2).unwrap(), OrientationMask::ALL_PORTRAIT);
        assert_eq!(decode_lock(3).unwrap(), OrientationMask::PORTRAIT);
        assert_eq!(decode_lock(4).unwrap(), OrientationMask::PORTRAIT_UPSIDE_DOWN);
        assert_eq!(decode_lock(5).unwrap(), OrientationMask::ALL_LANDSCAPE);
        assert_eq!(decode_lock(6).unwrap(), OrientationMask::LANDSCAPE_LEFT);
        assert_eq!(decode_lock(7).unwrap(), OrientationMask::LANDSCAPE_RIGHT);
    }

    #[test]
    fn test_decode_lock_rejects_unknown_codes() {
        for code in [-1, 8, 9, i32::MAX, i32::MIN] {
            assert_eq!(
                decode_lock(code),
                Err(OrientationError::UnsupportedLockCode(code))
            );
        }
    }

    #[test]
    fn test_encode_lock_rejects_ad_hoc_masks() {
        let mask = OrientationMask::PORTRAIT | OrientationMask::LANDSCAPE_RIGHT;
        assert_eq!(
            encode_lock(mask),
            Err(OrientationError::UnrepresentableMask(mask))
        );
        assert_eq!(
            encode_lock(OrientationMask::UNKNOWN),
            Err(OrientationError::UnrepresentableMask(OrientationMask::UNKNOWN))
        );
        assert!(encode_lock(OrientationMask::empty()).is_err());
    }

    #[test]
    fn test_lock_enum_matches_table() {
        for lock in OrientationLock::ALL {
            assert_eq!(OrientationLock::from_code(lock.code()).unwrap(), lock);
            assert_eq!(decode_lock(lock.code()).unwrap(), lock.mask());
        }
    }

    #[test]
    fn test_default_orientation_precedence() {
        assert_eq!(
            default_orientation(OrientationMask::ALL).unwrap(),
            Orientation::Portrait
        );
        assert_eq!(
            default_orientation(OrientationMask::ALL_LANDSCAPE).unwrap(),
            Orientation::LandscapeLeft
        );
        assert_eq!(
            default_orientation(
                OrientationMask::PORTRAIT_UPSIDE_DOWN | OrientationMask::LANDSCAPE_RIGHT
            )
            .unwrap(),
            Orientation::PortraitUpsideDown
        );
        assert_eq!(
            default_orientation(OrientationMask::LANDSCAPE_RIGHT).unwrap(),
            Orientation::LandscapeRight
        );
    }

    #[test]
    fn test_default_orientation_ignores_unknown_flag() {
        assert_eq!(
            default_orientation(OrientationMask::UNKNOWN),
            Err(OrientationError::EmptyMask)
        );
        assert_eq!(
            default_orientation(OrientationMask::empty()),
            Err(OrientationError::EmptyMask)
        );
        assert_eq!(
            default_orientation(OrientationMask::UNKNOWN | OrientationMask::LANDSCAPE_RIGHT)
                .unwrap(),
            Orientation::LandscapeRight
        );
    }

    #[test]
    fn test_capability_filtering() {
        let phone = PlatformCapabilities::phone();
        assert!(supports_mask(OrientationMask::ALL, &phone));
        assert!(!supports_mask(OrientationMask::PORTRAIT_UPSIDE_DOWN, &phone));
        assert_eq!(
            resolve_mask(OrientationMask::ALL_PORTRAIT, &phone),
            OrientationMask::PORTRAIT
        );

        let landscape_only = PlatformCapabilities::new(OrientationMask::ALL_LANDSCAPE);
        assert_eq!(
            default_orientation_for(OrientationMask::ALL, &landscape_only).unwrap(),
            Orientation::LandscapeLeft
        );
        assert_eq!(
            default_orientation_for(OrientationMask::ALL_PORTRAIT, &landscape_only),
            Err(OrientationError::EmptyMask)
        );
    }

    #[test]
    fn test_capabilities_as_plain_mask() {
        let caps = OrientationMask::PORTRAIT;
        assert!(supports_mask(OrientationMask::ALL, &caps));
        let dynamic: &dyn OrientationCapabilities = &caps;
        assert!(!supports_mask(OrientationMask::ALL_LANDSCAPE, dynamic));
    }

    #[test]
    fn test_unknown_never_supported() {
        let caps = PlatformCapabilities::tablet();
        assert!(!supports_mask(OrientationMask::UNKNOWN, &caps));
        assert!(!supports_mask(
            OrientationMask::UNKNOWN,
            &(OrientationMask::UNKNOWN | OrientationMask::ALL)
        ));
    }

    #[test]
    fn test_device_mapping() {
        assert_eq!(
            map_device_orientation(DeviceOrientation::Portrait).unwrap(),
            Orientation::Portrait
        );
        assert_eq!(
            map_device_orientation(DeviceOrientation::PortraitUpsideDown).unwrap(),
            Orientation::PortraitUpsideDown
        );
        assert_eq!(
            map_device_orientation(DeviceOrientation::LandscapeLeft).unwrap(),
            Orientation::LandscapeRight
        );
        assert_eq!(
            map_device_orientation(DeviceOrientation::LandscapeRight).unwrap(),
            Orientation::LandscapeLeft
        );
        for device in [
            DeviceOrientation::FaceUp,
            DeviceOrientation::FaceDown,
            DeviceOrientation::Unknown,
        ] {
            assert_eq!(
                map_device_orientation(device),
                Err(OrientationError::NoInterfaceOrientation(device))
            );
        }
    }

    #[test]
    fn test_orientation_codes() {
        assert_eq!(encode_orientation(Orientation::Unknown), 0);
        assert_eq!(encode_orientation(Orientation::Portrait), 1);
        assert_eq!(encode_orientation(Orientation::LandscapeRight), 4);
        assert_eq!(decode_orientation(3).unwrap(), Orientation::LandscapeLeft);
        assert_eq!(
            decode_orientation(5),
            Err(OrientationError::UnsupportedOrientationCode(5))
        );
        assert_eq!(
            decode_orientation(-1),
            Err(OrientationError::UnsupportedOrientationCode(-1))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            OrientationError::UnsupportedLockCode(42).to_string(),
            "unsupported orientation lock code: 42"
        );
        assert_eq!(
            OrientationError::EmptyMask.to_string(),
            "orientation mask contains no concrete orientation"
        );
    }
}
