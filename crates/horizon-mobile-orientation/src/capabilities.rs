//! Platform orientation capabilities.
//!
//! The set of orientations a device can present is host knowledge (phones
//! usually refuse upside-down portrait, an app manifest may drop landscape).
//! The resolver only consumes it through [`OrientationCapabilities`].

use crate::orientation::{Orientation, OrientationMask};

/// Source of the orientations the current platform can present.
pub trait OrientationCapabilities: Send + Sync {
    /// The presentable orientations. `UNKNOWN` is ignored if present.
    fn supported_orientations(&self) -> OrientationMask;
}

/// A fixed capability set.
///
/// # Example
///
/// ```
/// use horizon_mobile_orientation::{Orientation, PlatformCapabilities};
///
/// let caps = PlatformCapabilities::tablet().without(Orientation::PortraitUpsideDown);
/// assert_eq!(caps, PlatformCapabilities::phone());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlatformCapabilities {
    supported: OrientationMask,
}

impl PlatformCapabilities {
    /// Capabilities presenting exactly the concrete orientations in `supported`.
    pub const fn new(supported: OrientationMask) -> Self {
        Self {
            supported: supported.concrete(),
        }
    }

    /// Typical phone: everything except upside-down portrait.
    pub const fn phone() -> Self {
        Self::new(OrientationMask::ALL_BUT_UPSIDE_DOWN)
    }

    /// Typical tablet: all four orientations.
    pub const fn tablet() -> Self {
        Self::new(OrientationMask::ALL)
    }

    /// Add an orientation.
    pub fn with(self, orientation: Orientation) -> Self {
        Self::new(self.supported | orientation.mask())
    }

    /// Remove an orientation.
    pub fn without(self, orientation: Orientation) -> Self {
        Self::new(self.supported - orientation.mask())
    }

    /// Whether `orientation` can be presented.
    pub fn supports(&self, orientation: Orientation) -> bool {
        self.supported.contains(orientation.mask())
    }
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self::phone()
    }
}

impl OrientationCapabilities for PlatformCapabilities {
    fn supported_orientations(&self) -> OrientationMask {
        self.supported
    }
}

impl OrientationCapabilities for OrientationMask {
    fn supported_orientations(&self) -> OrientationMask {
        *self
    }
}
