//! Orientation value types.
//!
//! - [`OrientationMask`] - a set of allowed interface orientations
//! - [`Orientation`] - a single interface orientation
//! - [`DeviceOrientation`] - a raw physical reading from the device sensors
//! - [`OrientationLock`] - the named application-level lock values
//!
//! All of these are small `Copy` values; updates replace them wholesale.

bitflags::bitflags! {
    /// A set of interface orientations.
    ///
    /// Bits are laid out in [`Orientation`] ordinal order, so the lowest set
    /// bit is the lowest-ordinal orientation. `UNKNOWN` is a sentinel for "no
    /// constraint known" and is never combined with the other flags in a mask
    /// used for selection; [`OrientationMask::concrete`] strips it.
    ///
    /// Combine with bitwise OR: `OrientationMask::PORTRAIT | OrientationMask::LANDSCAPE_LEFT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OrientationMask: u8 {
        const UNKNOWN = 1 << 0;
        const PORTRAIT = 1 << 1;
        const PORTRAIT_UPSIDE_DOWN = 1 << 2;
        const LANDSCAPE_LEFT = 1 << 3;
        const LANDSCAPE_RIGHT = 1 << 4;

        const ALL_PORTRAIT = Self::PORTRAIT.bits() | Self::PORTRAIT_UPSIDE_DOWN.bits();
        const ALL_LANDSCAPE = Self::LANDSCAPE_LEFT.bits() | Self::LANDSCAPE_RIGHT.bits();
        const ALL_BUT_UPSIDE_DOWN = Self::PORTRAIT.bits() | Self::ALL_LANDSCAPE.bits();
        const ALL = Self::ALL_PORTRAIT.bits() | Self::ALL_LANDSCAPE.bits();
    }
}

impl OrientationMask {
    /// The mask with the `UNKNOWN` sentinel removed.
    #[inline]
    pub const fn concrete(self) -> Self {
        self.intersection(Self::ALL)
    }

    /// The concrete orientations in this mask, in ordinal order.
    pub fn orientations(self) -> impl Iterator<Item = Orientation> {
        Orientation::CONCRETE
            .into_iter()
            .filter(move |orientation| self.contains(orientation.mask()))
    }
}

impl From<Orientation> for OrientationMask {
    fn from(orientation: Orientation) -> Self {
        orientation.mask()
    }
}

/// A single interface orientation.
///
/// Variants are declared in ordinal order; that order decides ties when a
/// default orientation is picked from a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Not known yet.
    #[default]
    Unknown = 0,
    /// Upright portrait.
    Portrait = 1,
    /// Portrait, rotated 180 degrees.
    PortraitUpsideDown = 2,
    /// Landscape with the top of the interface on the left.
    LandscapeLeft = 3,
    /// Landscape with the top of the interface on the right.
    LandscapeRight = 4,
}

impl Orientation {
    /// Every orientation except `Unknown`, in ordinal order.
    pub const CONCRETE: [Orientation; 4] = [
        Orientation::Portrait,
        Orientation::PortraitUpsideDown,
        Orientation::LandscapeLeft,
        Orientation::LandscapeRight,
    ];

    /// The single-bit mask for this orientation.
    pub const fn mask(self) -> OrientationMask {
        match self {
            Self::Unknown => OrientationMask::UNKNOWN,
            Self::Portrait => OrientationMask::PORTRAIT,
            Self::PortraitUpsideDown => OrientationMask::PORTRAIT_UPSIDE_DOWN,
            Self::LandscapeLeft => OrientationMask::LANDSCAPE_LEFT,
            Self::LandscapeRight => OrientationMask::LANDSCAPE_RIGHT,
        }
    }

    /// Whether this is one of the two portrait orientations.
    pub const fn is_portrait(self) -> bool {
        matches!(self, Self::Portrait | Self::PortraitUpsideDown)
    }

    /// Whether this is one of the two landscape orientations.
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::LandscapeLeft | Self::LandscapeRight)
    }
}

/// A physical orientation reported by the device sensors.
///
/// Unlike [`Orientation`], this includes readings that say nothing about
/// how the interface should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceOrientation {
    Unknown,
    Portrait,
    PortraitUpsideDown,
    /// Device rotated with its top edge to the left.
    LandscapeLeft,
    /// Device rotated with its top edge to the right.
    LandscapeRight,
    /// Lying flat, screen up.
    FaceUp,
    /// Lying flat, screen down.
    FaceDown,
}

/// The orientation locks an application can request.
///
/// The discriminant is the wire code used in application configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum OrientationLock {
    /// Platform default: every orientation except upside-down portrait.
    Default = 0,
    All = 1,
    /// Either portrait orientation.
    Portrait = 2,
    PortraitUp = 3,
    PortraitDown = 4,
    /// Either landscape orientation.
    Landscape = 5,
    LandscapeLeft = 6,
    LandscapeRight = 7,
}

impl OrientationLock {
    /// The wire code for this lock.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }
}
