//! Screen orientation controller.
//!
//! [`ScreenOrientationController`] is the stateful host-side companion of
//! the pure [`resolver`](crate::resolver). It owns the current lock and the
//! last known good orientation, applies application lock requests, filters
//! device rotation events through the lock, and notifies listeners.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_mobile_orientation::{
//!     ControllerConfig, DeviceOrientation, Orientation, OrientationLock, PlatformCapabilities,
//!     ScreenOrientationController,
//! };
//!
//! let controller = ScreenOrientationController::new(
//!     Arc::new(PlatformCapabilities::phone()),
//!     ControllerConfig::default(),
//! )
//! .unwrap();
//!
//! controller.orientation_changed().connect(|event| {
//!     println!("rotated to {:?}", event.orientation);
//! });
//!
//! // The device turns with its top edge to the left: the interface follows
//! // in landscape-right.
//! controller.handle_device_orientation(DeviceOrientation::LandscapeLeft);
//! assert_eq!(controller.orientation(), Orientation::LandscapeRight);
//!
//! // Locking to portrait forces the interface back upright.
//! let target = controller.lock(OrientationLock::PortraitUp.code()).unwrap();
//! assert_eq!(target, Orientation::Portrait);
//! ```

use std::fmt;
use std::sync::Arc;

use horizon_mobile_core::logging::targets;
use horizon_mobile_core::shadow::{LayoutInvalidation, NodeId};
use horizon_mobile_core::signal::Signal;
use parking_lot::RwLock;

use crate::capabilities::OrientationCapabilities;
use crate::error::{OrientationError, OrientationResult};
use crate::orientation::{DeviceOrientation, Orientation, OrientationLock, OrientationMask};
use crate::resolver;

/// Initial state for a [`ScreenOrientationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// The lock in effect before the application requests one.
    pub initial_lock: OrientationMask,
    /// The orientation the interface is presented in at startup.
    ///
    /// Replaced by the lock's default orientation if it is not allowed.
    pub initial_orientation: Orientation,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            initial_lock: OrientationLock::Default.mask(),
            initial_orientation: Orientation::Portrait,
        }
    }
}

impl ControllerConfig {
    /// Set the initial lock.
    pub fn with_initial_lock(mut self, lock: OrientationMask) -> Self {
        self.initial_lock = lock;
        self
    }

    /// Set the initial orientation.
    pub fn with_initial_orientation(mut self, orientation: Orientation) -> Self {
        self.initial_orientation = orientation;
        self
    }
}

/// Payload of [`ScreenOrientationController::orientation_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationChangeEvent {
    /// The orientation now presented.
    pub orientation: Orientation,
    /// The lock in effect.
    pub lock: OrientationMask,
}

impl OrientationChangeEvent {
    /// The orientation as reported to the application.
    pub fn orientation_code(&self) -> i32 {
        resolver::encode_orientation(self.orientation)
    }

    /// The lock as reported to the application.
    pub fn lock_code(&self) -> OrientationResult<i32> {
        resolver::encode_lock(self.lock)
    }
}

#[derive(Debug, Clone, Copy)]
struct ControllerState {
    lock: OrientationMask,
    orientation: Orientation,
}

/// Stateful orientation policy for one application window.
///
/// All operations are synchronous. State changes are applied under a write
/// lock and the signals are emitted after it is released, so listeners may
/// call back into the controller.
pub struct ScreenOrientationController {
    capabilities: Arc<dyn OrientationCapabilities>,
    state: RwLock<ControllerState>,
    layout_root: RwLock<Option<(Arc<dyn LayoutInvalidation>, NodeId)>>,
    orientation_changed: Signal<OrientationChangeEvent>,
    lock_changed: Signal<OrientationMask>,
}

impl ScreenOrientationController {
    /// Create a controller.
    ///
    /// Fails with [`OrientationError::UnsupportedMask`] if the platform can
    /// present none of the initial lock's orientations.
    pub fn new(
        capabilities: Arc<dyn OrientationCapabilities>,
        config: ControllerConfig,
    ) -> OrientationResult<Self> {
        let allowed = validated_candidates(config.initial_lock, capabilities.as_ref())?;
        let orientation = if resolver::mask_contains_orientation(allowed, config.initial_orientation)
        {
            config.initial_orientation
        } else {
            resolver::default_orientation(allowed)?
        };
        tracing::debug!(
            target: targets::ORIENTATION,
            lock = ?config.initial_lock,
            ?orientation,
            "orientation controller created"
        );

        Ok(Self {
            capabilities,
            state: RwLock::new(ControllerState {
                lock: config.initial_lock,
                orientation,
            }),
            layout_root: RwLock::new(None),
            orientation_changed: Signal::new(),
            lock_changed: Signal::new(),
        })
    }

    /// Apply a wire lock code and return the orientation to present.
    ///
    /// On error the previous lock stays in effect.
    pub fn lock(&self, code: i32) -> OrientationResult<Orientation> {
        let mask = resolver::decode_lock(code).inspect_err(|err| {
            tracing::warn!(target: targets::ORIENTATION, code, %err, "rejected orientation lock");
        })?;
        self.lock_platform(mask)
    }

    /// Apply a raw mask as the lock and return the orientation to present.
    ///
    /// The current orientation is kept if the new lock still allows it;
    /// otherwise the lock's default orientation is chosen. On error the
    /// previous lock stays in effect.
    pub fn lock_platform(&self, mask: OrientationMask) -> OrientationResult<Orientation> {
        let allowed = validated_candidates(mask, self.capabilities.as_ref()).inspect_err(|err| {
            tracing::warn!(target: targets::ORIENTATION, ?mask, %err, "rejected orientation lock");
        })?;

        let (previous, current) = {
            let mut state = self.state.write();
            let previous = *state;
            if !resolver::mask_contains_orientation(allowed, state.orientation) {
                state.orientation = resolver::default_orientation(allowed)?;
            }
            state.lock = mask;
            (previous, *state)
        };

        if previous.lock != current.lock {
            tracing::debug!(target: targets::ORIENTATION, lock = ?mask, "orientation lock changed");
            self.lock_changed.emit(mask);
        }
        if previous.orientation != current.orientation {
            self.notify_orientation(current);
        }
        Ok(current.orientation)
    }

    /// Return to the platform default lock.
    pub fn unlock(&self) -> OrientationResult<Orientation> {
        self.lock(OrientationLock::Default.code())
    }

    /// The current lock as a wire code.
    ///
    /// Fails with [`OrientationError::UnrepresentableMask`] when a raw mask
    /// applied through [`lock_platform`](Self::lock_platform) has no code.
    pub fn orientation_lock(&self) -> OrientationResult<i32> {
        resolver::encode_lock(self.state.read().lock)
    }

    /// The current lock as a mask.
    pub fn platform_orientation_lock(&self) -> OrientationMask {
        self.state.read().lock
    }

    /// The orientation currently presented.
    pub fn orientation(&self) -> Orientation {
        self.state.read().orientation
    }

    /// Whether the platform can honour the wire lock `code`.
    pub fn supports_orientation_lock(&self, code: i32) -> OrientationResult<bool> {
        let mask = resolver::decode_lock(code)?;
        Ok(resolver::supports_mask(mask, self.capabilities.as_ref()))
    }

    /// Feed a device rotation reading.
    ///
    /// Returns the new orientation if the interface should rotate. Readings
    /// without an interface orientation (flat, unknown), readings the lock
    /// or platform does not allow, and readings matching the current
    /// orientation return `None` and leave the state untouched.
    pub fn handle_device_orientation(&self, device: DeviceOrientation) -> Option<Orientation> {
        let orientation = match resolver::map_device_orientation(device) {
            Ok(orientation) => orientation,
            Err(err) => {
                tracing::trace!(target: targets::ORIENTATION, %err, "keeping last known orientation");
                return None;
            }
        };

        let current = {
            let mut state = self.state.write();
            let allowed = resolver::resolve_mask(state.lock, self.capabilities.as_ref());
            if !resolver::mask_contains_orientation(allowed, orientation) {
                tracing::trace!(
                    target: targets::ORIENTATION,
                    ?orientation,
                    lock = ?state.lock,
                    "device orientation outside lock, ignoring"
                );
                return None;
            }
            if state.orientation == orientation {
                return None;
            }
            state.orientation = orientation;
            *state
        };

        self.notify_orientation(current);
        Some(orientation)
    }

    /// Mark `root` of `tree` dirty on every orientation change.
    ///
    /// Replaces any previously attached root.
    pub fn attach_layout_root(&self, tree: Arc<dyn LayoutInvalidation>, root: NodeId) {
        *self.layout_root.write() = Some((tree, root));
    }

    /// Stop invalidating layout on orientation changes.
    pub fn detach_layout_root(&self) {
        *self.layout_root.write() = None;
    }

    /// Signal emitted after the presented orientation changes.
    pub fn orientation_changed(&self) -> &Signal<OrientationChangeEvent> {
        &self.orientation_changed
    }

    /// Signal emitted with the new mask after the lock changes.
    pub fn lock_changed(&self) -> &Signal<OrientationMask> {
        &self.lock_changed
    }

    fn notify_orientation(&self, state: ControllerState) {
        tracing::debug!(
            target: targets::ORIENTATION,
            orientation = ?state.orientation,
            "interface orientation changed"
        );
        let root = self.layout_root.read().clone();
        if let Some((tree, node)) = root {
            tree.mark_dirty(node);
        }
        self.orientation_changed.emit(OrientationChangeEvent {
            orientation: state.orientation,
            lock: state.lock,
        });
    }
}

impl fmt::Debug for ScreenOrientationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = *self.state.read();
        f.debug_struct("ScreenOrientationController")
            .field("lock", &state.lock)
            .field("orientation", &state.orientation)
            .field("supported", &self.capabilities.supported_orientations())
            .finish()
    }
}

/// The presentable orientations of a requested lock, or an error if the lock
/// is malformed or cannot be honoured.
fn validated_candidates(
    mask: OrientationMask,
    capabilities: &dyn OrientationCapabilities,
) -> OrientationResult<OrientationMask> {
    if mask.contains(OrientationMask::UNKNOWN) {
        return Err(OrientationError::UnsupportedMask(mask));
    }
    let allowed = resolver::resolve_mask(mask, capabilities);
    if allowed.is_empty() {
        return Err(OrientationError::UnsupportedMask(mask));
    }
    Ok(allowed)
}

static_assertions::assert_impl_all!(ScreenOrientationController: Send, Sync);
