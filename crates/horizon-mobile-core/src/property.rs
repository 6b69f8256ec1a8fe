//! Change-detecting properties for shadow node attributes.
//!
//! A [`Property`] wraps an attribute value and reports whether a write
//! actually changed it. Node types use that result to decide whether to
//! emit a change signal and invalidate layout, so writing an equal value is
//! free of side effects.
//!
//! # Example
//!
//! ```
//! use horizon_mobile_core::property::Property;
//!
//! let text: Property<Option<String>> = Property::default();
//! assert!(text.set(Some("hello".to_string())));
//! assert!(!text.set(Some("hello".to_string())));
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value with change detection.
///
/// Writes replace the whole value; readers never observe a partially
/// applied update.
///
/// # Thread Safety
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a copy of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if it changed.
    ///
    /// Equal values leave the property untouched.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Set the value, returning the previous one if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current == value {
            None
        } else {
            Some(std::mem::replace(&mut *current, value))
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(Property<Option<String>>: Send, Sync);
