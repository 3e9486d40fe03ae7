//! Property system for swipe-deck.
//!
//! A [`Property<T>`] wraps a value behind a lock and reports whether writes
//! actually changed it. A [`PropertyReader<T>`] is a cloneable read-only view
//! of a shared property; the deck hands readers to the host so that callbacks
//! can observe deck state while the deck itself is still mid-operation.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use swipe_deck_core::{Property, PropertyReader};
//!
//! let index = Arc::new(Property::new(0usize));
//! let reader = PropertyReader::new(index.clone());
//!
//! assert!(index.set(1));
//! assert!(!index.set(1));
//! assert_eq!(reader.get(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// A value cell with change detection.
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

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
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

    /// Overwrite the value unconditionally.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
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

/// A cloneable, read-only handle to a shared [`Property`].
pub struct PropertyReader<T> {
    inner: Arc<Property<T>>,
}

impl<T: Clone> PropertyReader<T> {
    /// Create a reader over a shared property.
    pub fn new(property: Arc<Property<T>>) -> Self {
        Self { inner: property }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Access the value through a closure.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.with(f)
    }
}

impl<T> Clone for PropertyReader<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for PropertyReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PropertyReader").field(&self.get()).finish()
    }
}
