//! Exclusive Ownership Handle
//!
//! [`Owned<T>`] is a single-owner handle over at most one heap-allocated resource.
//! It is the currency of the cache: resources enter an [`LruCache`](crate::LruCache)
//! wrapped in a handle, slots keep them in a handle, and clones come back as handles.
//!
//! # Ownership Rules
//!
//! - A handle owns zero or one resource. There is no way for two handles to own the
//!   same allocation; transferring ownership always empties the source.
//! - The held resource is dropped exactly once: when the handle is dropped, reset, or
//!   cleared. [`release`](Owned::release) hands the resource to the caller without
//!   dropping it.
//! - Dereferencing an empty handle through [`get`](Owned::get) or
//!   [`get_mut`](Owned::get_mut) reports [`HandleError::Empty`] instead of panicking.
//!
//! ```
//! use deck_cache::Owned;
//!
//! let mut handle = Owned::new(String::from("Midnight Drive"));
//! assert!(handle.is_some());
//!
//! // Move the resource out; the source handle is left empty.
//! let moved = handle.take();
//! assert!(handle.is_empty());
//! assert_eq!(moved.get().unwrap(), "Midnight Drive");
//!
//! // Release hands the box to the caller without dropping it.
//! let mut moved = moved;
//! let raw = moved.release().unwrap();
//! assert!(moved.is_empty());
//! assert_eq!(*raw, "Midnight Drive");
//! ```

use crate::error::HandleError;
use core::fmt;

/// A move-only handle owning at most one boxed resource.
pub struct Owned<T> {
    inner: Option<Box<T>>,
}

impl<T> Owned<T> {
    /// Boxes `value` and takes ownership of it.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            inner: Some(Box::new(value)),
        }
    }

    /// Takes ownership of an already boxed resource.
    #[inline]
    pub fn from_box(value: Box<T>) -> Self {
        Self { inner: Some(value) }
    }

    /// Creates a handle that owns nothing.
    #[inline]
    pub const fn empty() -> Self {
        Self { inner: None }
    }

    #[inline]
    pub fn is_some(&self) -> bool {
        self.inner.is_some()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Returns a shared view of the owned resource.
    pub fn get(&self) -> Result<&T, HandleError> {
        self.inner.as_deref().ok_or(HandleError::Empty)
    }

    /// Returns a mutable view of the owned resource.
    pub fn get_mut(&mut self) -> Result<&mut T, HandleError> {
        self.inner.as_deref_mut().ok_or(HandleError::Empty)
    }

    /// Like [`get`](Self::get), for callers that treat emptiness as absence.
    #[inline]
    pub fn view(&self) -> Option<&T> {
        self.inner.as_deref()
    }

    #[inline]
    pub fn view_mut(&mut self) -> Option<&mut T> {
        self.inner.as_deref_mut()
    }

    /// Gives up ownership without dropping the resource.
    ///
    /// The handle is empty afterwards and the caller becomes the sole owner of the
    /// returned box.
    #[inline]
    pub fn release(&mut self) -> Option<Box<T>> {
        self.inner.take()
    }

    /// Drops the currently owned resource (if any) and adopts `value`.
    ///
    /// Because a `Box` cannot be owned twice, resetting a handle with the resource it
    /// already holds is not expressible; the old resource is always a different
    /// allocation and is dropped exactly once here.
    pub fn reset(&mut self, value: Option<Box<T>>) {
        // The old resource is gone before the new one is adopted.
        drop(self.inner.take());
        self.inner = value;
    }

    /// Drops the owned resource, leaving the handle empty. Idempotent.
    #[inline]
    pub fn clear(&mut self) {
        self.reset(None);
    }

    /// Moves ownership into a new handle, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            inner: self.inner.take(),
        }
    }

    /// Moves ownership from `source` into `self`, dropping whatever `self` held.
    ///
    /// `source` is empty afterwards. The borrow checker rules out `source` being
    /// `self`, so the self-transfer case cannot corrupt the handle.
    pub fn transfer_from(&mut self, source: &mut Self) {
        let incoming = source.inner.take();
        self.reset(incoming);
    }

    /// Consumes the handle, returning the owned box if there is one.
    #[inline]
    pub fn into_inner(self) -> Option<Box<T>> {
        self.inner
    }
}

impl<T> Default for Owned<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Box<T>> for Owned<T> {
    fn from(value: Box<T>) -> Self {
        Self::from_box(value)
    }
}

impl<T> From<Option<Box<T>>> for Owned<T> {
    fn from(value: Option<Box<T>>) -> Self {
        Self { inner: value }
    }
}

impl<T: fmt::Debug> fmt::Debug for Owned<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(value) => f.debug_tuple("Owned").field(value).finish(),
            None => f.write_str("Owned(<empty>)"),
        }
    }
}
