//! Cache Slot
//!
//! A [`CacheSlot`] is one fixed cell of an [`LruCache`](crate::LruCache)'s backing
//! array. It owns at most one resource through an [`Owned`] handle and remembers the
//! logical time of its last access.
//!
//! # Timestamps
//!
//! `last_access` is a value of the owning cache's access counter, not wall-clock
//! time. It is only meaningful while the slot is occupied; an empty slot reports
//! `None` from [`CacheSlot::last_access`].
//!
//! # Charged bytes
//!
//! A slot also remembers how many payload bytes the cache's size metric counts for
//! it, so removal subtracts exactly what was added even if the resource changed
//! size while cached.

use crate::handle::Owned;
use core::fmt;

/// One storage cell: an optional owned resource plus its last access time.
pub struct CacheSlot<T> {
    handle: Owned<T>,
    last_access: u64,
    charged_bytes: u64,
}

impl<T> CacheSlot<T> {
    /// Creates an empty slot.
    #[inline]
    pub const fn new() -> Self {
        Self {
            handle: Owned::empty(),
            last_access: 0,
            charged_bytes: 0,
        }
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.handle.is_some()
    }

    /// The last access time, or `None` while the slot is empty.
    #[inline]
    pub fn last_access(&self) -> Option<u64> {
        self.is_occupied().then_some(self.last_access)
    }

    /// Takes ownership of `handle`'s resource and stamps it with `timestamp`.
    ///
    /// Anything the slot held before is dropped first.
    pub fn store(&mut self, mut handle: Owned<T>, timestamp: u64) {
        self.handle.transfer_from(&mut handle);
        self.last_access = timestamp;
        self.charged_bytes = 0;
    }

    /// Payload bytes the cache currently counts for this slot. Zero while empty.
    #[inline]
    pub fn charged_bytes(&self) -> u64 {
        self.charged_bytes
    }

    pub(crate) fn charge(&mut self, bytes: u64) {
        self.charged_bytes = bytes;
    }

    /// Refreshes the access time and returns a view of the resource.
    ///
    /// An empty slot returns `None` and keeps its timestamp.
    pub fn access(&mut self, timestamp: u64) -> Option<&T> {
        if !self.is_occupied() {
            return None;
        }
        self.last_access = timestamp;
        self.handle.view()
    }

    /// Like [`access`](Self::access), returning a mutable view.
    pub fn access_mut(&mut self, timestamp: u64) -> Option<&mut T> {
        if !self.is_occupied() {
            return None;
        }
        self.last_access = timestamp;
        self.handle.view_mut()
    }

    /// Returns a view of the resource without touching the access time.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.handle.view()
    }

    /// Drops the held resource (if any). Idempotent.
    pub fn clear(&mut self) {
        self.handle.clear();
        self.last_access = 0;
        self.charged_bytes = 0;
    }

    /// Moves the resource out of the slot, leaving it empty.
    pub(crate) fn take(&mut self) -> Owned<T> {
        self.last_access = 0;
        self.charged_bytes = 0;
        self.handle.take()
    }
}

impl<T> Default for CacheSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CacheSlot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSlot")
            .field("occupied", &self.is_occupied())
            .field("last_access", &self.last_access())
            .finish()
    }
}
