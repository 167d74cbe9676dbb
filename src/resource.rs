//! The contract a value must satisfy to live in an [`LruCache`](crate::LruCache).
//!
//! Cached values are identified by a string key (for tracks, the title), must be able
//! to produce an independent deep copy of themselves as an [`Owned`] handle, and may
//! run preparation steps before they are inserted.

use crate::error::CloneError;
use crate::handle::Owned;

/// A cloneable, keyed resource that the cache can own.
///
/// # Clone Contract
///
/// [`try_clone_owned`](Resource::try_clone_owned) must return a copy that shares no
/// mutable state with `self`: mutating the copy (including any internal buffers) must
/// never be observable on the original, and vice versa. Allocation failure while
/// copying is reported as [`CloneError`] rather than aborting.
pub trait Resource: Sized {
    /// Identity of the resource. Two resources with equal keys occupy the same cache entry.
    fn key(&self) -> &str;

    /// Produces an independent deep copy wrapped in an ownership handle.
    fn try_clone_owned(&self) -> Result<Owned<Self>, CloneError>;

    /// Runs the preparation steps applied to a fresh copy before it enters the cache.
    fn prepare(&mut self) {}

    /// Bytes of payload held by this resource, used for cache size accounting.
    fn payload_bytes(&self) -> u64 {
        0
    }
}
