//! Owned pointer bindings for foreign allocations
//!
//! Wraps a raw pointer together with the release function named at the
//! binding site, so the allocation is released when the binding goes out of
//! scope. A null pointer means the binding owns nothing and release is
//! skipped.

use std::fmt;
use std::mem;
use std::ptr;

use tracing::trace;

/// A pointer binding that releases its allocation when dropped.
///
/// The binding is empty when the pointer is null; an empty binding never
/// invokes its release function. Ownership can be moved out with
/// [`steal`](OwnedPtr::steal) or released early with
/// [`clear`](OwnedPtr::clear).
pub struct OwnedPtr<T, F = fn(*mut T)>
where
    F: FnMut(*mut T),
{
    ptr: *mut T,
    release: F,
}

impl<T, F> OwnedPtr<T, F>
where
    F: FnMut(*mut T),
{
    /// Bind `ptr` to `release`.
    ///
    /// The release function is invoked with the pointer at most once, and
    /// never with null. The caller keeps the usual raw-pointer obligations:
    /// `ptr` must be releasable by `release` and must not be owned by any
    /// other binding.
    pub fn new(ptr: *mut T, release: F) -> Self {
        Self { ptr, release }
    }

    /// Create an empty binding that can be filled later with [`set`](OwnedPtr::set).
    pub fn empty(release: F) -> Self {
        Self {
            ptr: ptr::null_mut(),
            release,
        }
    }

    /// Checks if the binding is empty
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Get the held pointer without affecting ownership
    pub fn as_ptr(&self) -> *mut T {
        self.ptr
    }

    /// Release the current allocation, if any, and take ownership of `ptr`.
    pub fn set(&mut self, ptr: *mut T) {
        self.clear();
        self.ptr = ptr;
    }

    /// Move the pointer out of the binding, leaving it empty.
    ///
    /// The binding will not release the stolen pointer; the caller becomes
    /// responsible for it. Stealing an empty binding returns null.
    #[must_use]
    pub fn steal(&mut self) -> *mut T {
        mem::replace(&mut self.ptr, ptr::null_mut())
    }

    /// Release the allocation now instead of at scope exit.
    ///
    /// The binding is reset to empty before the release function runs, so a
    /// later drop cannot release the same pointer again. A no-op if the
    /// binding is already empty.
    pub fn clear(&mut self) {
        if !self.ptr.is_null() {
            let ptr = mem::replace(&mut self.ptr, ptr::null_mut());
            trace!(?ptr, "releasing pointer binding");
            (self.release)(ptr);
        }
    }
}

impl<T> OwnedPtr<T> {
    /// Bind an allocation obtained from the C allocator to `libc::free`.
    ///
    /// # Safety
    /// The caller must ensure that:
    /// - `ptr` is either null or was returned by `malloc`/`calloc`/`realloc`
    /// - The pointer has not been freed already
    /// - The pointer will not be used after this binding releases it
    pub unsafe fn from_malloc(ptr: *mut T) -> Self {
        Self::new(ptr, free_raw::<T>)
    }
}

impl<T, F> fmt::Debug for OwnedPtr<T, F>
where
    F: FnMut(*mut T),
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedPtr")
            .field("ptr", &self.ptr)
            .finish_non_exhaustive()
    }
}

impl<T, F> Drop for OwnedPtr<T, F>
where
    F: FnMut(*mut T),
{
    fn drop(&mut self) {
        self.clear();
    }
}

fn free_raw<T>(ptr: *mut T) {
    // Safety: only reachable through `from_malloc`, whose contract requires
    // a live allocation from the C allocator. Null is filtered out before
    // any release call.
    unsafe { libc::free(ptr.cast::<libc::c_void>()) }
}
