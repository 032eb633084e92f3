//! Memory management for FFI strings
//!
//! Applies the pointer binding to C strings returned from foreign code,
//! which must be handed back to the allocator that produced them. The
//! conversion into Rust views is where this workspace's error surface lives.

use std::borrow::Cow;
use std::ffi::CStr;
use std::os::raw::c_char;

use autoguard_core::{Error, Result};

use crate::ptr::OwnedPtr;

/// A C string binding that releases its allocation when dropped.
///
/// Ensures a foreign string is handed back to its deallocator when the
/// binding goes out of scope, while offering borrowed `&str` views in the
/// meantime.
pub struct OwnedCString<F = fn(*mut c_char)>
where
    F: FnMut(*mut c_char),
{
    inner: OwnedPtr<c_char, F>,
}

impl<F> OwnedCString<F>
where
    F: FnMut(*mut c_char),
{
    /// Bind a foreign string to its release function.
    ///
    /// # Safety
    /// The caller must ensure that:
    /// - `ptr` is either null or a valid NUL-terminated string releasable by
    ///   `release`
    /// - The pointer has not been freed already
    /// - The pointer will not be used after this binding releases it
    pub unsafe fn new(ptr: *mut c_char, release: F) -> Self {
        Self {
            inner: OwnedPtr::new(ptr, release),
        }
    }

    /// Checks if the binding is empty
    pub fn is_null(&self) -> bool {
        self.inner.is_null()
    }

    /// Get the held pointer without affecting ownership
    pub fn as_ptr(&self) -> *const c_char {
        self.inner.as_ptr()
    }

    /// Borrow the string as UTF-8.
    ///
    /// Fails on an empty binding or when the bytes are not valid UTF-8.
    pub fn to_str(&self) -> Result<&str> {
        Ok(self.cstr("string_to_str")?.to_str()?)
    }

    /// Borrow the string, replacing invalid UTF-8 sequences.
    ///
    /// Only fails on an empty binding.
    pub fn to_string_lossy(&self) -> Result<Cow<'_, str>> {
        Ok(self.cstr("string_to_lossy")?.to_string_lossy())
    }

    /// Move the pointer out of the binding, leaving it empty.
    ///
    /// The binding will not release the stolen pointer; the caller becomes
    /// responsible for it.
    #[must_use]
    pub fn steal(&mut self) -> *mut c_char {
        self.inner.steal()
    }

    /// Release the allocation now instead of at scope exit.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    fn cstr(&self, operation: &str) -> Result<&CStr> {
        if self.inner.is_null() {
            return Err(Error::ffi(operation, "string pointer is null"));
        }
        // Safety: non-null checked above, and the construction contract
        // guarantees a valid NUL-terminated string for the binding's
        // lifetime.
        Ok(unsafe { CStr::from_ptr(self.inner.as_ptr()) })
    }
}

impl OwnedCString {
    /// Bind a string allocated by the C allocator to `libc::free`.
    ///
    /// # Safety
    /// Same contract as [`OwnedPtr::from_malloc`], with the addition that a
    /// non-null `ptr` must be NUL-terminated.
    pub unsafe fn from_malloc(ptr: *mut c_char) -> Self {
        Self {
            inner: OwnedPtr::from_malloc(ptr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::ffi::CString;
    use std::ptr;
    use std::rc::Rc;

    fn leaked(text: &[u8]) -> *mut c_char {
        CString::new(text).unwrap().into_raw()
    }

    fn reclaiming(count: &Rc<Cell<usize>>) -> impl FnMut(*mut c_char) {
        let count = Rc::clone(count);
        move |p: *mut c_char| {
            count.set(count.get() + 1);
            // Safety: the tests only bind pointers produced by
            // CString::into_raw, each owned by exactly one binding.
            drop(unsafe { CString::from_raw(p) });
        }
    }

    #[test]
    fn test_to_str_borrows_valid_utf8() {
        let count = Rc::new(Cell::new(0));
        {
            let owned = unsafe { OwnedCString::new(leaked(b"hello"), reclaiming(&count)) };
            assert_eq!(owned.to_str().unwrap(), "hello");
            assert_eq!(count.get(), 0);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_to_str_on_null_binding_fails() {
        let owned = unsafe { OwnedCString::new(ptr::null_mut(), |_| ()) };
        let err = owned.to_str().unwrap_err();
        assert!(matches!(err, Error::Ffi { .. }));
    }

    #[test]
    fn test_to_str_rejects_invalid_utf8() {
        let count = Rc::new(Cell::new(0));
        let owned = unsafe { OwnedCString::new(leaked(&[0xff, 0xfe]), reclaiming(&count)) };
        assert!(matches!(owned.to_str().unwrap_err(), Error::Utf8 { .. }));
        assert_eq!(owned.to_string_lossy().unwrap(), "\u{fffd}\u{fffd}");
    }

    #[test]
    fn test_steal_suppresses_release() {
        let count = Rc::new(Cell::new(0));
        let raw;
        {
            let mut owned = unsafe { OwnedCString::new(leaked(b"kept"), reclaiming(&count)) };
            raw = owned.steal();
            assert!(owned.is_null());
        }
        assert_eq!(count.get(), 0);
        // Safety: ownership was transferred back to the caller by steal.
        drop(unsafe { CString::from_raw(raw) });
    }

    #[test]
    fn test_clear_releases_immediately() {
        let count = Rc::new(Cell::new(0));
        let mut owned = unsafe { OwnedCString::new(leaked(b"gone"), reclaiming(&count)) };
        owned.clear();
        assert_eq!(count.get(), 1);
        assert!(owned.to_str().is_err());
        drop(owned);
        assert_eq!(count.get(), 1);
    }
}
