//! Scope guards for arbitrary deferred work
//!
//! The general form the owned bindings are built around: a guard that owns a
//! value and runs a closure on it when the scope exits, however the scope
//! exits. The [`defer!`] macro binds an anonymous guard for plain deferred
//! statements.

use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};

/// A guard that runs its closure on the owned value at scope exit.
///
/// The closure runs exactly once, on normal exit or unwind, unless the guard
/// is defused with [`ScopeGuard::into_inner`]. The rest of the scope can
/// reach the owned value through `Deref`/`DerefMut`.
pub struct ScopeGuard<T, F>
where
    F: FnOnce(T),
{
    value: ManuallyDrop<T>,
    release: ManuallyDrop<F>,
}

/// Create a new [`ScopeGuard`] owning `value` with deferred closure `release`.
pub fn guard<T, F>(value: T, release: F) -> ScopeGuard<T, F>
where
    F: FnOnce(T),
{
    ScopeGuard {
        value: ManuallyDrop::new(value),
        release: ManuallyDrop::new(release),
    }
}

impl<T, F> ScopeGuard<T, F>
where
    F: FnOnce(T),
{
    /// Defuse the guard: return the owned value without running the closure.
    #[must_use]
    pub fn into_inner(guard: Self) -> T {
        let mut guard = ManuallyDrop::new(guard);
        // Safety: the guard itself is wrapped in ManuallyDrop, so its Drop
        // impl, the only other reader of these fields, will not run. Each
        // field is taken exactly once.
        unsafe {
            let value = ManuallyDrop::take(&mut guard.value);
            drop(ManuallyDrop::take(&mut guard.release));
            value
        }
    }
}

impl<T, F> Deref for ScopeGuard<T, F>
where
    F: FnOnce(T),
{
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T, F> DerefMut for ScopeGuard<T, F>
where
    F: FnOnce(T),
{
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T, F> Drop for ScopeGuard<T, F>
where
    F: FnOnce(T),
{
    fn drop(&mut self) {
        // Safety: drop runs at most once, and into_inner prevents it from
        // running at all, so both fields are still live here.
        let (value, release) = unsafe {
            (
                ManuallyDrop::take(&mut self.value),
                ManuallyDrop::take(&mut self.release),
            )
        };
        release(value);
    }
}

/// Run statements when the enclosing scope exits.
///
/// The statements are the body of a closure held by an anonymous
/// [`ScopeGuard`], so they run on every exit path, including unwind.
#[macro_export]
macro_rules! defer {
    ($($t:tt)*) => {
        let _guard = $crate::defer::guard((), |()| { $($t)* });
    };
}
