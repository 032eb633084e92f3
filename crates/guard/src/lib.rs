//! Scope-bound automatic release for resources Rust's ownership cannot see
//!
//! This crate provides binding types that attach a release function to a
//! stack variable so the resource is released when the variable goes out of
//! scope, on every exit path including panic unwind, exactly once, and only
//! if the binding still owns the resource. Ownership can be moved out of a
//! binding with `steal`, or released early with `clear`.
//!
//! Two binding shapes cover the resources that need this:
//!
//! - [`OwnedPtr`] for raw pointers handed over an FFI boundary;
//! - [`OwnedHandle`] for opaque scalar handles (file descriptors, library
//!   ids) whose empty state is a designated nil sentinel rather than null.
//!
//! [`ScopeGuard`] and [`defer!`] cover arbitrary deferred work, and
//! [`OwnedCString`] applies the pointer binding to C strings returned from
//! foreign code.

pub mod defer;
pub mod ffi;
pub mod handle;
pub mod ptr;

pub use defer::{guard, ScopeGuard};
pub use ffi::OwnedCString;
pub use handle::OwnedHandle;
pub use ptr::OwnedPtr;
