//! Core error types for the `autoguard` workspace.
//!
//! This crate establishes the error handling used throughout the workspace.
//! The binder types themselves never fail; the failure modes live at the FFI
//! boundary where foreign strings are converted into Rust views.
//!
//! ## Key Components
//!
//! - **`errors`**: Defines the primary `Error` enum and `Result` type alias,
//!   centralizing all possible failure modes for predictable error handling.

pub mod errors;

pub use self::errors::{Error, Result, ResultExt};
