use std::str::Utf8Error;

/// Result type alias for autoguard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for autoguard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// FFI errors from release-managed foreign pointers
    #[error("FFI operation '{operation}' failed: {message}")]
    Ffi { operation: String, message: String },

    /// UTF-8 validation errors for foreign strings
    #[error("invalid UTF-8 in foreign string: {source}")]
    Utf8 {
        #[source]
        source: Utf8Error,
    },
}

// Conversion implementations
impl From<Utf8Error> for Error {
    fn from(error: Utf8Error) -> Self {
        Error::Utf8 { source: error }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create an FFI error
    #[must_use]
    pub fn ffi(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Ffi {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add the name of the failing operation to a Result
    fn context(self, operation: impl Into<String>) -> Result<T>;

    /// Add the name of the failing operation with a lazy message
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, operation: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Ffi {
                operation: operation.into(),
                message: base_error.to_string(),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let base_error = e.into();
            Error::Ffi {
                operation: f(),
                message: base_error.to_string(),
            }
        })
    }
}
