//! Error types for the Ortho Frame toolkit
//!
//! Most of the math in this crate is deliberately unchecked. The variants
//! below cover the operations that validate their inputs (frustum
//! configuration, plane construction, frame validation), the mesh upload
//! state machine, text parsing, and failures reported by a graphics device.

use std::fmt;

/// Result type for toolkit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Toolkit errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Numeric input that would produce a degenerate result
    /// (zero-length vector, collinear points, near >= far, ...)
    DegenerateInput(String),

    /// Operation not allowed in the object's current state
    /// (drawing a mesh before upload, testing an untransformed frustum, ...)
    InvalidState(String),

    /// Invalid resource (empty vertex buffer, mismatched sizes, ...)
    InvalidResource(String),

    /// Malformed diagnostic text
    ParseError(String),

    /// Graphics device error
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DegenerateInput(msg) => write!(f, "Degenerate input: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
