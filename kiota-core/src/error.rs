//! Error types for kiota.
//!
//! Middleware in kiota does not introduce error kinds of its own on the
//! request path: errors of the wrapped service are returned as-is.
//! The types here are for the edges, e.g. parsing configuration.

use std::{error::Error as StdError, fmt};

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// An error that only carries a human readable message.
pub struct OpaqueError {
    message: Box<str>,
}

impl OpaqueError {
    /// Create an [`OpaqueError`] from a displayable message.
    pub fn from_display(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string().into_boxed_str(),
        }
    }
}

impl fmt::Debug for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OpaqueError").field(&self.message).finish()
    }
}

impl fmt::Display for OpaqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for OpaqueError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_message() {
        let err = OpaqueError::from_display(format_args!("missing {:?}", '/'));
        assert_eq!(err.to_string(), "missing '/'");
        assert!(err.source().is_none());
    }

    #[test]
    fn boxed_keeps_message() {
        let boxed: BoxError = OpaqueError::from_display("missing separator").into();
        assert_eq!(boxed.to_string(), "missing separator");
        assert!(boxed.downcast_ref::<OpaqueError>().is_some());
    }
}
