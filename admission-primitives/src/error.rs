//! Shared error definitions for admission primitives.

use thiserror::Error;
use uuid::Error as UuidError;

/// Errors that can occur while parsing or building admission primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The request uid is not a UUID, or is the nil UUID.
    #[error("invalid request uid `{value}`")]
    InvalidRequestUid {
        /// The offending uid string.
        value: String,
        /// Parse failure, absent when the uid was nil.
        #[source]
        source: Option<UuidError>,
    },

    /// The operation string is not one the host pipeline emits.
    #[error("invalid admission operation `{value}`")]
    InvalidOperation {
        /// The offending operation string.
        value: String,
    },
}
