//! Error types for paginated iteration.

use thiserror::Error;

use crate::clients::HttpError;

/// Errors raised by [`JsonIterator`](crate::pagination::JsonIterator).
///
/// # Example
///
/// ```rust
/// use box_sdk::pagination::IterationError;
///
/// let error = IterationError::UnsupportedOperation { operation: "remove" };
/// assert_eq!(error.to_string(), "Operation 'remove' is not supported by this iterator");
/// ```
#[derive(Debug, Error)]
pub enum IterationError {
    /// `next` was called on an exhausted iterator.
    #[error("The iterator has no more elements")]
    NoSuchElement,

    /// The iterator does not implement the requested operation.
    #[error("Operation '{operation}' is not supported by this iterator")]
    UnsupportedOperation {
        /// The name of the rejected operation.
        operation: &'static str,
    },

    /// A page response did not have the collection shape.
    #[error("Malformed collection page: {reason}")]
    MalformedPage {
        /// What was wrong with the page.
        reason: String,
    },

    /// Fetching a page failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}
