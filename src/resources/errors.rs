//! Error types for resource operations.

use thiserror::Error;

use crate::clients::HttpError;
use crate::pagination::IterationError;
use crate::resources::ResourceType;

/// Error type for resource facade operations.
///
/// # Example
///
/// ```rust,ignore
/// use box_sdk::resources::{Folder, ResourceError};
/// use box_sdk::clients::HttpError;
///
/// match folder.create_folder("Reports") {
///     Ok(created) => println!("Created {}", created.id()),
///     Err(ResourceError::Http(HttpError::Api(e))) if e.code == 409 => {
///         println!("A folder with that name already exists");
///     }
///     Err(e) => println!("Other error: {e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A successful response did not have the expected shape.
    #[error("Malformed {resource} response: {reason}")]
    MalformedResponse {
        /// The resource type the response was for.
        resource: ResourceType,
        /// What was wrong with the response.
        reason: String,
    },

    /// A collection entry had a type this SDK does not model.
    #[error("Unsupported item type: {item_type}")]
    UnsupportedItemType {
        /// The entry's `type` field.
        item_type: String,
    },

    /// A JSON document could not be parsed.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Reading local content (e.g. an upload source) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Paginated iteration failed.
    #[error(transparent)]
    Iteration(#[from] IterationError),
}

impl ResourceError {
    pub(crate) fn malformed(resource: ResourceType, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            resource,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_response_message() {
        let error = ResourceError::malformed(ResourceType::Folder, "missing 'id'");
        assert_eq!(error.to_string(), "Malformed folder response: missing 'id'");
    }

    #[test]
    fn test_unsupported_item_type_message() {
        let error = ResourceError::UnsupportedItemType {
            item_type: "web_link".to_string(),
        };
        assert!(error.to_string().contains("web_link"));
    }

    #[test]
    fn test_iteration_error_is_transparent() {
        let error: ResourceError = IterationError::NoSuchElement.into();
        assert_eq!(error.to_string(), "The iterator has no more elements");
    }
}
