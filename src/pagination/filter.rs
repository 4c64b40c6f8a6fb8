//! Inclusion predicates applied to raw collection entries.

use serde_json::Value;

/// Decides whether a raw collection entry is yielded by an iterator.
///
/// Filters are stateless and must not depend on previously seen entries.
/// Closures of type `Fn(&Value) -> bool` implement this trait.
///
/// # Example
///
/// ```rust
/// use box_sdk::pagination::Filter;
/// use serde_json::json;
///
/// let only_folders = |entry: &serde_json::Value| entry["type"] == "folder";
/// assert!(only_folders.should_include(&json!({"type": "folder"})));
/// assert!(!only_folders.should_include(&json!({"type": "file"})));
/// ```
pub trait Filter: Send {
    /// Returns `true` if the entry should be yielded.
    fn should_include(&self, entry: &Value) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&Value) -> bool + Send,
{
    fn should_include(&self, entry: &Value) -> bool {
        self(entry)
    }
}

/// A filter that includes every entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmptyFilter;

impl Filter for EmptyFilter {
    fn should_include(&self, _entry: &Value) -> bool {
        true
    }
}

/// Includes entries whose `type` field is one of the given names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeFilter {
    types: Vec<String>,
}

impl TypeFilter {
    /// Creates a filter accepting the given entry types.
    #[must_use]
    pub fn new<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for TypeFilter {
    fn should_include(&self, entry: &Value) -> bool {
        entry
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|entry_type| self.types.iter().any(|t| t == entry_type))
    }
}
