//! Typed iterators over collection endpoints.

use std::fmt;
use std::iter::FusedIterator;

use serde_json::Value;

use crate::clients::BoxApiConnection;
use crate::pagination::JsonIterator;
use crate::resources::errors::ResourceError;
use crate::resources::{Collaboration, Info, ItemInfo, User};

type Convert<T> = fn(&BoxApiConnection, Value) -> Result<T, ResourceError>;

/// A lazy iterator that turns raw collection entries into typed values.
///
/// Paging, filtering and the `has_next`/`next` contract are those of
/// [`JsonIterator`]. Each entry is converted on the way out; a conversion
/// failure is yielded as an error for that entry and iteration continues.
pub struct ResourceIterator<T> {
    api: BoxApiConnection,
    entries: JsonIterator,
    convert: Convert<T>,
}

/// Iterates the items of a folder.
pub type ItemIterator = ResourceIterator<ItemInfo>;

/// Iterates users.
pub type UserIterator = ResourceIterator<Info<User>>;

/// Iterates collaborations.
pub type CollaborationIterator = ResourceIterator<Info<Collaboration>>;

impl<T> ResourceIterator<T> {
    pub(crate) fn new(api: BoxApiConnection, entries: JsonIterator, convert: Convert<T>) -> Self {
        Self {
            api,
            entries,
            convert,
        }
    }

    /// Returns `true` if another entry is available, fetching a page if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Iteration`] if a page fetch fails.
    pub fn has_next(&mut self) -> Result<bool, ResourceError> {
        Ok(self.entries.has_next()?)
    }

    /// Returns the next entry, converted.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Iteration`] wrapping
    /// [`IterationError::NoSuchElement`](crate::pagination::IterationError::NoSuchElement)
    /// if the iterator is exhausted, or the conversion error for this entry.
    pub fn next_item(&mut self) -> Result<T, ResourceError> {
        let entry = self.entries.next_entry()?;
        (self.convert)(&self.api, entry)
    }

    /// Removal is not supported.
    ///
    /// # Errors
    ///
    /// Always returns
    /// [`IterationError::UnsupportedOperation`](crate::pagination::IterationError::UnsupportedOperation).
    pub fn remove(&mut self) -> Result<(), ResourceError> {
        Ok(self.entries.remove()?)
    }

    /// Returns the collection size reported by the first page, once fetched.
    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.entries.total_count()
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.entries.limit()
    }
}

impl<T> fmt::Debug for ResourceIterator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceIterator")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl<T> Iterator for ResourceIterator<T> {
    type Item = Result<T, ResourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.entries.next()? {
            Ok(entry) => Some((self.convert)(&self.api, entry)),
            Err(error) => Some(Err(error.into())),
        }
    }
}

impl<T> FusedIterator for ResourceIterator<T> {}
