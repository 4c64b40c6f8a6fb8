//! Lazy offset pagination over collection endpoints.

use std::fmt;
use std::iter::FusedIterator;

use serde_json::Value;

use crate::clients::{BoxApiConnection, HttpMethod, HttpRequest};
use crate::pagination::errors::IterationError;
use crate::pagination::filter::{EmptyFilter, Filter};

/// One page of a collection response.
///
/// Collection endpoints answer with
/// `{"total_count": N, "entries": [...], "offset": O, "limit": L}`.
/// Only `entries` is required.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    /// The size of the whole collection, when the server reports it.
    pub total_count: Option<u64>,
    /// The entries of this page, in server order.
    pub entries: Vec<Value>,
    /// The offset the server applied.
    pub offset: Option<u64>,
    /// The limit the server applied.
    pub limit: Option<u64>,
}

impl Page {
    /// Interprets a response body as a collection page.
    ///
    /// # Errors
    ///
    /// Returns [`IterationError::MalformedPage`] if the body is not an object
    /// or has no `entries` array.
    pub fn from_json(body: Value) -> Result<Self, IterationError> {
        let Value::Object(mut object) = body else {
            return Err(IterationError::MalformedPage {
                reason: "response body is not a JSON object".to_string(),
            });
        };

        let entries = match object.remove("entries") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(IterationError::MalformedPage {
                    reason: "'entries' is not an array".to_string(),
                })
            }
            None => {
                return Err(IterationError::MalformedPage {
                    reason: "missing 'entries'".to_string(),
                })
            }
        };

        let number = |name: &str| object.get(name).and_then(Value::as_u64);

        Ok(Self {
            total_count: number("total_count"),
            entries,
            offset: number("offset"),
            limit: number("limit"),
        })
    }
}

/// Where the iterator stands within the collection.
#[derive(Debug)]
enum Cursor {
    /// No page fetched yet.
    Empty,
    /// A page is buffered; `index` is the next unconsumed entry.
    Buffered { entries: Vec<Value>, index: usize },
    /// No further entries will be produced.
    Exhausted,
}

/// A lazy, single-pass iterator over the raw entries of a collection endpoint.
///
/// Pages are requested with `limit` and `offset` query parameters, strictly
/// in increasing offset order, and only when the buffered page is used up.
/// Entries are yielded in server order after applying the filter; nothing is
/// re-ordered or de-duplicated.
///
/// # Consistency
///
/// `total_count` is read from the first page and kept as a snapshot. If the
/// collection changes on the server while iterating, later pages may skip or
/// repeat entries, and the iteration still stops at the snapshot total. A
/// fresh pass needs a fresh iterator.
///
/// # Example
///
/// ```rust,ignore
/// use box_sdk::pagination::JsonIterator;
///
/// let mut entries = JsonIterator::new(api.clone(), "folders/0/items", 100);
/// while entries.has_next()? {
///     let entry = entries.next_entry()?;
///     println!("{} {}", entry["type"], entry["name"]);
/// }
/// ```
pub struct JsonIterator {
    api: BoxApiConnection,
    request: HttpRequest,
    limit: u64,
    next_offset: u64,
    total_count: Option<u64>,
    more_pages: bool,
    pages_fetched: usize,
    filter: Box<dyn Filter>,
    cursor: Cursor,
}

impl JsonIterator {
    /// Creates an iterator over a collection path with the given page size.
    ///
    /// A `limit` of zero is treated as one.
    #[must_use]
    pub fn new(api: BoxApiConnection, path: impl Into<String>, limit: u64) -> Self {
        let request = HttpRequest {
            http_method: HttpMethod::Get,
            path: path.into(),
            target: crate::clients::RequestTarget::Api,
            body: None,
            query: Vec::new(),
            extra_headers: Vec::new(),
        };
        Self::with_request(api, request, limit)
    }

    /// Creates an iterator from a request template.
    ///
    /// The template's own query parameters (e.g. `fields` or `filter_term`)
    /// are sent with every page; `limit` and `offset` are set per page.
    #[must_use]
    pub fn with_request(api: BoxApiConnection, request: HttpRequest, limit: u64) -> Self {
        Self {
            api,
            request,
            limit: limit.max(1),
            next_offset: 0,
            total_count: None,
            more_pages: true,
            pages_fetched: 0,
            filter: Box::new(EmptyFilter),
            cursor: Cursor::Empty,
        }
    }

    /// Replaces the inclusion filter.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Adds a query parameter sent with every page request.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.set_query_param(key, value);
        self
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Returns the collection size reported by the first page, once fetched.
    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Returns how many pages have been requested so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns `true` if another filter-passing entry is available.
    ///
    /// When the buffered page is used up and more pages exist, this fetches
    /// pages until it finds an entry that passes the filter or the collection
    /// ends. Calling it repeatedly without [`next_entry`](Self::next_entry)
    /// neither fetches again nor skips an entry.
    ///
    /// # Errors
    ///
    /// Returns [`IterationError::Http`] or [`IterationError::MalformedPage`]
    /// if a page fetch fails. The iterator is exhausted afterwards.
    pub fn has_next(&mut self) -> Result<bool, IterationError> {
        loop {
            match &mut self.cursor {
                Cursor::Exhausted => return Ok(false),
                Cursor::Buffered { entries, index } => {
                    while *index < entries.len() && !self.filter.should_include(&entries[*index]) {
                        *index += 1;
                    }
                    if *index < entries.len() {
                        return Ok(true);
                    }
                }
                Cursor::Empty => {}
            }

            if !self.more_pages {
                self.cursor = Cursor::Exhausted;
                return Ok(false);
            }

            match self.load_next_page() {
                Ok(entries) => self.cursor = Cursor::Buffered { entries, index: 0 },
                Err(error) => {
                    self.more_pages = false;
                    self.cursor = Cursor::Exhausted;
                    return Err(error);
                }
            }
        }
    }

    /// Returns the next filter-passing entry.
    ///
    /// # Errors
    ///
    /// Returns [`IterationError::NoSuchElement`] if the iterator is exhausted,
    /// or a fetch error from [`has_next`](Self::has_next).
    pub fn next_entry(&mut self) -> Result<Value, IterationError> {
        if !self.has_next()? {
            return Err(IterationError::NoSuchElement);
        }

        match &mut self.cursor {
            Cursor::Buffered { entries, index } => {
                let entry = std::mem::take(&mut entries[*index]);
                *index += 1;
                Ok(entry)
            }
            Cursor::Empty | Cursor::Exhausted => Err(IterationError::NoSuchElement),
        }
    }

    /// Removal is not supported; iteration is read-only.
    ///
    /// # Errors
    ///
    /// Always returns [`IterationError::UnsupportedOperation`].
    pub fn remove(&mut self) -> Result<(), IterationError> {
        Err(IterationError::UnsupportedOperation {
            operation: "remove",
        })
    }

    fn load_next_page(&mut self) -> Result<Vec<Value>, IterationError> {
        let mut request = self.request.clone();
        request.set_query_param("limit", self.limit.to_string());
        request.set_query_param("offset", self.next_offset.to_string());

        tracing::debug!(
            path = %request.path,
            offset = self.next_offset,
            limit = self.limit,
            "Fetching collection page"
        );

        let body = self.api.send(request)?.into_json()?;
        let page = Page::from_json(body)?;

        if self.pages_fetched == 0 {
            self.total_count = page.total_count;
        } else if let (Some(snapshot), Some(current)) = (self.total_count, page.total_count) {
            if snapshot != current {
                tracing::warn!(
                    path = %self.request.path,
                    snapshot,
                    current,
                    "Collection size changed during iteration; keeping the first page's total_count"
                );
            }
        }
        self.pages_fetched += 1;

        let returned = u64::try_from(page.entries.len()).unwrap_or(u64::MAX);
        self.next_offset = self.next_offset.saturating_add(returned);
        self.more_pages =
            returned > 0 && self.total_count.map_or(true, |total| self.next_offset < total);

        Ok(page.entries)
    }
}

impl fmt::Debug for JsonIterator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonIterator")
            .field("path", &self.request.path)
            .field("limit", &self.limit)
            .field("next_offset", &self.next_offset)
            .field("total_count", &self.total_count)
            .field("more_pages", &self.more_pages)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl Iterator for JsonIterator {
    type Item = Result<Value, IterationError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_entry() {
            Ok(entry) => Some(Ok(entry)),
            Err(IterationError::NoSuchElement) => None,
            Err(error) => Some(Err(error)),
        }
    }
}

impl FusedIterator for JsonIterator {}
