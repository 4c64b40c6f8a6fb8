//! Paginated iteration over collection endpoints.
//!
//! [`JsonIterator`] turns an offset-paginated collection endpoint into a
//! lazy sequence of raw JSON entries. Typed iterators in
//! [`resources`](crate::resources) wrap it to yield resource snapshots.
//!
//! # Protocol
//!
//! - Each page is a `GET` with `limit` and `offset` query parameters.
//! - The next offset advances by the number of entries returned.
//! - Iteration ends on an empty page or once the offset reaches the
//!   `total_count` reported by the first page.
//! - A [`Filter`] decides which entries are yielded. Pages whose entries
//!   are all filtered out are skipped transparently.
//!
//! # Example
//!
//! ```rust,ignore
//! use box_sdk::pagination::JsonIterator;
//!
//! let files_only = JsonIterator::new(api.clone(), "folders/0/items", 500)
//!     .with_filter(|entry: &serde_json::Value| entry["type"] == "file");
//!
//! for entry in files_only {
//!     println!("{}", entry?["name"]);
//! }
//! ```

mod errors;
mod filter;
mod json_iterator;

pub use errors::IterationError;
pub use filter::{EmptyFilter, Filter, TypeFilter};
pub use json_iterator::{JsonIterator, Page};
