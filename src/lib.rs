//! # Box API Rust SDK
//!
//! A Rust SDK for the Box Content API, providing typed access to files,
//! folders, users and collaborations over authenticated, blocking HTTP.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`BoxConfig`] and [`BoxConfigBuilder`]
//! - Validated newtypes for credentials and endpoint URLs
//! - An authenticated connection ([`BoxApiConnection`]) that classifies
//!   responses into success and typed API errors
//! - Resource snapshots ([`Info`]) that track local edits until written back
//! - Lazy, page-on-demand iteration over collection endpoints
//!
//! ## Quick Start
//!
//! ```rust
//! use box_sdk::{AccessToken, BoxConfig};
//!
//! let config = BoxConfig::builder()
//!     .access_token(AccessToken::new("developer-token").unwrap())
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working With Folders
//!
//! ```rust,ignore
//! use box_sdk::{AccessToken, BoxApiConnection, BoxConfig, Folder, ItemInfo};
//!
//! let config = BoxConfig::builder()
//!     .access_token(AccessToken::new("developer-token")?)
//!     .build()?;
//! let api = BoxApiConnection::new(config)?;
//!
//! let root = Folder::root(api.clone());
//! for item in &root {
//!     match item? {
//!         ItemInfo::Folder(folder) => println!("{}/", folder.name().unwrap_or_default()),
//!         ItemInfo::File(file) => println!("{}", file.name().unwrap_or_default()),
//!     }
//! }
//!
//! let reports = root.create_folder("Reports")?;
//! let mut info = reports.get_info()?;
//! info.set_description("Quarterly numbers");
//! reports.update_info(&mut info)?;
//! ```
//!
//! ## Iterating Users
//!
//! ```rust,ignore
//! use box_sdk::User;
//!
//! for user in User::all_enterprise_users(&api, Some("smith")) {
//!     let user = user?;
//!     println!("{} <{}>", user.name().unwrap_or_default(), user.login().unwrap_or_default());
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the connection is passed explicitly to every facade
//! - **Fail-fast validation**: all newtypes validate on construction
//! - **Blocking**: every call completes or fails before returning; iterators
//!   block only when they need the next page
//! - **No hidden retries**: each request is exactly one HTTP exchange

pub mod clients;
pub mod config;
pub mod error;
pub mod pagination;
pub mod resources;

#[cfg(test)]
mod test_support;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, BaseUrl, BoxConfig, BoxConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, BoxApiConnection, DataType, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, InvalidHttpRequestError, Transport,
};

// Re-export pagination and resource types
pub use pagination::{EmptyFilter, Filter, IterationError, JsonIterator};
pub use resources::{
    Collaboration, CollaborationStatus, File, Folder, Info, ItemInfo, ResourceError, Role, User,
};
