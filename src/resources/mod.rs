//! Typed resource facades for the Box API.
//!
//! Each facade ([`Folder`], [`File`], [`User`], [`Collaboration`]) pairs an
//! opaque ID with the shared [`BoxApiConnection`] and exposes the operations
//! of its endpoint family. Responses come back as [`Info`] snapshots, which
//! keep the raw JSON fields next to a typed view and track local edits until
//! they are written back.
//!
//! # Example
//!
//! ```rust,ignore
//! use box_sdk::resources::{Folder, ItemInfo};
//!
//! let root = Folder::root(api.clone());
//! let reports = root.create_folder("Reports")?;
//!
//! for item in &root {
//!     match item? {
//!         ItemInfo::Folder(info) => println!("[dir]  {}", info.name().unwrap_or_default()),
//!         ItemInfo::File(info) => println!("[file] {}", info.name().unwrap_or_default()),
//!     }
//! }
//!
//! let mut info = reports.get_info()?;
//! info.set_description("Quarterly numbers");
//! reports.update_info(&mut info)?;
//! ```

mod collaboration;
mod errors;
mod file;
mod folder;
mod info;
mod item;
mod iterators;
mod path;
mod user;

use std::fmt;

use serde_json::{Map, Value};

use crate::clients::{BoxApiConnection, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse};

pub use collaboration::{Collaboration, CollaborationFields, CollaborationStatus, Role};
pub use errors::ResourceError;
pub use file::{File, FileFields};
pub use folder::{Folder, FolderFields};
pub use info::{FieldSet, Info};
pub use item::{HasItemFields, ItemCollection, ItemFields, ItemInfo};
pub use iterators::{CollaborationIterator, ItemIterator, ResourceIterator, UserIterator};
pub use path::{build_path, fields_param, UrlTemplate};
pub use user::{User, UserFields, UserStatus};

/// The kind of server-side resource a facade refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// A file.
    File,
    /// A folder.
    Folder,
    /// A user.
    User,
    /// A collaboration on a folder.
    Collaboration,
}

impl ResourceType {
    /// Returns the `type` value the API uses for this resource.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::User => "user",
            Self::Collaboration => "collaboration",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A facade over one server-side resource.
///
/// A facade is an immutable `(connection, id)` pair. It never caches
/// server state; [`Info`] snapshots do that.
pub trait Resource: Clone + fmt::Debug {
    /// The typed field view used by this resource's snapshots.
    type Fields: FieldSet;

    /// The resource type tag.
    const TYPE: ResourceType;

    /// Creates a facade for the given ID.
    fn from_id(api: BoxApiConnection, id: String) -> Self;

    /// Returns the connection this facade sends requests through.
    fn api(&self) -> &BoxApiConnection;

    /// Returns the opaque resource ID.
    fn id(&self) -> &str;
}

/// Returns the body as a JSON object.
pub(crate) fn expect_object(
    resource: ResourceType,
    body: Value,
) -> Result<Map<String, Value>, ResourceError> {
    match body {
        Value::Object(object) => Ok(object),
        _ => Err(ResourceError::malformed(
            resource,
            "response body is not a JSON object",
        )),
    }
}

/// Reads the `id` member of a resource object.
///
/// IDs are strings on the wire, but numeric IDs are accepted too.
pub(crate) fn required_id(
    resource: ResourceType,
    object: &Map<String, Value>,
) -> Result<String, ResourceError> {
    object
        .get("id")
        .and_then(info::as_string)
        .ok_or_else(|| ResourceError::malformed(resource, "missing 'id'"))
}

/// Parses a response body into a snapshot of a new facade named by its `id`.
pub(crate) fn info_from_body<R: Resource>(
    api: &BoxApiConnection,
    body: Value,
) -> Result<Info<R>, ResourceError> {
    let object = expect_object(R::TYPE, body)?;
    let id = required_id(R::TYPE, &object)?;
    Ok(Info::from_json(R::from_id(api.clone(), id), &object))
}

/// Builds and sends a request.
pub(crate) fn send_request(
    api: &BoxApiConnection,
    builder: HttpRequestBuilder,
) -> Result<HttpResponse, ResourceError> {
    let request = builder.build().map_err(HttpError::from)?;
    Ok(api.send(request)?)
}

/// Fetches a resource's snapshot, optionally limited to the given fields.
pub(crate) fn fetch_info<R: Resource>(
    resource: &R,
    template: UrlTemplate,
    fields: &[&str],
) -> Result<Info<R>, ResourceError> {
    let mut builder = HttpRequest::builder(HttpMethod::Get, template.build_with_id(resource.id()));
    if !fields.is_empty() {
        builder = builder.query_param("fields", fields_param(fields));
    }

    let body = send_request(resource.api(), builder)?.into_json()?;
    let object = expect_object(R::TYPE, body)?;
    Ok(Info::from_json(resource.clone(), &object))
}

/// Writes a snapshot's pending changes and merges the server's answer.
pub(crate) fn push_info<R: Resource>(
    template: UrlTemplate,
    info: &mut Info<R>,
) -> Result<(), ResourceError> {
    let builder = HttpRequest::builder(HttpMethod::Put, template.build_with_id(info.id()))
        .json_body(Value::Object(info.pending_changes()));

    let body = send_request(info.resource().api(), builder)?.into_json()?;
    let object = expect_object(R::TYPE, body)?;
    info.update(&object);
    Ok(())
}

/// Sends a `PUT` with the given body and discards the response.
pub(crate) fn put_fields<R: Resource>(
    resource: &R,
    template: UrlTemplate,
    body: Value,
) -> Result<(), ResourceError> {
    let builder =
        HttpRequest::builder(HttpMethod::Put, template.build_with_id(resource.id())).json_body(body);
    send_request(resource.api(), builder)?;
    Ok(())
}
