//! The file facade.

use serde_json::{json, Value};

use crate::clients::{BoxApiConnection, HttpMethod, HttpRequest};
use crate::resources::errors::ResourceError;
use crate::resources::info::{as_string, FieldSet, Info};
use crate::resources::item::{HasItemFields, ItemFields};
use crate::resources::path::UrlTemplate;
use crate::resources::{
    fetch_info, info_from_body, push_info, put_fields, send_request, Folder, Resource, ResourceType,
};

const FILE_INFO: UrlTemplate = UrlTemplate::new("files/{id}");
const COPY_FILE: UrlTemplate = UrlTemplate::new("files/{id}/copy");

/// A file on Box.
#[derive(Clone, Debug)]
pub struct File {
    api: BoxApiConnection,
    id: String,
}

impl Resource for File {
    type Fields = FileFields;

    const TYPE: ResourceType = ResourceType::File;

    fn from_id(api: BoxApiConnection, id: String) -> Self {
        Self { api, id }
    }

    fn api(&self) -> &BoxApiConnection {
        &self.api
    }

    fn id(&self) -> &str {
        &self.id
    }
}

impl File {
    /// Creates a facade for the file with the given ID.
    #[must_use]
    pub fn new(api: BoxApiConnection, id: impl Into<String>) -> Self {
        Self { api, id: id.into() }
    }

    /// Returns the file ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetches the file's information.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    pub fn get_info(&self) -> Result<Info<Self>, ResourceError> {
        fetch_info(self, FILE_INFO, &[])
    }

    /// Fetches only the named fields of the file.
    ///
    /// # Errors
    ///
    /// Same as [`get_info`](Self::get_info).
    pub fn get_info_with_fields(&self, fields: &[&str]) -> Result<Info<Self>, ResourceError> {
        fetch_info(self, FILE_INFO, fields)
    }

    /// Writes the snapshot's pending changes and refreshes it from the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn update_info(&self, info: &mut Info<Self>) -> Result<(), ResourceError> {
        push_info(FILE_INFO, info)
    }

    /// Copies this file into `destination`, optionally under a new name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the response has no `id`.
    pub fn copy(&self, destination: &Folder, new_name: Option<&str>) -> Result<Info<Self>, ResourceError> {
        let mut body = json!({ "parent": { "id": destination.id() } });
        if let Some(name) = new_name {
            body["name"] = Value::from(name);
        }

        let builder = HttpRequest::builder(HttpMethod::Post, COPY_FILE.build_with_id(&self.id))
            .json_body(body);
        let response = send_request(&self.api, builder)?.into_json()?;
        info_from_body(&self.api, response)
    }

    /// Moves this file into `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn move_to(&self, destination: &Folder) -> Result<(), ResourceError> {
        put_fields(self, FILE_INFO, json!({ "parent": { "id": destination.id() } }))
    }

    /// Renames this file.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn rename(&self, new_name: &str) -> Result<(), ResourceError> {
        put_fields(self, FILE_INFO, json!({ "name": new_name }))
    }

    /// Deletes this file.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn delete(&self) -> Result<(), ResourceError> {
        let builder = HttpRequest::builder(HttpMethod::Delete, FILE_INFO.build_with_id(&self.id));
        send_request(&self.api, builder)?;
        Ok(())
    }
}

/// The typed fields of a file.
#[derive(Clone, Debug, Default)]
pub struct FileFields {
    /// Fields shared with folders.
    pub item: ItemFields,
    /// SHA-1 of the current content.
    pub sha1: Option<String>,
    /// The file extension, without the dot.
    pub extension: Option<String>,
    /// The current version ID.
    pub version_id: Option<String>,
    /// The number of versions, including the current one.
    pub version_number: Option<String>,
    /// The number of comments.
    pub comment_count: Option<u64>,
}

impl HasItemFields for FileFields {
    fn item(&self) -> &ItemFields {
        &self.item
    }
}

impl FieldSet for FileFields {
    fn parse_member(&mut self, api: &BoxApiConnection, name: &str, value: &Value) {
        if self.item.parse_item_member(api, name, value) {
            return;
        }

        match name {
            "sha1" => self.sha1 = value.as_str().map(str::to_string),
            "extension" => self.extension = value.as_str().map(str::to_string),
            "version_number" => self.version_number = as_string(value),
            "comment_count" => self.comment_count = value.as_u64(),
            "file_version" => self.version_id = value.get("id").and_then(as_string),
            _ => {}
        }
    }
}

impl Info<File> {
    /// Returns the SHA-1 of the current content.
    #[must_use]
    pub fn sha1(&self) -> Option<&str> {
        self.typed().sha1.as_deref()
    }

    /// Returns the file extension.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.typed().extension.as_deref()
    }

    /// Returns the current version ID.
    #[must_use]
    pub fn version_id(&self) -> Option<&str> {
        self.typed().version_id.as_deref()
    }

    /// Returns the version number.
    #[must_use]
    pub fn version_number(&self) -> Option<&str> {
        self.typed().version_number.as_deref()
    }

    /// Returns the number of comments.
    #[must_use]
    pub fn comment_count(&self) -> Option<u64> {
        self.typed().comment_count
    }
}
