//! The folder facade.

use std::io::Read;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::clients::{BoxApiConnection, HttpMethod, HttpRequest, MultipartForm, RequestTarget};
use crate::pagination::{JsonIterator, TypeFilter};
use crate::resources::errors::ResourceError;
use crate::resources::info::{format_timestamp, FieldSet, Info};
use crate::resources::item::{HasItemFields, ItemCollection, ItemFields, ItemInfo};
use crate::resources::iterators::{CollaborationIterator, ItemIterator};
use crate::resources::path::UrlTemplate;
use crate::resources::{
    expect_object, fetch_info, info_from_body, push_info, put_fields, required_id, send_request,
    Collaboration, File, Resource, ResourceType, Role, User,
};

const FOLDER_INFO: UrlTemplate = UrlTemplate::new("folders/{id}");
const COPY_FOLDER: UrlTemplate = UrlTemplate::new("folders/{id}/copy");
const FOLDER_ITEMS: UrlTemplate = UrlTemplate::new("folders/{id}/items");
const FOLDER_COLLABORATIONS: UrlTemplate = UrlTemplate::new("folders/{id}/collaborations");
const CREATE_FOLDER: &str = "folders";
const ADD_COLLABORATION: &str = "collaborations";
const UPLOAD_FILE: &str = "files/content";

/// The ID of the root folder ("All Files").
pub const ROOT_FOLDER_ID: &str = "0";

/// The page size used by [`Folder::items`].
pub const DEFAULT_ITEMS_LIMIT: u64 = 1000;

/// A folder on Box.
///
/// # Example
///
/// ```rust,ignore
/// use box_sdk::resources::{Folder, Role};
///
/// let root = Folder::root(api.clone());
/// let shared = root.create_folder("Shared")?;
/// shared.add_collaborator_by_email("ann@example.com", Role::Editor)?;
///
/// let file = shared.upload_file(std::fs::File::open("notes.txt")?, "notes.txt")?;
/// println!("uploaded {}", file.id());
/// ```
#[derive(Clone, Debug)]
pub struct Folder {
    api: BoxApiConnection,
    id: String,
}

impl Resource for Folder {
    type Fields = FolderFields;

    const TYPE: ResourceType = ResourceType::Folder;

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

impl Folder {
    /// Creates a facade for the folder with the given ID.
    #[must_use]
    pub fn new(api: BoxApiConnection, id: impl Into<String>) -> Self {
        Self { api, id: id.into() }
    }

    /// Returns the root folder of the connection's user.
    #[must_use]
    pub fn root(api: BoxApiConnection) -> Self {
        Self::new(api, ROOT_FOLDER_ID)
    }

    /// Returns the folder ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetches the folder's information.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    pub fn get_info(&self) -> Result<Info<Self>, ResourceError> {
        fetch_info(self, FOLDER_INFO, &[])
    }

    /// Fetches only the named fields of the folder.
    ///
    /// # Errors
    ///
    /// Same as [`get_info`](Self::get_info).
    pub fn get_info_with_fields(&self, fields: &[&str]) -> Result<Info<Self>, ResourceError> {
        fetch_info(self, FOLDER_INFO, fields)
    }

    /// Writes the snapshot's pending changes and refreshes it from the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn update_info(&self, info: &mut Info<Self>) -> Result<(), ResourceError> {
        push_info(FOLDER_INFO, info)
    }

    /// Copies this folder into `destination`, optionally under a new name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the response has no `id`.
    pub fn copy(&self, destination: &Self, new_name: Option<&str>) -> Result<Info<Self>, ResourceError> {
        let mut body = json!({ "parent": { "id": destination.id() } });
        if let Some(name) = new_name {
            body["name"] = Value::from(name);
        }

        let builder = HttpRequest::builder(HttpMethod::Post, COPY_FOLDER.build_with_id(&self.id))
            .json_body(body);
        let response = send_request(&self.api, builder)?.into_json()?;
        info_from_body(&self.api, response)
    }

    /// Creates a child folder.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails (409 when the name
    /// is taken), or [`ResourceError::MalformedResponse`] if the response has
    /// no `id`.
    pub fn create_folder(&self, name: &str) -> Result<Self, ResourceError> {
        let body = json!({
            "name": name,
            "parent": { "id": self.id },
        });

        let builder = HttpRequest::builder(HttpMethod::Post, CREATE_FOLDER).json_body(body);
        let response = send_request(&self.api, builder)?.into_json()?;
        let created = expect_object(ResourceType::Folder, response)?;
        let id = required_id(ResourceType::Folder, &created)?;

        tracing::debug!(parent = %self.id, folder = %id, "Created folder");
        Ok(Self::new(self.api.clone(), id))
    }

    /// Deletes this folder. A non-empty folder needs `recursive`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn delete(&self, recursive: bool) -> Result<(), ResourceError> {
        let builder = HttpRequest::builder(HttpMethod::Delete, FOLDER_INFO.build_with_id(&self.id))
            .query_param("recursive", recursive.to_string());
        send_request(&self.api, builder)?;
        Ok(())
    }

    /// Moves this folder into `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn move_to(&self, destination: &Self) -> Result<(), ResourceError> {
        self.move_to_id(destination.id())
    }

    /// Moves this folder into the folder with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn move_to_id(&self, destination_id: &str) -> Result<(), ResourceError> {
        put_fields(self, FOLDER_INFO, json!({ "parent": { "id": destination_id } }))
    }

    /// Renames this folder.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn rename(&self, new_name: &str) -> Result<(), ResourceError> {
        put_fields(self, FOLDER_INFO, json!({ "name": new_name }))
    }

    /// Uploads a file into this folder.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Io`] if reading `content` fails,
    /// [`ResourceError::Http`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the response lists no file.
    pub fn upload_file(&self, content: impl Read, name: &str) -> Result<File, ResourceError> {
        self.upload_file_with_dates(content, name, None, None)
    }

    /// Uploads a file into this folder, recording its content timestamps.
    ///
    /// # Errors
    ///
    /// Same as [`upload_file`](Self::upload_file).
    pub fn upload_file_with_dates(
        &self,
        mut content: impl Read,
        name: &str,
        created: Option<DateTime<Utc>>,
        modified: Option<DateTime<Utc>>,
    ) -> Result<File, ResourceError> {
        let mut bytes = Vec::new();
        content.read_to_end(&mut bytes)?;

        let mut form = MultipartForm::new().field("parent_id", self.id.as_str());
        if let Some(created) = created {
            form = form.field("content_created_at", format_timestamp(&created));
        }
        if let Some(modified) = modified {
            form = form.field("content_modified_at", format_timestamp(&modified));
        }
        let size = bytes.len();
        let form = form.file(name, bytes);

        let builder = HttpRequest::builder(HttpMethod::Post, UPLOAD_FILE)
            .target(RequestTarget::Upload)
            .multipart(form);
        let response = send_request(&self.api, builder)?.into_json()?;

        let id = response
            .get("entries")
            .and_then(Value::as_array)
            .and_then(|entries| entries.first())
            .and_then(Value::as_object)
            .map(|entry| required_id(ResourceType::File, entry))
            .transpose()?
            .ok_or_else(|| {
                ResourceError::malformed(ResourceType::File, "upload response has no entries")
            })?;

        tracing::debug!(folder = %self.id, file = %id, size, "Uploaded file");
        Ok(File::new(self.api.clone(), id))
    }

    /// Invites an existing user to collaborate on this folder.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the response has no `id`.
    pub fn add_collaborator(
        &self,
        user: &User,
        role: Role,
    ) -> Result<Info<Collaboration>, ResourceError> {
        self.create_collaboration(json!({ "id": user.id(), "type": "user" }), role)
    }

    /// Invites someone by email, whether or not they have an account yet.
    ///
    /// # Errors
    ///
    /// Same as [`add_collaborator`](Self::add_collaborator).
    pub fn add_collaborator_by_email(
        &self,
        email: &str,
        role: Role,
    ) -> Result<Info<Collaboration>, ResourceError> {
        self.create_collaboration(json!({ "login": email, "type": "user" }), role)
    }

    fn create_collaboration(
        &self,
        accessible_by: Value,
        role: Role,
    ) -> Result<Info<Collaboration>, ResourceError> {
        let body = json!({
            "item": { "id": self.id, "type": ResourceType::Folder.as_str() },
            "accessible_by": accessible_by,
            "role": role.as_str(),
        });

        let builder = HttpRequest::builder(HttpMethod::Post, ADD_COLLABORATION).json_body(body);
        let response = send_request(&self.api, builder)?.into_json()?;
        info_from_body(&self.api, response)
    }

    /// Returns the collaborations on this folder.
    #[must_use]
    pub fn collaborations(&self) -> CollaborationIterator {
        let entries = JsonIterator::new(
            self.api.clone(),
            FOLDER_COLLABORATIONS.build_with_id(&self.id),
            DEFAULT_ITEMS_LIMIT,
        );
        CollaborationIterator::new(self.api.clone(), entries, info_from_body)
    }

    /// Returns a lazy iterator over this folder's items.
    #[must_use]
    pub fn items(&self) -> ItemIterator {
        self.items_with_limit(DEFAULT_ITEMS_LIMIT)
    }

    /// Returns a lazy iterator over this folder's items, `limit` per page.
    #[must_use]
    pub fn items_with_limit(&self, limit: u64) -> ItemIterator {
        let entries = JsonIterator::new(self.api.clone(), FOLDER_ITEMS.build_with_id(&self.id), limit);
        ItemIterator::new(self.api.clone(), entries, ItemInfo::from_json)
    }

    /// Returns a lazy iterator over this folder's child folders only.
    #[must_use]
    pub fn subfolders(&self) -> ItemIterator {
        let entries = JsonIterator::new(
            self.api.clone(),
            FOLDER_ITEMS.build_with_id(&self.id),
            DEFAULT_ITEMS_LIMIT,
        )
        .with_filter(TypeFilter::new([ResourceType::Folder.as_str()]));
        ItemIterator::new(self.api.clone(), entries, ItemInfo::from_json)
    }
}

impl<'a> IntoIterator for &'a Folder {
    type Item = Result<ItemInfo, ResourceError>;
    type IntoIter = ItemIterator;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

/// The typed fields of a folder.
#[derive(Clone, Debug, Default)]
pub struct FolderFields {
    /// Fields shared with files.
    pub item: ItemFields,
    /// The first page of children, when requested.
    pub item_collection: Option<ItemCollection>,
    /// Whether the folder has collaborators.
    pub has_collaborations: Option<bool>,
    /// Whether non-owners may invite collaborators.
    pub can_non_owners_invite: Option<bool>,
    /// The address that files can be emailed to.
    pub folder_upload_email: Option<String>,
}

impl HasItemFields for FolderFields {
    fn item(&self) -> &ItemFields {
        &self.item
    }
}

impl FieldSet for FolderFields {
    fn parse_member(&mut self, api: &BoxApiConnection, name: &str, value: &Value) {
        if self.item.parse_item_member(api, name, value) {
            return;
        }

        match name {
            "item_collection" => self.item_collection = ItemCollection::from_json(api, value),
            "has_collaborations" => self.has_collaborations = value.as_bool(),
            "can_non_owners_invite" => self.can_non_owners_invite = value.as_bool(),
            "folder_upload_email" => {
                self.folder_upload_email = value
                    .get("address")
                    .and_then(Value::as_str)
                    .map(str::to_string);
            }
            _ => {}
        }
    }
}

impl Info<Folder> {
    /// Returns the embedded first page of children.
    #[must_use]
    pub fn item_collection(&self) -> Option<&ItemCollection> {
        self.typed().item_collection.as_ref()
    }

    /// Returns whether the folder has collaborators.
    #[must_use]
    pub fn has_collaborations(&self) -> Option<bool> {
        self.typed().has_collaborations
    }

    /// Returns whether non-owners may invite collaborators.
    #[must_use]
    pub fn can_non_owners_invite(&self) -> Option<bool> {
        self.typed().can_non_owners_invite
    }

    /// Sets whether non-owners may invite collaborators.
    pub fn set_can_non_owners_invite(&mut self, allowed: bool) {
        self.set("can_non_owners_invite", allowed);
    }

    /// Returns the folder's upload email address.
    #[must_use]
    pub fn folder_upload_email(&self) -> Option<&str> {
        self.typed().folder_upload_email.as_deref()
    }
}
