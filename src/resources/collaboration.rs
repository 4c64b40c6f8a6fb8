//! The collaboration facade, and collaboration roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{BoxApiConnection, HttpMethod, HttpRequest};
use crate::resources::errors::ResourceError;
use crate::resources::info::{parse_timestamp, FieldSet, Info};
use crate::resources::item::nested_info;
use crate::resources::path::UrlTemplate;
use crate::resources::{fetch_info, push_info, send_request, Folder, Resource, ResourceType, User};

const COLLABORATION_INFO: UrlTemplate = UrlTemplate::new("collaborations/{id}");

/// The access level a collaborator has on a folder.
///
/// # Example
///
/// ```rust
/// use box_sdk::resources::Role;
///
/// let role: Role = "previewer uploader".parse().unwrap();
/// assert_eq!(role, Role::PreviewerUploader);
/// assert_eq!(role.to_string(), "previewer uploader");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full read/write access.
    #[serde(rename = "editor")]
    Editor,
    /// Can preview, download and share.
    #[serde(rename = "viewer")]
    Viewer,
    /// Can preview only.
    #[serde(rename = "previewer")]
    Previewer,
    /// Can upload and see the folder's item names.
    #[serde(rename = "uploader")]
    Uploader,
    /// Previewer plus upload.
    #[serde(rename = "previewer uploader")]
    PreviewerUploader,
    /// Viewer plus upload.
    #[serde(rename = "viewer uploader")]
    ViewerUploader,
    /// Editor plus owner-level collaboration management.
    #[serde(rename = "co-owner")]
    CoOwner,
    /// The folder owner.
    #[serde(rename = "owner")]
    Owner,
}

impl Role {
    /// Returns the API value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Viewer => "viewer",
            Self::Previewer => "previewer",
            Self::Uploader => "uploader",
            Self::PreviewerUploader => "previewer uploader",
            Self::ViewerUploader => "viewer uploader",
            Self::CoOwner => "co-owner",
            Self::Owner => "owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(Value::from(s.trim().to_lowercase())).map_err(|_| {
            ResourceError::malformed(ResourceType::Collaboration, format!("unknown role '{s}'"))
        })
    }
}

/// Where a collaboration invitation stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaborationStatus {
    /// The invitee accepted.
    Accepted,
    /// The invitation has not been answered.
    Pending,
    /// The invitee declined.
    Rejected,
}

impl CollaborationStatus {
    /// Returns the API value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CollaborationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collaboration: a user's access to a folder.
#[derive(Clone, Debug)]
pub struct Collaboration {
    api: BoxApiConnection,
    id: String,
}

impl Resource for Collaboration {
    type Fields = CollaborationFields;

    const TYPE: ResourceType = ResourceType::Collaboration;

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

impl Collaboration {
    /// Creates a facade for the collaboration with the given ID.
    #[must_use]
    pub fn new(api: BoxApiConnection, id: impl Into<String>) -> Self {
        Self { api, id: id.into() }
    }

    /// Returns the collaboration ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetches the collaboration's information.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    pub fn get_info(&self) -> Result<Info<Self>, ResourceError> {
        fetch_info(self, COLLABORATION_INFO, &[])
    }

    /// Writes the snapshot's pending changes (role or status) and refreshes it.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn update_info(&self, info: &mut Info<Self>) -> Result<(), ResourceError> {
        push_info(COLLABORATION_INFO, info)
    }

    /// Removes the collaboration.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails.
    pub fn delete(&self) -> Result<(), ResourceError> {
        let builder =
            HttpRequest::builder(HttpMethod::Delete, COLLABORATION_INFO.build_with_id(&self.id));
        send_request(&self.api, builder)?;
        Ok(())
    }
}

/// The typed fields of a collaboration.
#[derive(Clone, Debug, Default)]
pub struct CollaborationFields {
    /// Who created the collaboration.
    pub created_by: Option<Info<User>>,
    /// When it was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When it was last modified.
    pub modified_at: Option<DateTime<Utc>>,
    /// When access expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// Invitation status.
    pub status: Option<CollaborationStatus>,
    /// The collaborator.
    pub accessible_by: Option<Info<User>>,
    /// The collaborator's role.
    pub role: Option<Role>,
    /// When the invitee answered.
    pub acknowledged_at: Option<DateTime<Utc>>,
    /// The folder being shared.
    pub item: Option<Info<Folder>>,
}

impl FieldSet for CollaborationFields {
    fn parse_member(&mut self, api: &BoxApiConnection, name: &str, value: &Value) {
        match name {
            "created_by" => self.created_by = nested_info(api, value),
            "created_at" => self.created_at = parse_timestamp(value),
            "modified_at" => self.modified_at = parse_timestamp(value),
            "expires_at" => self.expires_at = parse_timestamp(value),
            "status" => self.status = serde_json::from_value(value.clone()).ok(),
            "accessible_by" => self.accessible_by = nested_info(api, value),
            "role" => self.role = serde_json::from_value(value.clone()).ok(),
            "acknowledged_at" => self.acknowledged_at = parse_timestamp(value),
            "item" => self.item = nested_info(api, value),
            _ => {}
        }
    }
}

impl Info<Collaboration> {
    /// Returns who created the collaboration.
    #[must_use]
    pub fn created_by(&self) -> Option<&Info<User>> {
        self.typed().created_by.as_ref()
    }

    /// Returns when it was created.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.typed().created_at
    }

    /// Returns when it was last modified.
    #[must_use]
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.typed().modified_at
    }

    /// Returns when access expires.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.typed().expires_at
    }

    /// Returns the invitation status.
    #[must_use]
    pub fn status(&self) -> Option<CollaborationStatus> {
        self.typed().status
    }

    /// Sets the invitation status. Only the invitee may change it.
    pub fn set_status(&mut self, status: CollaborationStatus) {
        self.set("status", status.as_str());
    }

    /// Returns the collaborator.
    #[must_use]
    pub fn accessible_by(&self) -> Option<&Info<User>> {
        self.typed().accessible_by.as_ref()
    }

    /// Returns the collaborator's role.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.typed().role
    }

    /// Sets the collaborator's role.
    pub fn set_role(&mut self, role: Role) {
        self.set("role", role.as_str());
    }

    /// Returns when the invitee answered.
    #[must_use]
    pub fn acknowledged_at(&self) -> Option<DateTime<Utc>> {
        self.typed().acknowledged_at
    }

    /// Returns the shared folder.
    #[must_use]
    pub fn item(&self) -> Option<&Info<Folder>> {
        self.typed().item.as_ref()
    }
}
