//! Fields shared by files and folders, and the polymorphic item type.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::clients::BoxApiConnection;
use crate::resources::errors::ResourceError;
use crate::resources::info::{as_string, parse_timestamp, Info};
use crate::resources::{expect_object, required_id, File, Folder, Resource, ResourceType, User};

/// Fields common to every item (file or folder).
#[derive(Clone, Debug, Default)]
pub struct ItemFields {
    /// The item name.
    pub name: Option<String>,
    /// The item description.
    pub description: Option<String>,
    /// Size in bytes. For folders, the size of all contained items.
    pub size: Option<u64>,
    /// The entity tag, changed on every modification.
    pub etag: Option<String>,
    /// The sequence ID, changed on every modification.
    pub sequence_id: Option<String>,
    /// When the item was created on the service.
    pub created_at: Option<DateTime<Utc>>,
    /// When the item was last modified on the service.
    pub modified_at: Option<DateTime<Utc>>,
    /// When the content was created, as reported by the uploader.
    pub content_created_at: Option<DateTime<Utc>>,
    /// When the content was last modified, as reported by the uploader.
    pub content_modified_at: Option<DateTime<Utc>>,
    /// When the item was moved to the trash.
    pub trashed_at: Option<DateTime<Utc>>,
    /// The parent folder, as a mini snapshot.
    pub parent: Option<Box<Info<Folder>>>,
    /// The user who created the item.
    pub created_by: Option<Info<User>>,
    /// The user who last modified the item.
    pub modified_by: Option<Info<User>>,
    /// The user who owns the item.
    pub owned_by: Option<Info<User>>,
    /// `active`, `trashed` or `deleted`.
    pub item_status: Option<String>,
}

impl ItemFields {
    /// Interprets a shared item field. Returns `false` if `name` is not one.
    pub(crate) fn parse_item_member(
        &mut self,
        api: &BoxApiConnection,
        name: &str,
        value: &Value,
    ) -> bool {
        match name {
            "name" => self.name = value.as_str().map(str::to_string),
            "description" => self.description = value.as_str().map(str::to_string),
            "size" => self.size = value.as_u64(),
            "etag" => self.etag = as_string(value),
            "sequence_id" => self.sequence_id = as_string(value),
            "created_at" => self.created_at = parse_timestamp(value),
            "modified_at" => self.modified_at = parse_timestamp(value),
            "content_created_at" => self.content_created_at = parse_timestamp(value),
            "content_modified_at" => self.content_modified_at = parse_timestamp(value),
            "trashed_at" => self.trashed_at = parse_timestamp(value),
            "parent" => self.parent = nested_info::<Folder>(api, value).map(Box::new),
            "created_by" => self.created_by = nested_info(api, value),
            "modified_by" => self.modified_by = nested_info(api, value),
            "owned_by" => self.owned_by = nested_info(api, value),
            "item_status" => self.item_status = value.as_str().map(str::to_string),
            _ => return false,
        }
        true
    }
}

/// Parses an embedded mini object. Objects without an `id` are dropped.
pub(crate) fn nested_info<R: Resource>(api: &BoxApiConnection, value: &Value) -> Option<Info<R>> {
    let object = value.as_object()?;
    let id = object.get("id").and_then(as_string)?;
    Some(Info::from_json(R::from_id(api.clone(), id), object))
}

/// Field sets that embed the shared item fields.
pub trait HasItemFields {
    /// Returns the shared item fields.
    fn item(&self) -> &ItemFields;
}

impl<R> Info<R>
where
    R: Resource,
    R::Fields: HasItemFields,
{
    fn item_fields(&self) -> &ItemFields {
        self.typed().item()
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.item_fields().name.as_deref()
    }

    /// Sets the item name. Written back by `update_info`.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.set("name", name.into());
    }

    /// Returns the item description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.item_fields().description.as_deref()
    }

    /// Sets the item description. Written back by `update_info`.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.set("description", description.into());
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.item_fields().size
    }

    /// Returns the entity tag.
    #[must_use]
    pub fn etag(&self) -> Option<&str> {
        self.item_fields().etag.as_deref()
    }

    /// Returns the sequence ID.
    #[must_use]
    pub fn sequence_id(&self) -> Option<&str> {
        self.item_fields().sequence_id.as_deref()
    }

    /// Returns when the item was created.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.item_fields().created_at
    }

    /// Returns when the item was last modified.
    #[must_use]
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.item_fields().modified_at
    }

    /// Returns when the content was created.
    #[must_use]
    pub fn content_created_at(&self) -> Option<DateTime<Utc>> {
        self.item_fields().content_created_at
    }

    /// Returns when the content was last modified.
    #[must_use]
    pub fn content_modified_at(&self) -> Option<DateTime<Utc>> {
        self.item_fields().content_modified_at
    }

    /// Returns when the item was trashed.
    #[must_use]
    pub fn trashed_at(&self) -> Option<DateTime<Utc>> {
        self.item_fields().trashed_at
    }

    /// Returns the parent folder snapshot.
    #[must_use]
    pub fn parent(&self) -> Option<&Info<Folder>> {
        self.item_fields().parent.as_deref()
    }

    /// Returns the creator.
    #[must_use]
    pub fn created_by(&self) -> Option<&Info<User>> {
        self.item_fields().created_by.as_ref()
    }

    /// Returns the last modifier.
    #[must_use]
    pub fn modified_by(&self) -> Option<&Info<User>> {
        self.item_fields().modified_by.as_ref()
    }

    /// Returns the owner.
    #[must_use]
    pub fn owned_by(&self) -> Option<&Info<User>> {
        self.item_fields().owned_by.as_ref()
    }

    /// Returns the item status.
    #[must_use]
    pub fn item_status(&self) -> Option<&str> {
        self.item_fields().item_status.as_deref()
    }
}

/// A snapshot of a folder entry, which is either a file or a folder.
#[derive(Clone, Debug)]
pub enum ItemInfo {
    /// A file entry.
    File(Info<File>),
    /// A folder entry.
    Folder(Info<Folder>),
}

impl ItemInfo {
    /// Parses a collection entry by its `type` field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedItemType`] for any type other than
    /// `file` or `folder`, and [`ResourceError::MalformedResponse`] if the
    /// entry is not an object or has no `id`.
    pub fn from_json(api: &BoxApiConnection, entry: Value) -> Result<Self, ResourceError> {
        let item_type = entry
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match item_type.as_str() {
            "file" => Ok(Self::File(item_info(api, entry, ResourceType::File)?)),
            "folder" => Ok(Self::Folder(item_info(api, entry, ResourceType::Folder)?)),
            _ => Err(ResourceError::UnsupportedItemType { item_type }),
        }
    }

    /// Returns the item ID.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::File(info) => info.id(),
            Self::Folder(info) => info.id(),
        }
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::File(info) => info.name(),
            Self::Folder(info) => info.name(),
        }
    }

    /// Returns the item's resource type.
    #[must_use]
    pub const fn resource_type(&self) -> ResourceType {
        match self {
            Self::File(_) => ResourceType::File,
            Self::Folder(_) => ResourceType::Folder,
        }
    }

    /// Returns the folder snapshot, if this entry is a folder.
    #[must_use]
    pub const fn as_folder(&self) -> Option<&Info<Folder>> {
        match self {
            Self::Folder(info) => Some(info),
            Self::File(_) => None,
        }
    }

    /// Returns the file snapshot, if this entry is a file.
    #[must_use]
    pub const fn as_file(&self) -> Option<&Info<File>> {
        match self {
            Self::File(info) => Some(info),
            Self::Folder(_) => None,
        }
    }
}

fn item_info<R: Resource>(
    api: &BoxApiConnection,
    entry: Value,
    resource: ResourceType,
) -> Result<Info<R>, ResourceError> {
    let object: Map<String, Value> = expect_object(resource, entry)?;
    let id = required_id(resource, &object)?;
    Ok(Info::from_json(R::from_id(api.clone(), id), &object))
}

/// A folder's embedded `item_collection`: the first page of its children.
#[derive(Clone, Debug, Default)]
pub struct ItemCollection {
    /// The total number of children.
    pub total_count: Option<u64>,
    /// The returned children. Entries of unsupported types are left out.
    pub entries: Vec<ItemInfo>,
}

impl ItemCollection {
    pub(crate) fn from_json(api: &BoxApiConnection, value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let entries = object
            .get("entries")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| ItemInfo::from_json(api, entry.clone()).ok())
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            total_count: object.get("total_count").and_then(Value::as_u64),
            entries,
        })
    }
}
