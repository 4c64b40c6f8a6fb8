//! The user facade.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::BoxApiConnection;
use crate::pagination::JsonIterator;
use crate::resources::errors::ResourceError;
use crate::resources::info::{parse_timestamp, FieldSet, Info};
use crate::resources::iterators::UserIterator;
use crate::resources::path::UrlTemplate;
use crate::resources::{fetch_info, info_from_body, Resource, ResourceType};

const USER_INFO: UrlTemplate = UrlTemplate::new("users/{id}");
const USERS: &str = "users";
const CURRENT_USER_ID: &str = "me";

/// The page size used when listing enterprise users.
pub const USERS_LIMIT: u64 = 1000;

/// A user account on Box.
///
/// # Example
///
/// ```rust,ignore
/// use box_sdk::resources::User;
///
/// let me = User::current(api.clone()).get_info()?;
/// println!("{} <{}>", me.name().unwrap_or_default(), me.login().unwrap_or_default());
///
/// for user in User::all_enterprise_users(&api, Some("smith")) {
///     println!("{}", user?.login().unwrap_or_default());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct User {
    api: BoxApiConnection,
    id: String,
}

impl Resource for User {
    type Fields = UserFields;

    const TYPE: ResourceType = ResourceType::User;

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

impl User {
    /// Creates a facade for the user with the given ID.
    #[must_use]
    pub fn new(api: BoxApiConnection, id: impl Into<String>) -> Self {
        Self { api, id: id.into() }
    }

    /// Returns a facade for the user the connection is authenticated as.
    ///
    /// Its ID is the alias `me` until resolved through [`get_info`](Self::get_info).
    #[must_use]
    pub fn current(api: BoxApiConnection) -> Self {
        Self::new(api, CURRENT_USER_ID)
    }

    /// Returns the user ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Fetches the user's information.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails, or
    /// [`ResourceError::MalformedResponse`] if the body is not an object.
    pub fn get_info(&self) -> Result<Info<Self>, ResourceError> {
        fetch_info(self, USER_INFO, &[])
    }

    /// Fetches only the named fields of the user.
    ///
    /// # Errors
    ///
    /// Same as [`get_info`](Self::get_info).
    pub fn get_info_with_fields(&self, fields: &[&str]) -> Result<Info<Self>, ResourceError> {
        fetch_info(self, USER_INFO, fields)
    }

    /// Returns a lazy iterator over the users in the enterprise.
    ///
    /// `filter_term` narrows the listing to users whose name or login starts
    /// with the term; `None` lists everyone.
    #[must_use]
    pub fn all_enterprise_users(api: &BoxApiConnection, filter_term: Option<&str>) -> UserIterator {
        let mut entries = JsonIterator::new(api.clone(), USERS, USERS_LIMIT);
        if let Some(term) = filter_term {
            entries = entries.with_query("filter_term", term);
        }
        UserIterator::new(api.clone(), entries, info_from_body)
    }
}

/// Account status of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    /// The user can log in.
    Active,
    /// The user is deactivated.
    Inactive,
    /// The user cannot delete or edit content.
    CannotDeleteEdit,
    /// The user cannot delete, edit or upload content.
    CannotDeleteEditUpload,
}

impl UserStatus {
    /// Returns the API value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::CannotDeleteEdit => "cannot_delete_edit",
            Self::CannotDeleteEditUpload => "cannot_delete_edit_upload",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The typed fields of a user.
#[derive(Clone, Debug, Default)]
pub struct UserFields {
    /// Display name.
    pub name: Option<String>,
    /// Primary email address.
    pub login: Option<String>,
    /// When the account was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When the account was last modified.
    pub modified_at: Option<DateTime<Utc>>,
    /// Preferred language, as an ISO 639-1 code.
    pub language: Option<String>,
    /// Time zone name.
    pub timezone: Option<String>,
    /// Storage quota in bytes.
    pub space_amount: Option<u64>,
    /// Storage used in bytes.
    pub space_used: Option<u64>,
    /// Largest allowed upload in bytes.
    pub max_upload_size: Option<u64>,
    /// Account status.
    pub status: Option<UserStatus>,
    /// Job title.
    pub job_title: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
}

impl FieldSet for UserFields {
    fn parse_member(&mut self, _api: &BoxApiConnection, name: &str, value: &Value) {
        let text = || value.as_str().map(str::to_string);
        match name {
            "name" => self.name = text(),
            "login" => self.login = text(),
            "created_at" => self.created_at = parse_timestamp(value),
            "modified_at" => self.modified_at = parse_timestamp(value),
            "language" => self.language = text(),
            "timezone" => self.timezone = text(),
            "space_amount" => self.space_amount = value.as_u64(),
            "space_used" => self.space_used = value.as_u64(),
            "max_upload_size" => self.max_upload_size = value.as_u64(),
            "status" => self.status = serde_json::from_value(value.clone()).ok(),
            "job_title" => self.job_title = text(),
            "phone" => self.phone = text(),
            "address" => self.address = text(),
            "avatar_url" => self.avatar_url = text(),
            _ => {}
        }
    }
}

impl Info<User> {
    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.typed().name.as_deref()
    }

    /// Returns the login email.
    #[must_use]
    pub fn login(&self) -> Option<&str> {
        self.typed().login.as_deref()
    }

    /// Returns when the account was created.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.typed().created_at
    }

    /// Returns when the account was last modified.
    #[must_use]
    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.typed().modified_at
    }

    /// Returns the preferred language.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.typed().language.as_deref()
    }

    /// Returns the time zone.
    #[must_use]
    pub fn timezone(&self) -> Option<&str> {
        self.typed().timezone.as_deref()
    }

    /// Returns the storage quota in bytes.
    #[must_use]
    pub fn space_amount(&self) -> Option<u64> {
        self.typed().space_amount
    }

    /// Returns the storage used in bytes.
    #[must_use]
    pub fn space_used(&self) -> Option<u64> {
        self.typed().space_used
    }

    /// Returns the largest allowed upload in bytes.
    #[must_use]
    pub fn max_upload_size(&self) -> Option<u64> {
        self.typed().max_upload_size
    }

    /// Returns the account status.
    #[must_use]
    pub fn status(&self) -> Option<UserStatus> {
        self.typed().status
    }

    /// Returns the job title.
    #[must_use]
    pub fn job_title(&self) -> Option<&str> {
        self.typed().job_title.as_deref()
    }

    /// Returns the phone number.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.typed().phone.as_deref()
    }

    /// Returns the postal address.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.typed().address.as_deref()
    }

    /// Returns the avatar URL.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.typed().avatar_url.as_deref()
    }
}
