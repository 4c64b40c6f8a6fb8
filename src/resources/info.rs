//! Resource snapshots with pending-change tracking.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::clients::BoxApiConnection;
use crate::resources::errors::ResourceError;
use crate::resources::{expect_object, Resource};

/// The typed view of a resource's fields.
///
/// Each resource type supplies one implementation that recognises the field
/// names it cares about. Names it does not recognise are ignored here and
/// stay available through [`Info::get`].
pub trait FieldSet: Default + Clone + fmt::Debug {
    /// Interprets one field of a server object.
    ///
    /// Called for every member of a fetched object and for every local
    /// [`Info::set`]. A `null` or unparseable value clears the typed field.
    fn parse_member(&mut self, api: &BoxApiConnection, name: &str, value: &Value);
}

/// A locally held snapshot of a server resource.
///
/// An `Info` belongs to exactly one facade and holds:
/// - every field the server has returned, in key order
/// - the names of fields changed locally and not yet written back
/// - a typed view (`R::Fields`) kept in sync with the raw fields
///
/// Reading a field never triggers a request. The snapshot only reflects what
/// was fetched or set explicitly.
///
/// # Example
///
/// ```rust,ignore
/// let mut info = folder.get_info()?;
/// assert!(!info.has_pending_changes());
///
/// info.set("name", "Renamed");
/// assert_eq!(info.pending_changes()["name"], "Renamed");
///
/// folder.update_info(&mut info)?;
/// assert!(!info.has_pending_changes());
/// ```
#[derive(Clone, Debug)]
pub struct Info<R: Resource> {
    resource: R,
    fields: Map<String, Value>,
    pending: BTreeSet<String>,
    typed: R::Fields,
}

impl<R: Resource> Info<R> {
    /// Creates an empty snapshot for a facade.
    #[must_use]
    pub fn new(resource: R) -> Self {
        Self {
            resource,
            fields: Map::new(),
            pending: BTreeSet::new(),
            typed: R::Fields::default(),
        }
    }

    /// Creates a snapshot from a server object. No field is pending.
    #[must_use]
    pub fn from_json(resource: R, json: &Map<String, Value>) -> Self {
        let mut info = Self::new(resource);
        info.update(json);
        info
    }

    /// Creates a snapshot from a server value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MalformedResponse`] if `json` is not an object.
    pub fn from_value(resource: R, json: Value) -> Result<Self, ResourceError> {
        let object = expect_object(R::TYPE, json)?;
        Ok(Self::from_json(resource, &object))
    }

    /// Creates a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidJson`] if the text does not parse, or
    /// [`ResourceError::MalformedResponse`] if it is not an object.
    pub fn from_json_str(resource: R, json: &str) -> Result<Self, ResourceError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(resource, value)
    }

    /// Returns the facade this snapshot belongs to.
    #[must_use]
    pub const fn resource(&self) -> &R {
        &self.resource
    }

    /// Returns the resource ID.
    #[must_use]
    pub fn id(&self) -> &str {
        self.resource.id()
    }

    /// Returns a field's current value, fetched or locally set.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Sets a field locally and records it as a pending change.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        self.typed
            .parse_member(self.resource.api(), &field, &value);
        self.fields.insert(field.clone(), value);
        self.pending.insert(field);
    }

    /// Returns `true` if the field was set locally and not yet written back.
    #[must_use]
    pub fn is_pending(&self, field: &str) -> bool {
        self.pending.contains(field)
    }

    /// Returns `true` if any field is pending.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns an object holding only the locally set fields.
    #[must_use]
    pub fn pending_changes(&self) -> Map<String, Value> {
        self.pending
            .iter()
            .filter_map(|field| {
                self.fields
                    .get(field)
                    .map(|value| (field.clone(), value.clone()))
            })
            .collect()
    }

    /// Merges a server object into the snapshot.
    ///
    /// Each returned field overwrites the local value and loses its pending
    /// flag. Fields absent from `json` are left as they are.
    pub fn update(&mut self, json: &Map<String, Value>) {
        for (name, value) in json {
            self.typed.parse_member(self.resource.api(), name, value);
            self.fields.insert(name.clone(), value.clone());
            self.pending.remove(name);
        }
    }

    /// Returns all known fields.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Returns the typed view of the fields.
    #[must_use]
    pub const fn typed(&self) -> &R::Fields {
        &self.typed
    }

    /// Consumes the snapshot and returns its fields as a JSON object.
    #[must_use]
    pub fn into_json(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Reads a string, accepting numbers as their decimal text.
pub(crate) fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parses an RFC 3339 timestamp into UTC.
pub(crate) fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

/// Formats a timestamp the way the API expects it.
pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{File, Folder};
    use crate::test_support::offline_connection;
    use chrono::TimeZone;
    use serde_json::json;

    fn folder_info(json: Value) -> Info<Folder> {
        let folder = Folder::new(offline_connection(), "5");
        Info::from_value(folder, json).unwrap()
    }

    #[test]
    fn test_new_info_is_empty() {
        let info = Info::new(File::new(offline_connection(), "1"));
        assert!(info.fields().is_empty());
        assert!(!info.has_pending_changes());
        assert!(info.get("name").is_none());
    }

    #[test]
    fn test_from_json_has_no_pending_changes() {
        let info = folder_info(json!({"id": "5", "name": "Docs"}));
        assert!(info.pending_changes().is_empty());
        assert_eq!(info.get("name"), Some(&json!("Docs")));
    }

    #[test]
    fn test_set_records_exactly_that_field() {
        let mut info = folder_info(json!({"id": "5", "name": "Docs", "size": 10}));
        info.set("name", "Papers");

        let pending = info.pending_changes();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending["name"], json!("Papers"));
        assert!(info.is_pending("name"));
        assert!(!info.is_pending("size"));
    }

    #[test]
    fn test_update_clears_pending_flag_for_returned_fields() {
        let mut info = folder_info(json!({"id": "5"}));
        info.set("name", "Papers");
        info.set("description", "Old");

        let server = json!({"name": "Papers (1)"});
        info.update(server.as_object().unwrap());

        assert!(!info.is_pending("name"));
        assert!(info.is_pending("description"));
        assert_eq!(info.get("name"), Some(&json!("Papers (1)")));
        assert_eq!(info.pending_changes().len(), 1);
    }

    #[test]
    fn test_update_leaves_absent_fields_untouched() {
        let mut info = folder_info(json!({"id": "5", "name": "Docs", "size": 3}));
        let server = json!({"size": 4});
        info.update(server.as_object().unwrap());

        assert_eq!(info.get("name"), Some(&json!("Docs")));
        assert_eq!(info.get("size"), Some(&json!(4)));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let info = folder_info(json!({"id": "5", "custom_field": {"nested": true}}));
        assert_eq!(info.get("custom_field"), Some(&json!({"nested": true})));
    }

    #[test]
    fn test_from_json_str_errors() {
        let folder = Folder::new(offline_connection(), "5");
        assert!(matches!(
            Info::from_json_str(folder.clone(), "{not json"),
            Err(ResourceError::InvalidJson(_))
        ));
        assert!(matches!(
            Info::from_json_str(folder, "[1]"),
            Err(ResourceError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_into_json_returns_all_fields() {
        let mut info = folder_info(json!({"id": "5"}));
        info.set("name", "X");
        assert_eq!(info.into_json(), json!({"id": "5", "name": "X"}));
    }

    #[test]
    fn test_timestamp_helpers() {
        let parsed = parse_timestamp(&json!("2012-12-12T10:53:43-08:00")).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2012, 12, 12, 18, 53, 43).unwrap());
        assert_eq!(format_timestamp(&parsed), "2012-12-12T18:53:43Z");
        assert!(parse_timestamp(&json!("yesterday")).is_none());
        assert!(parse_timestamp(&json!(null)).is_none());
    }

    #[test]
    fn test_as_string_accepts_numbers() {
        assert_eq!(as_string(&json!("7")), Some("7".to_string()));
        assert_eq!(as_string(&json!(7)), Some("7".to_string()));
        assert_eq!(as_string(&json!(true)), None);
    }
}
