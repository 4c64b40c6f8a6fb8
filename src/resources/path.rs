//! URL templates for resource endpoints.
//!
//! Templates use `{name}` placeholders. Values are percent-encoded before
//! interpolation, so an opaque ID can never add path segments.
//!
//! # Example
//!
//! ```rust
//! use box_sdk::resources::{build_path, UrlTemplate};
//!
//! const COPY_FOLDER: UrlTemplate = UrlTemplate::new("folders/{id}/copy");
//!
//! assert_eq!(COPY_FOLDER.build(&[("id", "123")]), "folders/123/copy");
//! assert_eq!(build_path("users/{id}", &[("id", "a/b")]), "users/a%2Fb");
//! ```

/// A relative endpoint path with `{name}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlTemplate {
    /// The template text.
    pub template: &'static str,
}

impl UrlTemplate {
    /// Creates a template. `const` so endpoints can be declared as constants.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    /// Interpolates the given values into the template.
    #[must_use]
    pub fn build(&self, values: &[(&str, &str)]) -> String {
        build_path(self.template, values)
    }

    /// Interpolates a single `{id}` placeholder.
    #[must_use]
    pub fn build_with_id(&self, id: &str) -> String {
        self.build(&[("id", id)])
    }
}

/// Builds a path from a template by interpolating percent-encoded values.
#[must_use]
pub fn build_path(template: &str, values: &[(&str, &str)]) -> String {
    let mut result = template.to_string();

    for (key, value) in values {
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    result
}

/// Joins field names into the value of a `fields` query parameter.
#[must_use]
pub fn fields_param(fields: &[&str]) -> String {
    fields.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_template_interpolation_single_id() {
        assert_eq!(build_path("folders/{id}", &[("id", "123")]), "folders/123");
    }

    #[test]
    fn test_path_template_interpolation_multiple_values() {
        let result = build_path(
            "files/{file_id}/versions/{id}",
            &[("file_id", "10"), ("id", "20")],
        );
        assert_eq!(result, "files/10/versions/20");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        assert_eq!(
            build_path("folders/{id}", &[("id", "../users/me")]),
            "folders/..%2Fusers%2Fme"
        );
    }

    #[test]
    fn test_missing_value_leaves_placeholder() {
        assert_eq!(build_path("folders/{id}", &[]), "folders/{id}");
    }

    #[test]
    fn test_url_template_build_with_id() {
        const ITEMS: UrlTemplate = UrlTemplate::new("folders/{id}/items");
        assert_eq!(ITEMS.build_with_id("0"), "folders/0/items");
    }

    #[test]
    fn test_fields_param_joins_with_commas() {
        assert_eq!(fields_param(&["name", "size", "parent"]), "name,size,parent");
        assert_eq!(fields_param(&[]), "");
    }
}
