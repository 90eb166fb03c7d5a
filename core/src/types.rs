//! Schema draft type definitions.
//!
//! This module defines the data model of a content-type schema while it is
//! being edited. The types serialize with [`serde`] using the camelCase keys
//! a content repository expects in a schema create/update request.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Element type of a list field.
///
/// The same set as [`FieldType`] minus `list`: lists cannot nest.
///
/// # Examples
///
/// ```
/// use content_schema_core::ListFieldType;
///
/// assert_eq!(ListFieldType::String.as_str(), "string");
/// assert_eq!(ListFieldType::Html.label(), "HTML");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFieldType {
    Binary,
    Boolean,
    Date,
    Micronode,
    Node,
    Number,
    Html,
    String,
}

impl ListFieldType {
    /// All list item types in selector order.
    pub const ALL: [ListFieldType; 8] = [
        ListFieldType::Binary,
        ListFieldType::Boolean,
        ListFieldType::Date,
        ListFieldType::Micronode,
        ListFieldType::Node,
        ListFieldType::Number,
        ListFieldType::Html,
        ListFieldType::String,
    ];

    /// Wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            ListFieldType::Binary => "binary",
            ListFieldType::Boolean => "boolean",
            ListFieldType::Date => "date",
            ListFieldType::Micronode => "micronode",
            ListFieldType::Node => "node",
            ListFieldType::Number => "number",
            ListFieldType::Html => "html",
            ListFieldType::String => "string",
        }
    }

    /// Human-readable label shown in type selectors.
    pub fn label(self) -> &'static str {
        match self {
            ListFieldType::Binary => "Binary",
            ListFieldType::Boolean => "Boolean",
            ListFieldType::Date => "Date",
            ListFieldType::Micronode => "Micronode",
            ListFieldType::Node => "Node",
            ListFieldType::Number => "Number",
            ListFieldType::Html => "HTML",
            ListFieldType::String => "String",
        }
    }
}

impl fmt::Display for ListFieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a schema field.
///
/// # Examples
///
/// ```
/// use content_schema_core::{FieldType, ListFieldType};
///
/// assert!(FieldType::List.is_list());
/// assert_eq!(FieldType::from(ListFieldType::Node), FieldType::Node);
/// assert_eq!(FieldType::String.item_type(), Some(ListFieldType::String));
/// assert_eq!(FieldType::List.item_type(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Binary,
    Boolean,
    Date,
    Micronode,
    Node,
    Number,
    Html,
    String,
    List,
}

impl FieldType {
    /// All field types in selector order (`list` last).
    pub const ALL: [FieldType; 9] = [
        FieldType::Binary,
        FieldType::Boolean,
        FieldType::Date,
        FieldType::Micronode,
        FieldType::Node,
        FieldType::Number,
        FieldType::Html,
        FieldType::String,
        FieldType::List,
    ];

    /// Wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self.item_type() {
            Some(item) => item.as_str(),
            None => "list",
        }
    }

    /// Human-readable label shown in type selectors.
    pub fn label(self) -> &'static str {
        match self.item_type() {
            Some(item) => item.label(),
            None => "List",
        }
    }

    /// Returns `true` for [`FieldType::List`].
    pub fn is_list(self) -> bool {
        self == FieldType::List
    }

    /// The equivalent list item type, `None` for `list` itself.
    pub fn item_type(self) -> Option<ListFieldType> {
        match self {
            FieldType::Binary => Some(ListFieldType::Binary),
            FieldType::Boolean => Some(ListFieldType::Boolean),
            FieldType::Date => Some(ListFieldType::Date),
            FieldType::Micronode => Some(ListFieldType::Micronode),
            FieldType::Node => Some(ListFieldType::Node),
            FieldType::Number => Some(ListFieldType::Number),
            FieldType::Html => Some(ListFieldType::Html),
            FieldType::String => Some(ListFieldType::String),
            FieldType::List => None,
        }
    }
}

impl From<ListFieldType> for FieldType {
    fn from(item: ListFieldType) -> Self {
        match item {
            ListFieldType::Binary => FieldType::Binary,
            ListFieldType::Boolean => FieldType::Boolean,
            ListFieldType::Date => FieldType::Date,
            ListFieldType::Micronode => FieldType::Micronode,
            ListFieldType::Node => FieldType::Node,
            ListFieldType::Number => FieldType::Number,
            ListFieldType::Html => FieldType::Html,
            ListFieldType::String => FieldType::String,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `{value, label}` pair offered by a selector input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options for the field type selector, `list` included.
pub fn field_type_options() -> Vec<SelectOption> {
    FieldType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect()
}

/// Options for the list item type selector.
pub fn list_type_options() -> Vec<SelectOption> {
    ListFieldType::ALL
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.label()))
        .collect()
}

/// One field of a schema draft.
///
/// `field_type` stays `None` until a type is picked. `list_type` is only
/// meaningful for list fields and `allow` only for string-valued fields;
/// [`validate_draft`](crate::validate_draft) reports misplaced values.
///
/// # Examples
///
/// ```
/// use content_schema_core::{FieldDraft, FieldType, ListFieldType};
///
/// let tags = FieldDraft::new("tags", "Tags")
///     .with_type(FieldType::List)
///     .with_list_type(ListFieldType::String)
///     .with_allow(["red", "green"]);
/// assert!(tags.is_string_valued());
/// assert_eq!(tags.allow.as_deref(), Some(&["red".to_string(), "green".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDraft {
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_type: Option<ListFieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
}

impl FieldDraft {
    /// Creates an untyped, optional field.
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn with_list_type(mut self, list_type: ListFieldType) -> Self {
        self.list_type = Some(list_type);
        self
    }

    pub fn with_allow<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Returns `true` if values of this field are strings, either directly
    /// or as list items. Only such fields may carry `allow` values.
    pub fn is_string_valued(&self) -> bool {
        self.field_type == Some(FieldType::String) || self.list_type == Some(ListFieldType::String)
    }
}

/// A content-type schema under construction.
///
/// # Examples
///
/// ```
/// use content_schema_core::*;
///
/// let mut draft = SchemaDraft::new("article");
/// draft.fields.push(FieldDraft::new("title", "Title").with_type(FieldType::String));
/// draft.display_field = "title".into();
///
/// assert!(draft.find_field("title").is_some());
/// assert_eq!(draft.field_names(), vec!["title"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDraft {
    pub name: String,
    #[serde(default)]
    pub container: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_field: String,
    #[serde(default)]
    pub segment_field: String,
    #[serde(default)]
    pub url_fields: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDraft>,
}

impl SchemaDraft {
    /// Creates an empty draft with the given schema name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Finds a field by exact name.
    pub fn find_field(&self, name: &str) -> Option<&FieldDraft> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all fields, in order, including empty ones.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// An entry of the schema or microschema feed.
///
/// # Examples
///
/// ```
/// use content_schema_core::SchemaReference;
///
/// let reference = SchemaReference::new("folder");
/// assert_eq!(reference.name, "folder");
/// assert!(reference.uuid.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SchemaReference {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_serializes_lowercase() {
        let json = serde_json::to_string(&FieldType::Micronode).unwrap();
        assert_eq!(json, "\"micronode\"");
        let parsed: ListFieldType = serde_json::from_str("\"html\"").unwrap();
        assert_eq!(parsed, ListFieldType::Html);
    }

    #[test]
    fn test_field_type_options_end_with_list() {
        let options = field_type_options();
        assert_eq!(options.len(), 9);
        assert_eq!(options.last().unwrap(), &SelectOption::new("list", "List"));
        assert_eq!(list_type_options().len(), 8);
        assert!(list_type_options().iter().all(|o| o.value != "list"));
    }

    #[test]
    fn test_field_draft_uses_camel_case_keys() {
        let field = FieldDraft::new("tags", "Tags")
            .with_type(FieldType::List)
            .with_list_type(ListFieldType::String);
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "list");
        assert_eq!(value["listType"], "string");
        assert!(value.get("allow").is_none());
    }

    #[test]
    fn test_schema_draft_deserializes_with_defaults() {
        let draft: SchemaDraft = serde_json::from_str(
            r#"{"name":"page","displayField":"title","fields":[{"name":"title","label":"Title","type":"string"}]}"#,
        )
        .unwrap();
        assert_eq!(draft.display_field, "title");
        assert!(!draft.container);
        assert!(draft.url_fields.is_empty());
        assert_eq!(draft.fields[0].field_type, Some(FieldType::String));
    }

    #[test]
    fn test_is_string_valued() {
        assert!(FieldDraft::new("a", "A").with_type(FieldType::String).is_string_valued());
        assert!(!FieldDraft::new("a", "A").with_type(FieldType::Html).is_string_valued());
        assert!(!FieldDraft::new("a", "A").is_string_valued());
    }
}
