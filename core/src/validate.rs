//! Schema draft validation.
//!
//! Checks the required inputs and the structural invariants of a
//! [`SchemaDraft`]: the display field must name an existing field, field
//! names and labels must be unique (case-insensitively), and `listType` /
//! `allow` may only appear on the fields that can carry them.
//!
//! # Examples
//!
//! ```
//! use content_schema_core::*;
//!
//! let mut draft = SchemaDraft::new("article");
//! draft.display_field = "title".into();
//! draft.segment_field = "slug".into();
//! draft.url_fields = vec!["slug".into()];
//! draft.fields.push(FieldDraft::new("title", "Title").with_type(FieldType::String));
//! draft.fields.push(FieldDraft::new("slug", "Slug").with_type(FieldType::String));
//! assert!(validate_draft(&draft).is_empty());
//!
//! draft.display_field = "headline".into();
//! assert_eq!(
//!     validate_draft(&draft),
//!     vec![ValidationError::UnknownDisplayField("headline".into())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{FieldDraft, FieldType, SchemaDraft};

/// Draft validation errors.
///
/// Unlike a package validator that stops at the first problem, a draft
/// collects every error so a form can flag all offending inputs at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Schema name is empty or whitespace-only.
    #[error("schema name cannot be empty")]
    EmptySchemaName,
    /// No display field selected.
    #[error("display field cannot be empty")]
    EmptyDisplayField,
    /// The display field does not name any field of the draft.
    #[error("display field does not reference a field: {0}")]
    UnknownDisplayField(String),
    /// No segment field selected.
    #[error("segment field cannot be empty")]
    EmptySegmentField,
    /// No url field given.
    #[error("at least one url field is required")]
    MissingUrlFields,
    /// Field at the given position has no name.
    #[error("field {0} has an empty name")]
    EmptyFieldName(usize),
    /// Field at the given position has no label.
    #[error("field {0} has an empty label")]
    EmptyFieldLabel(usize),
    /// Field at the given position has no type.
    #[error("field {0} has no type")]
    MissingFieldType(usize),
    /// Two fields share a name (compared case-insensitively).
    #[error("duplicate field name: {0}")]
    DuplicateFieldName(String),
    /// Two fields share a label (compared case-insensitively).
    #[error("duplicate field label: {0}")]
    DuplicateFieldLabel(String),
    /// A non-list field carries a list item type.
    #[error("field {0} has a list type but is not a list")]
    MisplacedListType(String),
    /// A field that is not string-valued carries allow values.
    #[error("field {0} has allow values but is not string-valued")]
    MisplacedAllow(String),
}

/// Validates a schema draft and returns every problem found.
///
/// An empty vector means the draft may be submitted.
///
/// # Examples
///
/// ```
/// use content_schema_core::*;
///
/// let draft = SchemaDraft::new("");
/// let errors = validate_draft(&draft);
/// assert!(errors.contains(&ValidationError::EmptySchemaName));
/// assert!(errors.contains(&ValidationError::MissingUrlFields));
/// ```
pub fn validate_draft(draft: &SchemaDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if draft.name.trim().is_empty() {
        errors.push(ValidationError::EmptySchemaName);
    }

    if draft.display_field.is_empty() {
        errors.push(ValidationError::EmptyDisplayField);
    } else if draft.find_field(&draft.display_field).is_none() {
        errors.push(ValidationError::UnknownDisplayField(
            draft.display_field.clone(),
        ));
    }

    if draft.segment_field.is_empty() {
        errors.push(ValidationError::EmptySegmentField);
    }

    if draft.url_fields.iter().all(|f| f.trim().is_empty()) {
        errors.push(ValidationError::MissingUrlFields);
    }

    for (index, field) in draft.fields.iter().enumerate() {
        errors.extend(validate_field(index, field));
    }

    let names = find_duplicates(draft.fields.iter().map(|f| f.name.as_str()));
    errors.extend(names.into_iter().map(ValidationError::DuplicateFieldName));
    let labels = find_duplicates(draft.fields.iter().map(|f| f.label.as_str()));
    errors.extend(labels.into_iter().map(ValidationError::DuplicateFieldLabel));

    errors
}

fn validate_field(index: usize, field: &FieldDraft) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if field.name.is_empty() {
        errors.push(ValidationError::EmptyFieldName(index));
    }
    if field.label.is_empty() {
        errors.push(ValidationError::EmptyFieldLabel(index));
    }
    if field.field_type.is_none() {
        errors.push(ValidationError::MissingFieldType(index));
    }

    if field.list_type.is_some() && field.field_type != Some(FieldType::List) {
        errors.push(ValidationError::MisplacedListType(field.name.clone()));
    }
    if field.allow.is_some() && !field.is_string_valued() {
        errors.push(ValidationError::MisplacedAllow(field.name.clone()));
    }

    errors
}

/// Returns each non-empty value that occurs more than once, reported once
/// in the spelling of its second occurrence.
fn find_duplicates<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut reported: HashSet<String> = HashSet::new();
    let mut duplicates = Vec::new();

    for value in values.filter(|v| !v.is_empty()) {
        let key = value.to_lowercase();
        if !seen.insert(key.clone()) && reported.insert(key) {
            duplicates.push(value.to_string());
        }
    }

    duplicates
}
