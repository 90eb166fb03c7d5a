//! Raw form state of the schema editor.
//!
//! [`FormState`] holds exactly what the user typed or picked, including
//! half-entered chip text. Each [`FieldRow`] keeps its raw inputs together
//! with its allow-value set, so adding or removing a row can never leave a
//! set attached to the wrong field.

use content_schema_core::{
    FieldDraft, FieldType, ListFieldType, SchemaDraft, ValidationError, validate_draft,
};
use serde::{Deserialize, Serialize};

use crate::allow::EnumeratedValues;
use crate::error::{EditorError, Result};

/// Row attribute compared by the duplicate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldAttribute {
    Name,
    Label,
}

impl FieldAttribute {
    fn value_of(self, input: &FieldInput) -> &str {
        match self {
            FieldAttribute::Name => &input.name,
            FieldAttribute::Label => &input.label,
        }
    }
}

/// Raw inputs of one field row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldInput {
    pub name: String,
    pub label: String,
    pub field_type: Option<FieldType>,
    pub required: bool,
    pub list_type: Option<ListFieldType>,
    /// Text typed into the chip input that has not become a chip yet.
    pub allow_input: String,
}

impl FieldInput {
    pub fn is_string_valued(&self) -> bool {
        self.field_type == Some(FieldType::String) || self.list_type == Some(ListFieldType::String)
    }
}

/// A field row: raw inputs plus the row's allow values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRow {
    pub input: FieldInput,
    pub allow: EnumeratedValues,
}

impl FieldRow {
    /// Seeds a row from an existing field definition.
    pub fn from_field(field: &FieldDraft) -> Self {
        Self {
            input: FieldInput {
                name: field.name.clone(),
                label: field.label.clone(),
                field_type: field.field_type,
                required: field.required,
                list_type: field.list_type,
                allow_input: String::new(),
            },
            allow: field
                .allow
                .as_ref()
                .map(|values| EnumeratedValues::from_values(values.iter().cloned()))
                .unwrap_or_default(),
        }
    }

    /// Normalized field for this row.
    ///
    /// `list_type` is kept only for list fields and `allow` only for
    /// string-valued fields with at least one value.
    pub fn to_field(&self) -> FieldDraft {
        let input = &self.input;
        let list_type = match input.field_type {
            Some(FieldType::List) => input.list_type,
            _ => None,
        };
        let mut field = FieldDraft {
            name: input.name.clone(),
            label: input.label.clone(),
            field_type: input.field_type,
            required: input.required,
            list_type,
            allow: None,
        };
        if field.is_string_valued() && !self.allow.is_empty() {
            field.allow = Some(self.allow.to_vec());
        }
        field
    }
}

/// Raw editor inputs.
///
/// # Examples
///
/// ```
/// use content_schema_editor::{FieldAttribute, FormState};
///
/// let mut form = FormState::with_rows(2);
/// form.row_mut(0).unwrap().input.name = "Title".into();
/// form.row_mut(1).unwrap().input.name = "title".into();
///
/// assert!(form.has_duplicate_value(0, FieldAttribute::Name));
/// assert!(!form.is_valid());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub container: bool,
    pub description: String,
    pub display_field: String,
    pub segment_field: String,
    pub url_fields: Vec<String>,
    rows: Vec<FieldRow>,
}

impl FormState {
    /// Creates an empty form with `count` blank field rows.
    pub fn with_rows(count: usize) -> Self {
        Self {
            rows: vec![FieldRow::default(); count],
            ..Default::default()
        }
    }

    /// Creates a form holding an existing draft.
    pub fn from_draft(draft: &SchemaDraft) -> Self {
        Self {
            name: draft.name.clone(),
            container: draft.container,
            description: draft.description.clone(),
            display_field: draft.display_field.clone(),
            segment_field: draft.segment_field.clone(),
            url_fields: draft.url_fields.clone(),
            rows: draft.fields.iter().map(FieldRow::from_field).collect(),
        }
    }

    pub fn rows(&self) -> &[FieldRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [FieldRow] {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::RowOutOfRange`] if there is no such row.
    pub fn row(&self, index: usize) -> Result<&FieldRow> {
        let len = self.rows.len();
        self.rows
            .get(index)
            .ok_or(EditorError::RowOutOfRange { index, len })
    }

    /// Mutable access to the row at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::RowOutOfRange`] if there is no such row.
    pub fn row_mut(&mut self, index: usize) -> Result<&mut FieldRow> {
        let len = self.rows.len();
        self.rows
            .get_mut(index)
            .ok_or(EditorError::RowOutOfRange { index, len })
    }

    /// Appends a blank row with an empty allow set.
    pub fn push_row(&mut self) {
        self.rows.push(FieldRow::default());
    }

    /// Removes the row at `index` together with its allow set.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::RowOutOfRange`] if there is no such row.
    pub fn remove_row(&mut self, index: usize) -> Result<FieldRow> {
        if index >= self.rows.len() {
            return Err(EditorError::RowOutOfRange {
                index,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }

    /// Removes the last row, if any.
    pub fn pop_row(&mut self) -> Option<FieldRow> {
        self.rows.pop()
    }

    /// Draft built from the current inputs.
    pub fn to_draft(&self) -> SchemaDraft {
        SchemaDraft {
            name: self.name.clone(),
            container: self.container,
            description: self.description.clone(),
            display_field: self.display_field.clone(),
            segment_field: self.segment_field.clone(),
            url_fields: self.url_fields.clone(),
            fields: self.rows.iter().map(FieldRow::to_field).collect(),
        }
    }

    /// Everything that keeps the form from being submitted.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        validate_draft(&self.to_draft())
    }

    /// `true` iff every required input is filled in and the draft
    /// constraints hold.
    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// Checks whether another row has the same name or label as row
    /// `index`, ignoring case.
    ///
    /// An empty own value, or an index naming no row, is never a duplicate.
    pub fn has_duplicate_value(&self, index: usize, attribute: FieldAttribute) -> bool {
        let Some(row) = self.rows.get(index) else {
            return false;
        };
        let own = attribute.value_of(&row.input);
        if own.is_empty() {
            return false;
        }
        let own = own.to_lowercase();

        self.rows
            .iter()
            .enumerate()
            .filter(|(other_index, _)| *other_index != index)
            .any(|(_, other)| {
                let value = attribute.value_of(&other.input);
                !value.is_empty() && value.to_lowercase() == own
            })
    }
}
