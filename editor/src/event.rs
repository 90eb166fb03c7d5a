//! Replayable input events.
//!
//! Every user interaction the editor understands can be expressed as an
//! [`EditEvent`]. Events deserialize from JSON or YAML, so an editing
//! session can be scripted:
//!
//! ```yaml
//! - op: set_name
//!   value: product
//! - op: set_field_type
//!   index: 0
//!   value: string
//! - op: set_allow_input
//!   index: 0
//!   value: "red, "
//! ```

use content_schema_core::{FieldType, ListFieldType};
use serde::{Deserialize, Serialize};

/// One user interaction with the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditEvent {
    SetName {
        value: String,
    },
    SetContainer {
        value: bool,
    },
    SetDescription {
        value: String,
    },
    SetDisplayField {
        value: String,
    },
    SetSegmentField {
        value: String,
    },
    SetUrlFields {
        values: Vec<String>,
    },
    AddField,
    RemoveField {
        index: usize,
    },
    RemoveLastField,
    SetFieldName {
        index: usize,
        value: String,
    },
    SetFieldLabel {
        index: usize,
        value: String,
    },
    SetFieldType {
        index: usize,
        #[serde(default)]
        value: Option<FieldType>,
    },
    SetFieldRequired {
        index: usize,
        value: bool,
    },
    SetFieldListType {
        index: usize,
        #[serde(default)]
        value: Option<ListFieldType>,
    },
    /// Text typed into a row's chip input.
    SetAllowInput {
        index: usize,
        value: String,
    },
    ReplaceAllowValues {
        index: usize,
        values: Vec<String>,
    },
    AddAllowValue {
        index: usize,
        value: String,
    },
    RemoveAllowValue {
        index: usize,
        value: String,
    },
    /// Backspace in an empty chip input.
    RemoveLastAllowValue {
        index: usize,
    },
    ClearAllowValues {
        index: usize,
    },
}
