//! Error types for editor operations.
//!
//! Input problems never surface here: they are reported through the
//! validity flag. These errors cover caller mistakes (an index that names
//! no row) and refused submissions.

use content_schema_core::ValidationError;
use thiserror::Error;

/// Errors returned by [`SchemaEditor`](crate::SchemaEditor) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// A row index past the end of the field list.
    #[error("field row {index} is out of range ({len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// Submission refused because the draft does not validate.
    #[error("schema draft is invalid ({} problem(s))", .0.len())]
    InvalidDraft(Vec<ValidationError>),

    /// Deletion requested for a draft without a schema name.
    #[error("schema name is required")]
    MissingSchemaName,
}

/// Convenience alias for results with [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;
