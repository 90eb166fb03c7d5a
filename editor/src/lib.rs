//! Headless editor for content-type schema drafts.
//!
//! The editor owns the raw form a user fills in and keeps a normalized
//! [`SchemaDraft`](content_schema_core::SchemaDraft) in sync with it:
//!
//! - [`FormState`] — raw inputs, one [`FieldRow`] per field with its
//!   [`EnumeratedValues`] allow set.
//! - [`reconcile`] — the rules that purge stale allow values and list types,
//!   turn typed chip text into allow values, and derive the display field
//!   candidates.
//! - [`SchemaEditor`] — the state machine tying both together, with change
//!   [`Subscription`]s, replayable [`EditEvent`]s, and the
//!   [`SchemaEffects`] / [`EntityFeed`] collaborators for loading and
//!   submitting schemas.
//!
//! # Example
//!
//! ```
//! use content_schema_core::{FieldType, ListFieldType};
//! use content_schema_editor::{FieldAttribute, SchemaEditor};
//!
//! let mut editor = SchemaEditor::new();
//! editor.set_field_name(0, "tags").unwrap();
//! editor.set_field_type(0, Some(FieldType::List)).unwrap();
//! editor.set_field_list_type(0, Some(ListFieldType::String)).unwrap();
//! editor.set_allow_input(0, "news, ").unwrap();
//! editor.set_allow_input(0, "sport,").unwrap();
//! assert_eq!(
//!     editor.draft().fields[0].allow,
//!     Some(vec!["news".to_string(), "sport".to_string()])
//! );
//!
//! // Switching the list type drops the allow values again.
//! editor.set_field_list_type(0, Some(ListFieldType::Node)).unwrap();
//! assert_eq!(editor.draft().fields[0].allow, None);
//!
//! editor.add_field();
//! editor.set_field_name(1, "Tags").unwrap();
//! assert!(editor.field_has_duplicate_value(1, FieldAttribute::Name));
//! ```

mod allow;
mod editor;
mod effects;
mod error;
mod event;
mod form;
mod listeners;
mod reconcile;

pub use allow::{EnumeratedValues, extract_chip};
pub use editor::{EditorSettings, SchemaEditor};
pub use effects::{EntityFeed, SchemaEffects, sort_by_name};
pub use error::{EditorError, Result};
pub use event::EditEvent;
pub use form::{FieldAttribute, FieldInput, FieldRow, FormState};
pub use listeners::Subscription;
pub use reconcile::{Reconciliation, reconcile};
