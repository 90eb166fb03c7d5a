//! Core content schema types and draft validation.
//!
//! This crate defines the data model for content-type schemas as they are
//! assembled in an editor:
//!
//! - [`SchemaDraft`] — a schema under construction (name, container flag,
//!   display/segment/url field selectors, fields).
//! - [`FieldDraft`] — one typed field, optionally a list of another type,
//!   optionally restricted to enumerated `allow` values.
//! - [`FieldType`] / [`ListFieldType`] — field and list item types together
//!   with their selector labels.
//! - [`SchemaReference`] — an entry of the known schema / microschema feeds.
//!
//! Validation ([`validate_draft`]) reports missing required inputs, unknown
//! display fields, duplicate names or labels, and misplaced `listType` or
//! `allow` values.
//!
//! # Example
//!
//! ```
//! use content_schema_core::*;
//!
//! let mut draft = SchemaDraft::new("product");
//! draft.fields.push(
//!     FieldDraft::new("color", "Color")
//!         .with_type(FieldType::String)
//!         .with_allow(["red", "green"]),
//! );
//! draft.fields.push(
//!     FieldDraft::new("tags", "Tags")
//!         .with_type(FieldType::List)
//!         .with_list_type(ListFieldType::String),
//! );
//! draft.display_field = "color".into();
//! draft.segment_field = "color".into();
//! draft.url_fields = vec!["color".into()];
//!
//! assert!(validate_draft(&draft).is_empty());
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{ValidationError, validate_draft};
