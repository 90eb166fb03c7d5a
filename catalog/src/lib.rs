//! Catalog loading and configuration for the schema editor.
//!
//! This crate loads the known schemas and microschemas from a directory or a
//! bundle file, reads the editor's YAML configuration, and provides
//! [`CatalogService`], a file-backed collaborator the editor can be wired to.
//!
//! # Quick start
//!
//! ```no_run
//! use content_schema_catalog::{CatalogService, EditorConfig};
//! use content_schema_editor::SchemaEditor;
//!
//! let config = EditorConfig::load(".schema-editor.yml").unwrap();
//! let mut service = CatalogService::new(config.catalog.builder());
//!
//! let editor = SchemaEditor::with_settings(&config.editor);
//! editor.init(&mut service);
//! for schema in editor.all_schemas(&service) {
//!     println!("{}", schema.name);
//! }
//! ```

mod config;
mod error;
mod loader;
mod service;

pub use config::{CatalogConfig, EditorConfig};
pub use error::{CatalogError, Result};
pub use loader::{
    CatalogBuilder, CatalogBundle, CatalogSource, MICROSCHEMAS_DIR, SCHEMAS_DIR, SchemaCatalog,
};
pub use service::{CatalogRequest, CatalogService};
