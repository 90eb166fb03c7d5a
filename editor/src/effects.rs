//! Collaborators of the editor.
//!
//! The editor never performs I/O itself. It reads the known schemas and
//! microschemas through an [`EntityFeed`] and hands requests to a
//! [`SchemaEffects`] implementation without awaiting any response.

use content_schema_core::{SchemaDraft, SchemaReference};
use tracing::warn;

/// Fire-and-forget requests issued by the editor.
pub trait SchemaEffects {
    /// Requests (re)loading of the known schemas.
    fn load_schemas(&mut self);

    /// Requests (re)loading of the known microschemas.
    fn load_microschemas(&mut self);

    /// Submits a validated draft for creation.
    fn create_schema(&mut self, draft: &SchemaDraft);

    /// Requests deletion of the named schema.
    fn delete_schema(&mut self, name: &str);
}

/// Read access to the known schemas and microschemas.
///
/// `None` means the feed has not produced a list; the editor treats it as
/// empty.
pub trait EntityFeed {
    fn all_schemas(&self) -> Option<Vec<SchemaReference>>;

    fn all_microschemas(&self) -> Option<Vec<SchemaReference>>;
}

/// Sorts references by name, case-sensitive ascending.
///
/// # Examples
///
/// ```
/// use content_schema_core::SchemaReference;
/// use content_schema_editor::sort_by_name;
///
/// let sorted = sort_by_name(vec![
///     SchemaReference::new("folder"),
///     SchemaReference::new("Article"),
///     SchemaReference::new("content"),
/// ]);
/// let names: Vec<_> = sorted.iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, vec!["Article", "content", "folder"]);
/// ```
pub fn sort_by_name(mut references: Vec<SchemaReference>) -> Vec<SchemaReference> {
    references.sort_by(|a, b| a.name.cmp(&b.name));
    references
}

pub(crate) fn sorted_feed(feed: Option<Vec<SchemaReference>>, kind: &str) -> Vec<SchemaReference> {
    match feed {
        Some(references) => sort_by_name(references),
        None => {
            warn!(feed = kind, "feed not available, treating as empty");
            Vec::new()
        }
    }
}
