//! File-backed collaborator for the editor.
//!
//! [`CatalogService`] answers the editor's load requests by reading the
//! configured catalog sources and queues create and delete requests for
//! whoever owns the service to carry out.

use content_schema_core::{SchemaDraft, SchemaReference};
use content_schema_editor::{EntityFeed, SchemaEffects};
use tracing::{debug, info, warn};

use crate::loader::{CatalogBuilder, SchemaCatalog};

/// A request handed over by the editor that the service does not perform
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRequest {
    Create(SchemaDraft),
    Delete(String),
}

/// Catalog-backed [`SchemaEffects`] and [`EntityFeed`].
///
/// Feeds stay `None` until the corresponding load request succeeded.
///
/// # Examples
///
/// ```
/// use content_schema_catalog::{CatalogBuilder, CatalogService};
/// use content_schema_editor::{EntityFeed, SchemaEditor};
///
/// let mut service = CatalogService::new(CatalogBuilder::new());
/// let editor = SchemaEditor::new();
/// editor.init(&mut service);
///
/// // no sources configured, nothing could be loaded
/// assert!(service.all_schemas().is_none());
/// assert!(editor.all_schemas(&service).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct CatalogService {
    sources: CatalogBuilder,
    schemas: Option<Vec<SchemaReference>>,
    microschemas: Option<Vec<SchemaReference>>,
    pending: Vec<CatalogRequest>,
}

impl CatalogService {
    pub fn new(sources: CatalogBuilder) -> Self {
        Self {
            sources,
            schemas: None,
            microschemas: None,
            pending: Vec::new(),
        }
    }

    /// Service whose feeds are already filled from `catalog`.
    pub fn from_catalog(catalog: &SchemaCatalog) -> Self {
        Self {
            sources: CatalogBuilder::new(),
            schemas: Some(catalog.schemas()),
            microschemas: Some(catalog.microschemas()),
            pending: Vec::new(),
        }
    }

    /// Requests queued by the editor, oldest first.
    pub fn pending(&self) -> &[CatalogRequest] {
        &self.pending
    }

    /// Removes and returns all queued requests.
    pub fn take_pending(&mut self) -> Vec<CatalogRequest> {
        std::mem::take(&mut self.pending)
    }

    fn load(&self) -> Option<SchemaCatalog> {
        match self.sources.build() {
            Ok(catalog) => Some(catalog),
            Err(err) => {
                warn!(error = %err, "catalog load failed");
                None
            }
        }
    }
}

impl SchemaEffects for CatalogService {
    fn load_schemas(&mut self) {
        if let Some(catalog) = self.load() {
            debug!(count = catalog.schema_count(), "schemas loaded");
            self.schemas = Some(catalog.schemas());
        }
    }

    fn load_microschemas(&mut self) {
        if let Some(catalog) = self.load() {
            debug!(count = catalog.microschema_count(), "microschemas loaded");
            self.microschemas = Some(catalog.microschemas());
        }
    }

    fn create_schema(&mut self, draft: &SchemaDraft) {
        info!(schema = %draft.name, "create request queued");
        self.pending.push(CatalogRequest::Create(draft.clone()));
    }

    fn delete_schema(&mut self, name: &str) {
        info!(schema = name, "delete request queued");
        self.pending.push(CatalogRequest::Delete(name.to_string()));
    }
}

impl EntityFeed for CatalogService {
    fn all_schemas(&self) -> Option<Vec<SchemaReference>> {
        self.schemas.clone()
    }

    fn all_microschemas(&self) -> Option<Vec<SchemaReference>> {
        self.microschemas.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::CatalogBundle;

    fn bundle_file(dir: &std::path::Path) -> std::path::PathBuf {
        let path = dir.join("catalog.json");
        let bundle = CatalogBundle {
            schemas: vec![SchemaReference::new("folder"), SchemaReference::new("Article")],
            microschemas: vec![SchemaReference::new("vcard")],
        };
        std::fs::write(&path, serde_json::to_string(&bundle).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_load_requests_fill_feeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = bundle_file(dir.path());
        let mut service = CatalogService::new(CatalogBuilder::new().from_bundle(path));

        service.load_schemas();
        assert_eq!(service.all_schemas().map(|s| s.len()), Some(2));
        assert!(service.all_microschemas().is_none());

        service.load_microschemas();
        assert_eq!(service.all_microschemas().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_failed_load_keeps_feed_empty() {
        let mut service =
            CatalogService::new(CatalogBuilder::new().from_bundle("/nonexistent/catalog.json"));
        service.load_schemas();
        assert!(service.all_schemas().is_none());
    }

    #[test]
    fn test_requests_are_queued() {
        let mut service = CatalogService::from_catalog(&SchemaCatalog::new());
        service.create_schema(&SchemaDraft::new("page"));
        service.delete_schema("folder");

        assert_eq!(service.pending().len(), 2);
        let taken = service.take_pending();
        assert_eq!(taken[1], CatalogRequest::Delete("folder".into()));
        assert!(service.pending().is_empty());
    }
}
