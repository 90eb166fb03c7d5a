//! Catalog loading with builder pattern and fallback chains.
//!
//! Provides [`SchemaCatalog`] for looking up the known schemas and
//! microschemas, and [`CatalogBuilder`] for constructing a catalog from
//! several sources with automatic fallback.
//!
//! # Loading patterns
//!
//! ```no_run
//! use content_schema_catalog::SchemaCatalog;
//!
//! // A directory with `schemas/*.json` and `microschemas/*.json`
//! let catalog = SchemaCatalog::from_dir("catalog/").unwrap();
//! assert!(catalog.get_schema("folder").is_some());
//!
//! // A single bundle file `{"schemas": [...], "microschemas": [...]}`
//! let catalog = SchemaCatalog::from_bundle("catalog.json").unwrap();
//!
//! // First source that loads wins
//! let catalog = SchemaCatalog::builder()
//!     .from_dir("catalog/")
//!     .from_bundle("catalog.json")
//!     .build()
//!     .unwrap();
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use content_schema_core::SchemaReference;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

/// Directory holding schema files inside a catalog directory.
pub const SCHEMAS_DIR: &str = "schemas";

/// Directory holding microschema files inside a catalog directory.
pub const MICROSCHEMAS_DIR: &str = "microschemas";

/// Describes where a [`SchemaCatalog`] was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A directory with `schemas/` and `microschemas/` subdirectories.
    Directory(PathBuf),
    /// A single [`CatalogBundle`] JSON file.
    Bundle(PathBuf),
    /// Built in memory.
    InMemory,
    /// Loaded via a fallback chain of several sources.
    Multiple(Vec<CatalogSource>),
}

/// Serialized form of a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogBundle {
    #[serde(default)]
    pub schemas: Vec<SchemaReference>,
    #[serde(default)]
    pub microschemas: Vec<SchemaReference>,
}

/// Known schemas and microschemas, indexed by name.
///
/// # Examples
///
/// ```
/// use content_schema_catalog::SchemaCatalog;
/// use content_schema_core::SchemaReference;
///
/// let mut catalog = SchemaCatalog::new();
/// catalog.insert_schema(SchemaReference::new("folder"));
/// catalog.insert_microschema(SchemaReference::new("vcard"));
///
/// assert!(catalog.contains_schema("folder"));
/// assert_eq!(catalog.microschema_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    schemas: HashMap<String, SchemaReference>,
    microschemas: HashMap<String, SchemaReference>,
    source: CatalogSource,
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCatalog {
    /// Creates an empty in-memory catalog.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
            microschemas: HashMap::new(),
            source: CatalogSource::InMemory,
        }
    }

    /// Returns a new [`CatalogBuilder`] for configuring a fallback chain.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Loads a catalog directory.
    ///
    /// Every `*.json` file in `schemas/` and `microschemas/` is parsed as a
    /// [`SchemaReference`]; fields other than `name`, `uuid` and
    /// `description` are ignored, so full schema documents load as well. A
    /// missing subdirectory contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IoError`] if `path` is not a readable
    /// directory or a file cannot be opened, or [`CatalogError::JsonError`]
    /// if a file contains invalid JSON.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // fail early when the catalog root itself is missing
        std::fs::read_dir(path)?;

        let schemas = read_reference_dir(&path.join(SCHEMAS_DIR))?;
        let microschemas = read_reference_dir(&path.join(MICROSCHEMAS_DIR))?;

        Ok(Self {
            schemas: index_by_name(schemas),
            microschemas: index_by_name(microschemas),
            source: CatalogSource::Directory(path.to_path_buf()),
        })
    }

    /// Loads a single [`CatalogBundle`] JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IoError`] if the file cannot be read, or
    /// [`CatalogError::JsonError`] if parsing fails.
    pub fn from_bundle(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let bundle: CatalogBundle = serde_json::from_reader(reader)?;

        let mut catalog = Self::from(bundle);
        catalog.source = CatalogSource::Bundle(path.to_path_buf());
        Ok(catalog)
    }

    pub fn get_schema(&self, name: &str) -> Option<&SchemaReference> {
        self.schemas.get(name)
    }

    pub fn get_microschema(&self, name: &str) -> Option<&SchemaReference> {
        self.microschemas.get(name)
    }

    pub fn contains_schema(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    pub fn contains_microschema(&self, name: &str) -> bool {
        self.microschemas.contains_key(name)
    }

    /// Inserts a schema, replacing any entry with the same name.
    pub fn insert_schema(&mut self, reference: SchemaReference) {
        self.schemas.insert(reference.name.clone(), reference);
    }

    /// Inserts a microschema, replacing any entry with the same name.
    pub fn insert_microschema(&mut self, reference: SchemaReference) {
        self.microschemas.insert(reference.name.clone(), reference);
    }

    /// Removes a schema by name.
    pub fn remove_schema(&mut self, name: &str) -> Option<SchemaReference> {
        self.schemas.remove(name)
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    pub fn microschema_count(&self) -> usize {
        self.microschemas.len()
    }

    /// All schemas, in no particular order.
    pub fn schemas(&self) -> Vec<SchemaReference> {
        self.schemas.values().cloned().collect()
    }

    /// All microschemas, in no particular order.
    pub fn microschemas(&self) -> Vec<SchemaReference> {
        self.microschemas.values().cloned().collect()
    }

    /// Returns a reference to the source metadata.
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Serializable snapshot, each list sorted by name.
    pub fn to_bundle(&self) -> CatalogBundle {
        CatalogBundle {
            schemas: content_schema_editor::sort_by_name(self.schemas()),
            microschemas: content_schema_editor::sort_by_name(self.microschemas()),
        }
    }
}

impl From<CatalogBundle> for SchemaCatalog {
    fn from(bundle: CatalogBundle) -> Self {
        Self {
            schemas: index_by_name(bundle.schemas),
            microschemas: index_by_name(bundle.microschemas),
            source: CatalogSource::InMemory,
        }
    }
}

fn index_by_name(references: Vec<SchemaReference>) -> HashMap<String, SchemaReference> {
    references
        .into_iter()
        .map(|reference| (reference.name.clone(), reference))
        .collect()
}

fn read_reference_dir(dir: &Path) -> Result<Vec<SchemaReference>> {
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "catalog subdirectory missing, skipping");
        return Ok(Vec::new());
    }

    let mut references = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_path = entry.path();
        if file_path.extension().and_then(|e| e.to_str()) == Some("json") {
            let file = std::fs::File::open(&file_path)?;
            let reader = std::io::BufReader::new(file);
            let reference: SchemaReference = serde_json::from_reader(reader)?;
            references.push(reference);
        }
    }
    Ok(references)
}

/// Builder for constructing a [`SchemaCatalog`] with a fallback chain.
///
/// Sources are tried in the order they are added. The first successful load
/// wins; if all fail, [`CatalogError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use content_schema_catalog::SchemaCatalog;
///
/// let catalog = SchemaCatalog::builder()
///     .from_dir("/srv/catalog/")
///     .from_bundle("/srv/catalog.json")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    sources: Vec<CatalogSource>,
}

impl CatalogBuilder {
    /// Creates a new builder with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a catalog directory as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(CatalogSource::Directory(path.into()));
        self
    }

    /// Adds a [`CatalogBundle`] file as a source.
    pub fn from_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(CatalogSource::Bundle(path.into()));
        self
    }

    /// Returns `true` if no source has been added.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Attempts to load a catalog from the configured sources in order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NoSourcesAvailable`] if there are no sources
    /// or every source fails to load.
    pub fn build(&self) -> Result<SchemaCatalog> {
        if self.sources.is_empty() {
            return Err(CatalogError::NoSourcesAvailable);
        }

        for source in &self.sources {
            let result = match source {
                CatalogSource::Directory(path) => SchemaCatalog::from_dir(path),
                CatalogSource::Bundle(path) => SchemaCatalog::from_bundle(path),
                CatalogSource::InMemory | CatalogSource::Multiple(_) => continue,
            };

            match result {
                Ok(mut catalog) => {
                    catalog.source = CatalogSource::Multiple(self.sources.clone());
                    return Ok(catalog);
                }
                Err(err) => warn!(source = ?source, error = %err, "catalog source failed"),
            }
        }

        Err(CatalogError::NoSourcesAvailable)
    }
}
