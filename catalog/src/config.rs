//! Editor configuration.
//!
//! Defines the YAML-serializable configuration that tells the tooling where
//! the schema catalog lives and how new editors start out.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! catalog:
//!   dir: catalog/
//!   bundle: catalog.json
//! editor:
//!   initial_field_rows: 1
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use content_schema_editor::EditorSettings;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::loader::CatalogBuilder;

/// Where the schema catalog is loaded from.
///
/// Both sources are optional. When both are set the directory is tried
/// first and the bundle serves as fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog directory with `schemas/` and `microschemas/` subdirectories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Single JSON bundle file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<PathBuf>,
}

impl CatalogConfig {
    /// Returns a [`CatalogBuilder`] with the configured sources in fallback
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use content_schema_catalog::CatalogConfig;
    ///
    /// let config = CatalogConfig::default();
    /// assert!(config.builder().is_empty());
    /// ```
    pub fn builder(&self) -> CatalogBuilder {
        let mut builder = CatalogBuilder::new();
        if let Some(dir) = &self.dir {
            builder = builder.from_dir(dir);
        }
        if let Some(bundle) = &self.bundle {
            builder = builder.from_bundle(bundle);
        }
        builder
    }
}

/// Top-level editor configuration.
///
/// Loaded from a YAML file (typically `.schema-editor.yml`). Every section
/// may be omitted.
///
/// # Examples
///
/// ```no_run
/// use content_schema_catalog::EditorConfig;
///
/// let config = EditorConfig::load(".schema-editor.yml").unwrap();
/// println!("new schemas start with {} row(s)", config.editor.initial_field_rows);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Catalog sources.
    pub catalog: CatalogConfig,
    /// Settings for new editors.
    pub editor: EditorSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            catalog: CatalogConfig::default(),
            editor: EditorSettings::default(),
        }
    }
}

impl EditorConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CatalogError::IoError) if the file cannot be
    /// read, [`YamlError`](CatalogError::YamlError) if parsing fails, or
    /// [`InvalidConfig`](CatalogError::InvalidConfig) if the version is
    /// blank.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        if config.version.trim().is_empty() {
            return Err(CatalogError::InvalidConfig("version must not be empty".into()));
        }
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](CatalogError::IoError) if the file cannot be
    /// written, or [`YamlError`](CatalogError::YamlError) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
