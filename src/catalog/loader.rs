//! Catalog file loading.

use std::fs;
use std::path::Path;

use super::schema::Catalog;
use crate::error::{InitCheckError, Result};

/// Load and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InitCheckError::CatalogNotFound {
                path: path.to_path_buf(),
            }
        } else {
            InitCheckError::Io(e)
        }
    })?;

    parse_catalog(&content, path)
}

/// Parse YAML content into a [`Catalog`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting; its directory anchors relative
///   `file_exists` probes
pub fn parse_catalog(content: &str, source_path: &Path) -> Result<Catalog> {
    let mut catalog: Catalog = if content.trim().is_empty() {
        Catalog::default()
    } else {
        serde_yaml::from_str(content).map_err(|e| InitCheckError::CatalogParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    catalog.base_dir = source_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    Ok(catalog)
}
