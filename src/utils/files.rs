use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::Catalog;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid catalog JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn io_error(path: &Path, source: io::Error) -> CatalogError {
    CatalogError::Io {
        path: path.display().to_string(),
        source,
    }
}

fn json_error(path: &Path, source: serde_json::Error) -> CatalogError {
    CatalogError::Json {
        path: path.display().to_string(),
        source,
    }
}

/// Write the catalog as pretty JSON, replacing whatever was there before
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let json = catalog.to_json_pretty().map_err(|e| json_error(path, e))?;
    ensure_parent(path)?;
    fs::write(path, json).map_err(|e| io_error(path, e))?;
    info!("Saved {} items to {}", catalog.len(), path.display());
    Ok(())
}

pub fn read_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&content).map_err(|e| json_error(path, e))
}

/// Write a list of identifiers (failed downloads) as a JSON array
pub fn write_name_list(path: &Path, names: &[String]) -> Result<(), CatalogError> {
    let json = serde_json::to_string_pretty(names).map_err(|e| json_error(path, e))?;
    ensure_parent(path)?;
    fs::write(path, json).map_err(|e| io_error(path, e))
}

fn ensure_parent(path: &Path) -> Result<(), CatalogError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| io_error(parent, e))
        }
        _ => Ok(()),
    }
}
