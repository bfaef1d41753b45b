use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::errors::StorageError;
use crate::product::Product;

/// Default location of the products file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "./products.json";

/// Whole-file JSON store for the product list.
///
/// Every call goes to disk: `load` reads the full set and `save` rewrites it.
/// Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full product set
    pub async fn load(&self) -> Result<Vec<Product>, StorageError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })?;

        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|source| StorageError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        debug!("Loaded {} products from {}", products.len(), self.path.display());
        Ok(products)
    }

    /// Overwrite the full product set.
    ///
    /// The new content goes to a sibling temp file which is then renamed over
    /// the target, so readers see either the old or the new set.
    pub async fn save(&self, products: &[Product]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(products)
            .map_err(|source| StorageError::Encode { source })?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, content)
            .await
            .map_err(|source| StorageError::Write {
                path: tmp_path.clone(),
                source,
            })?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("Saved {} products to {}", products.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Create the products file with an empty list if it does not exist yet.
///
/// An existing file is left untouched, even if its content is invalid.
pub async fn init_storage(path: &Path) -> Result<(), StorageError> {
    let exists = tokio::fs::try_exists(path)
        .await
        .map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    if exists {
        info!("Using existing products file at {}", path.display());
        return Ok(());
    }

    info!("Creating empty products file at {}", path.display());
    JsonFileStore::new(path).save(&[]).await
}
