//! Flat JSON-file persistence.
//!
//! The whole document lives in one file. Every operation reads the entire file,
//! mutates it in memory and writes the entire file back. Nothing here locks the
//! file; callers inside one process share a `JsonStore` behind a mutex, but two
//! processes writing the same path can still overwrite each other.

use crate::domain::model::{Product, Profile};
use crate::storage::seed::seed_document;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The persisted document: a product list and the single artisan profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub products: Vec<Product>,
    pub profile: Profile,
}

#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Reads the document, writing the seed document first if the file is missing.
    ///
    /// A file that exists but does not parse is moved aside to
    /// `<file>.corrupt-<unix-ts>` and replaced by the seed document.
    pub async fn read_db(&self) -> Result<Document, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => match serde_json::from_str::<Document>(&contents) {
                Ok(doc) => Ok(doc),
                Err(e) => {
                    let aside = self.corrupt_path();
                    warn!(
                        path = %self.path.display(),
                        moved_to = %aside.display(),
                        error = %e,
                        "Data file does not parse; reseeding"
                    );
                    tokio::fs::rename(&self.path, &aside)
                        .await
                        .map_err(|e| self.io_err(e))?;
                    self.seed().await
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "Data file missing; writing seed document");
                self.seed().await
            }
            Err(e) => Err(self.io_err(e)),
        }
    }

    async fn seed(&self) -> Result<Document, StoreError> {
        let doc = seed_document();
        self.write_db(&doc).await?;
        Ok(doc)
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".corrupt-{}", Utc::now().timestamp()));
        self.path.with_file_name(name)
    }

    /// Replaces the whole file with `doc`, pretty-printed with two-space indentation.
    ///
    /// The new contents are written to a sibling temp file and renamed over the
    /// original so a crash mid-write never leaves a truncated document.
    pub async fn write_db(&self, doc: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_err(e))?;
        }

        let mut tmp_name = self.path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);

        tokio::fs::write(&tmp, json).await.map_err(|e| self.io_err(e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_err(e))?;
        debug!(path = %self.path.display(), "Data file written");
        Ok(())
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.read_db().await?.products)
    }

    /// Stamps `product.date` with the current time and prepends it to the list.
    pub async fn add_product(&self, mut product: Product) -> Result<Product, StoreError> {
        let mut doc = self.read_db().await?;
        product.date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        doc.products.insert(0, product.clone());
        self.write_db(&doc).await?;
        Ok(product)
    }

    pub async fn get_profile(&self) -> Result<Profile, StoreError> {
        Ok(self.read_db().await?.profile)
    }

    pub async fn save_profile(&self, profile: Profile) -> Result<Profile, StoreError> {
        let mut doc = self.read_db().await?;
        doc.profile = profile;
        self.write_db(&doc).await?;
        Ok(doc.profile)
    }
}
