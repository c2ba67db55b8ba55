//! Local JSON file source

use super::DataSource;
use crate::error::FetchFailure;
use crate::{Result, WxQueryError};
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::{debug, error, instrument};

/// A JSON document saved on disk
pub struct JsonFile<T> {
    path: PathBuf,
    _document: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _document: PhantomData,
        }
    }

    /// Absolute form of the path for failure reports
    fn display_path(&self) -> String {
        std::path::absolute(&self.path)
            .unwrap_or_else(|_| self.path.clone())
            .display()
            .to_string()
    }
}

impl<T: DeserializeOwned> DataSource for JsonFile<T> {
    type Document = T;

    fn is_remote(&self) -> bool {
        false
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<T> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            error!("Failed to read {}: {}", self.path.display(), e);
            WxQueryError::fetch(self.display_path(), FetchFailure::Missing)
        })?;

        debug!("Read {} bytes", content.len());

        serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse {}: {}", self.path.display(), e);
            WxQueryError::fetch(self.display_path(), FetchFailure::Format)
        })
    }
}
