//! GeoJSON snapshot read from disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::geojson::decode_feature_collection;
use super::{SourceError, TaxiSnapshot, TaxiSource};

/// Re-reads a saved API response on every fetch.
#[derive(Debug, Clone)]
pub struct FileTaxiSource {
    path: PathBuf,
}

impl FileTaxiSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl TaxiSource for FileTaxiSource {
    async fn fetch(&self) -> Result<TaxiSnapshot, SourceError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        decode_feature_collection(&body)
    }

    fn name(&self) -> &str {
        "file"
    }
}
