use crate::dataset::traits::DatasetSource;
use crate::dataset::Dataset;
use crate::error::DatasetError;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Dataset read from a JSON file on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DatasetSource for FileSource {
    async fn load(&self) -> Result<Dataset, DatasetError> {
        info!("Reading dataset from {}", self.path.display());

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DatasetError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!("Read {} bytes of JSON", json.len());

        let dataset = Dataset::from_json_str(&json)?;
        info!("Loaded {} properties", dataset.len());
        Ok(dataset)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
