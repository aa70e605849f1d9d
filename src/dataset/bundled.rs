use crate::dataset::traits::DatasetSource;
use crate::dataset::Dataset;
use crate::error::DatasetError;
use async_trait::async_trait;
use tracing::info;

const BUNDLED_PROPERTIES: &str = include_str!("../../data/properties.json");

/// Sample listings compiled into the binary, used when no file is configured
#[derive(Debug, Default)]
pub struct BundledSource;

#[async_trait]
impl DatasetSource for BundledSource {
    async fn load(&self) -> Result<Dataset, DatasetError> {
        info!("📋 Using bundled sample dataset");
        let dataset = Dataset::from_json_str(BUNDLED_PROPERTIES)?;
        info!("Loaded {} properties", dataset.len());
        Ok(dataset)
    }

    fn describe(&self) -> String {
        "bundled sample dataset".to_string()
    }
}
