use crate::dataset::Dataset;
use crate::error::DatasetError;
use async_trait::async_trait;

/// Where a session's listings come from
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Load and normalize the full dataset
    async fn load(&self) -> Result<Dataset, DatasetError>;

    /// Human-readable origin, used in logs
    fn describe(&self) -> String;
}
