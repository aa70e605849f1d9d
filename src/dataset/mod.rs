pub mod bundled;
pub mod file;
pub mod traits;

pub use bundled::BundledSource;
pub use file::FileSource;
pub use traits::DatasetSource;

use crate::error::DatasetError;
use crate::models::{PropertyId, PropertyRecord};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// The listings for one session, in file order
///
/// Records are shared (`Arc`) so favourites and search results point at the
/// same instances instead of copies.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Arc<PropertyRecord>>,
}

impl Dataset {
    /// Build from records, rejecting repeated ids
    pub fn from_records(records: Vec<PropertyRecord>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.clone()) {
                return Err(DatasetError::DuplicateId(record.id.clone()));
            }
        }

        Ok(Self {
            records: records.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse a dataset document.
    ///
    /// Accepts a bare array of properties or `{ "properties": [...] }`.
    /// Anything else is `UnsupportedShape`.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let document: Value = serde_json::from_str(json)?;

        let list = match document {
            list @ Value::Array(_) => {
                debug!("Dataset document is a bare array");
                list
            }
            Value::Object(mut wrapper) => match wrapper.remove("properties") {
                Some(list @ Value::Array(_)) => {
                    debug!("Dataset document is wrapped in `properties`");
                    list
                }
                _ => return Err(DatasetError::UnsupportedShape),
            },
            _ => return Err(DatasetError::UnsupportedShape),
        };

        let records: Vec<PropertyRecord> = serde_json::from_value(list)?;
        Self::from_records(records)
    }

    pub fn records(&self) -> &[Arc<PropertyRecord>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Linear lookup by id
    pub fn find(&self, id: &PropertyId) -> Option<&Arc<PropertyRecord>> {
        self.records.iter().find(|record| &record.id == id)
    }
}
