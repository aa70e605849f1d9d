use std::path::PathBuf;

use thiserror::Error;

use crate::models::{Price, PropertyId};

/// A single record in the dataset could not be normalized
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("property {id} has no date (expected `dateAdded` or `added`)")]
    MissingDate { id: PropertyId },

    #[error("property {id} has an invalid date: {value}")]
    InvalidDate { id: PropertyId, value: String },

    #[error("property {id} has an invalid price: {value} (must be a finite, non-negative number)")]
    InvalidPrice { id: PropertyId, value: f64 },
}

/// Loading the static dataset failed
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("dataset must be an array of properties or an object with a `properties` array")]
    UnsupportedShape,

    #[error("duplicate property id in dataset: {0}")]
    DuplicateId(PropertyId),
}

/// Search input rejected before filtering
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("bedrooms must be `Any` or a whole number, got {0:?}")]
    MalformedBedrooms(String),

    #[error("{field} must be a non-negative amount, got {value:?}")]
    MalformedPrice { field: &'static str, value: String },

    #[error("minimum price {min} is above maximum price {max}")]
    InvertedPriceRange { min: Price, max: Price },
}

/// Drag-and-drop transfer data could not be decoded
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransferError {
    #[error("drag payload carries no property id")]
    MissingId,

    #[error("unknown drag-and-drop zone: {0:?}")]
    UnknownZone(String),
}

/// An interactive session line could not be understood
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Transfer(#[from] TransferError),

    #[error(transparent)]
    Detail(#[from] DetailError),
}

/// Detail page input could not be understood
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DetailError {
    #[error("unknown tab {0:?} (description, floorplan, map)")]
    UnknownTab(String),
}
