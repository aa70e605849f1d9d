//! Drag-and-drop transfer data.
//!
//! A drag cannot carry a live record between the drag-start and drop
//! handlers, only strings. The payload is the listing id plus the zone it was
//! dragged from; the drop side resolves the id against the dataset again.

use crate::error::TransferError;
use crate::models::PropertyId;
use std::fmt;
use std::str::FromStr;

/// Data-transfer key holding the listing id
pub const ID_KEY: &str = "propertyId";
/// Data-transfer key holding the source zone tag
pub const SOURCE_KEY: &str = "source";

/// Areas a listing can be dragged from or dropped onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Results,
    Favourites,
}

impl Zone {
    pub fn tag(self) -> &'static str {
        match self {
            Zone::Results => "results",
            Zone::Favourites => "favourites",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Zone {
    type Err = TransferError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "results" => Ok(Zone::Results),
            "favourites" => Ok(Zone::Favourites),
            other => Err(TransferError::UnknownZone(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPayload {
    pub id: PropertyId,
    pub source: Zone,
}

impl TransferPayload {
    pub fn new(id: PropertyId, source: Zone) -> Self {
        Self { id, source }
    }

    /// Key/value pairs to put on the data-transfer channel
    pub fn encode(&self) -> [(&'static str, String); 2] {
        [
            (ID_KEY, self.id.to_string()),
            (SOURCE_KEY, self.source.tag().to_string()),
        ]
    }

    /// Rebuild a payload from the channel's values
    pub fn decode(id: &str, source: &str) -> Result<Self, TransferError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TransferError::MissingId);
        }
        Ok(Self {
            id: PropertyId::from(id),
            source: source.parse()?,
        })
    }
}
