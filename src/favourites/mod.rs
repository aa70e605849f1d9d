use crate::models::{Price, PropertyId, PropertyRecord};
use std::sync::Arc;
use tracing::debug;

/// Result of asking the store to save a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum AddOutcome {
    Added,
    /// Already saved; nothing changed
    Duplicate,
}

/// The user's saved listings for this session
///
/// Unique by id, kept in the order they were first added. Entries share the
/// dataset's records.
#[derive(Debug, Clone, Default)]
pub struct FavouritesStore {
    entries: Vec<Arc<PropertyRecord>>,
}

impl FavouritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: Arc<PropertyRecord>) -> AddOutcome {
        if self.contains(&record.id) {
            debug!("Property {} is already a favourite", record.id);
            return AddOutcome::Duplicate;
        }

        debug!("Adding property {} to favourites", record.id);
        self.entries.push(record);
        AddOutcome::Added
    }

    /// Returns whether an entry was removed; an unknown id is not an error
    pub fn remove(&mut self, id: &PropertyId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| &entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            debug!("Removed property {} from favourites", id);
        }
        removed
    }

    pub fn clear(&mut self) {
        debug!("Clearing {} favourites", self.entries.len());
        self.entries.clear();
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    pub fn entries(&self) -> &[Arc<PropertyRecord>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PropertyRecord>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of saved prices, capped at `Price::MAX` rather than overflowing
    pub fn total_price(&self) -> Price {
        self.entries
            .iter()
            .fold(Price::ZERO, |total, entry| total.saturating_add(entry.price))
    }
}
