use crate::dataset::Dataset;
use crate::error::DetailError;
use crate::models::{PropertyId, PropertyRecord};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Description,
    FloorPlan,
    Map,
}

impl DetailTab {
    pub const ALL: [DetailTab; 3] = [
        DetailTab::Description,
        DetailTab::FloorPlan,
        DetailTab::Map,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Description => "Description",
            DetailTab::FloorPlan => "Floor Plan",
            DetailTab::Map => "Map",
        }
    }
}

impl fmt::Display for DetailTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DetailTab {
    type Err = DetailError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace([' ', '-', '_'], "").as_str() {
            "description" => Ok(DetailTab::Description),
            "floorplan" => Ok(DetailTab::FloorPlan),
            "map" => Ok(DetailTab::Map),
            _ => Err(DetailError::UnknownTab(raw.to_string())),
        }
    }
}

/// What the detail route shows for a requested id
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Found(DetailView),
    NotFound(PropertyId),
}

impl DetailState {
    /// Resolve `id` against the dataset; a miss is a placeholder, not an error
    pub fn lookup(dataset: &Dataset, id: &PropertyId) -> Self {
        match dataset.find(id) {
            Some(record) => DetailState::Found(DetailView::new(Arc::clone(record))),
            None => {
                warn!("Property {} not found", id);
                DetailState::NotFound(id.clone())
            }
        }
    }
}

/// Per-visit state of a listing's detail page
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    record: Arc<PropertyRecord>,
    main_image: String,
    tab: DetailTab,
}

impl DetailView {
    pub fn new(record: Arc<PropertyRecord>) -> Self {
        let main_image = record.picture.clone();
        Self {
            record,
            main_image,
            tab: DetailTab::default(),
        }
    }

    pub fn record(&self) -> &Arc<PropertyRecord> {
        &self.record
    }

    /// Image shown in the large preview
    pub fn main_image(&self) -> &str {
        &self.main_image
    }

    pub fn thumbnails(&self) -> &[String] {
        &self.record.images
    }

    /// Make thumbnail `index` the large preview. Out of range changes nothing.
    pub fn select_image(&mut self, index: usize) -> bool {
        match self.record.images.get(index) {
            Some(image) => {
                debug!("Preview image for {} is now {}", self.record.id, image);
                self.main_image = image.clone();
                true
            }
            None => false,
        }
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: DetailTab) {
        self.tab = tab;
    }

    pub fn map_embed_url(&self) -> String {
        let query: String =
            form_urlencoded::byte_serialize(self.record.location.as_bytes()).collect();
        format!("https://maps.google.com/maps?q={query}&t=&z=13&ie=UTF8&iwloc=&output=embed")
    }
}
