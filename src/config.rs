use std::path::PathBuf;

use crate::dataset::{BundledSource, DatasetSource, FileSource};

pub const DEFAULT_CURRENCY: &str = "LKR";

/// Prefix image references are served under
///
/// Depends on where the viewer is deployed, so it is configuration rather than
/// part of the records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetBase(String);

impl AssetBase {
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        Self(prefix)
    }

    pub fn prefix(&self) -> &str {
        &self.0
    }

    /// Join an image reference onto the prefix. Absolute URLs pass through.
    pub fn resolve(&self, image: &str) -> String {
        if image.starts_with("http://") || image.starts_with("https://") {
            return image.to_string();
        }
        format!("{}{}", self.0, image.trim_start_matches('/'))
    }
}

impl Default for AssetBase {
    fn default() -> Self {
        Self::new("/")
    }
}

/// Price range control of the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSlider {
    pub min: u64,
    pub max: u64,
    pub step: u64,
    pub default_min: u64,
    pub default_max: u64,
}

impl Default for PriceSlider {
    fn default() -> Self {
        Self {
            min: 0,
            max: 2_000_000,
            step: 10_000,
            default_min: 0,
            default_max: 1_500_000,
        }
    }
}

/// Everything the viewer needs from its environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// JSON dataset on disk; `None` uses the bundled sample
    pub dataset: Option<PathBuf>,
    pub asset_base: AssetBase,
    pub currency: String,
    pub price_slider: PriceSlider,
}

impl ViewerConfig {
    pub fn dataset_source(&self) -> Box<dyn DatasetSource> {
        match &self.dataset {
            Some(path) => Box::new(FileSource::new(path.clone())),
            None => Box::new(BundledSource),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            asset_base: AssetBase::default(),
            currency: DEFAULT_CURRENCY.to_string(),
            price_slider: PriceSlider::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_base_joins_with_one_slash() {
        assert_eq!(AssetBase::default().resolve("images/a.jpg"), "/images/a.jpg");
        assert_eq!(
            AssetBase::new("/estate-app").resolve("/images/a.jpg"),
            "/estate-app/images/a.jpg"
        );
        assert_eq!(
            AssetBase::new("https://cdn.example.com/assets/").resolve("images/a.jpg"),
            "https://cdn.example.com/assets/images/a.jpg"
        );
    }

    #[test]
    fn absolute_image_urls_are_untouched() {
        let base = AssetBase::new("/estate-app/");
        assert_eq!(base.resolve("https://img.example.com/x.jpg"), "https://img.example.com/x.jpg");
    }

    #[test]
    fn default_config_uses_bundled_data() {
        let config = ViewerConfig::default();
        assert_eq!(config.dataset_source().describe(), "bundled sample dataset");
        assert_eq!(config.currency, "LKR");
    }
}
