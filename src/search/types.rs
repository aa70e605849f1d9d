use crate::config::PriceSlider;
use crate::error::CriteriaError;
use crate::models::{Price, PropertyRecord, PropertyType};

/// Wildcard accepted by the type and bedroom selectors
pub const ANY: &str = "Any";

/// Raw search input exactly as the user submitted it
///
/// A missing price bound means unbounded on that side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub property_type: String,
    pub bedrooms: String,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl SearchForm {
    /// Form with every field wide open
    pub fn unbounded() -> Self {
        Self {
            property_type: ANY.to_string(),
            bedrooms: ANY.to_string(),
            min_price: None,
            max_price: None,
        }
    }

    /// Initial form state: wildcards plus the slider's default selection
    pub fn with_slider(slider: &PriceSlider) -> Self {
        Self {
            min_price: Some(slider.default_min.to_string()),
            max_price: Some(slider.default_max.to_string()),
            ..Self::unbounded()
        }
    }

    /// Validate into criteria the filter engine can run
    pub fn parse(&self) -> Result<SearchCriteria, CriteriaError> {
        let min_price = match &self.min_price {
            Some(raw) => parse_price("minPrice", raw)?,
            None => Price::ZERO,
        };
        let max_price = match &self.max_price {
            Some(raw) => parse_price("maxPrice", raw)?,
            None => Price::MAX,
        };

        SearchCriteria::new(
            TypeFilter::parse(&self.property_type),
            BedroomFilter::parse(&self.bedrooms)?,
            min_price,
            max_price,
        )
    }
}

impl Default for SearchForm {
    fn default() -> Self {
        Self::with_slider(&PriceSlider::default())
    }
}

/// Non-negative decimal amount; `,` and `_` may group thousands
fn parse_price(field: &'static str, raw: &str) -> Result<Price, CriteriaError> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    digits
        .parse::<f64>()
        .ok()
        .and_then(Price::new)
        .ok_or_else(|| CriteriaError::MalformedPrice {
            field,
            value: raw.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    Any,
    Only(PropertyType),
}

impl TypeFilter {
    /// Only the exact `Any` is a wildcard; every other value, blank included,
    /// must equal a record's type
    pub fn parse(raw: &str) -> Self {
        if raw == ANY {
            TypeFilter::Any
        } else {
            TypeFilter::Only(PropertyType::from(raw))
        }
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::Only(kind) => &record.property_type == kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedroomFilter {
    Any,
    AtLeast(u32),
}

impl BedroomFilter {
    /// `Any` or a non-negative integer; anything else is rejected, never read as zero
    pub fn parse(raw: &str) -> Result<Self, CriteriaError> {
        let raw = raw.trim();
        if raw == ANY {
            return Ok(BedroomFilter::Any);
        }
        raw.parse()
            .map(BedroomFilter::AtLeast)
            .map_err(|_| CriteriaError::MalformedBedrooms(raw.to_string()))
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        match self {
            BedroomFilter::Any => true,
            BedroomFilter::AtLeast(min) => record.bedrooms >= *min,
        }
    }
}

/// Validated search parameters. Price bounds are inclusive and ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    property_type: TypeFilter,
    bedrooms: BedroomFilter,
    min_price: Price,
    max_price: Price,
}

impl SearchCriteria {
    pub fn new(
        property_type: TypeFilter,
        bedrooms: BedroomFilter,
        min_price: Price,
        max_price: Price,
    ) -> Result<Self, CriteriaError> {
        if min_price > max_price {
            return Err(CriteriaError::InvertedPriceRange {
                min: min_price,
                max: max_price,
            });
        }

        Ok(Self {
            property_type,
            bedrooms,
            min_price,
            max_price,
        })
    }

    /// Criteria every record satisfies
    pub fn any() -> Self {
        Self {
            property_type: TypeFilter::Any,
            bedrooms: BedroomFilter::Any,
            min_price: Price::ZERO,
            max_price: Price::MAX,
        }
    }

    pub fn property_type(&self) -> &TypeFilter {
        &self.property_type
    }

    pub fn bedrooms(&self) -> BedroomFilter {
        self.bedrooms
    }

    pub fn min_price(&self) -> Price {
        self.min_price
    }

    pub fn max_price(&self) -> Price {
        self.max_price
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        self.property_type.matches(record)
            && self.bedrooms.matches(record)
            && (self.min_price..=self.max_price).contains(&record.price)
    }
}
