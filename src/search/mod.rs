pub mod types;

pub use types::{BedroomFilter, SearchCriteria, SearchForm, TypeFilter, ANY};

use crate::error::CriteriaError;
use crate::models::{PropertyRecord, PropertyType};
use std::sync::Arc;
use tracing::debug;

/// Records satisfying `criteria`, in their original order
pub fn filter(
    records: &[Arc<PropertyRecord>],
    criteria: &SearchCriteria,
) -> Vec<Arc<PropertyRecord>> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Validate a submitted form, then filter
pub fn search(
    records: &[Arc<PropertyRecord>],
    form: &SearchForm,
) -> Result<Vec<Arc<PropertyRecord>>, CriteriaError> {
    let criteria = form.parse()?;
    let results = filter(records, &criteria);
    debug!("Search matched {} of {} properties", results.len(), records.len());
    Ok(results)
}

/// Distinct property types in first-seen order
pub fn available_types(records: &[Arc<PropertyRecord>]) -> Vec<PropertyType> {
    let mut kinds: Vec<PropertyType> = Vec::new();
    for record in records {
        if !kinds.contains(&record.property_type) {
            kinds.push(record.property_type.clone());
        }
    }
    kinds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Price, PropertyId};
    use chrono::NaiveDate;

    fn record(id: u64, kind: &str, price: u64, bedrooms: u32) -> Arc<PropertyRecord> {
        Arc::new(PropertyRecord {
            id: PropertyId::from(id),
            property_type: PropertyType::from(kind),
            price: Price::from(price),
            location: String::new(),
            bedrooms,
            date_added: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            description: String::new(),
            picture: String::new(),
            images: Vec::new(),
            tenure: None,
            url: None,
        })
    }

    fn ids(records: &[Arc<PropertyRecord>]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn bedroom_minimum_is_inclusive() {
        let data = vec![
            record(1, "House", 1, 2),
            record(2, "House", 1, 3),
            record(3, "House", 1, 4),
        ];
        let criteria = SearchCriteria::new(
            TypeFilter::Any,
            BedroomFilter::AtLeast(3),
            Price::ZERO,
            Price::MAX,
        )
        .unwrap();
        assert_eq!(ids(&filter(&data, &criteria)), ["2", "3"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let data = vec![
            record(1, "Flat", 99, 1),
            record(2, "Flat", 100, 1),
            record(3, "Flat", 200, 1),
            record(4, "Flat", 201, 1),
        ];
        let criteria = SearchCriteria::new(
            TypeFilter::Any,
            BedroomFilter::Any,
            Price::from(100),
            Price::from(200),
        )
        .unwrap();
        assert_eq!(ids(&filter(&data, &criteria)), ["2", "3"]);
    }

    #[test]
    fn fractional_prices_compare_exactly() {
        let mut cheap = (*record(1, "Flat", 0, 1)).clone();
        cheap.price = Price::new(99.99).unwrap();
        let mut edge = (*record(2, "Flat", 0, 1)).clone();
        edge.price = Price::new(100.5).unwrap();
        let data = vec![Arc::new(cheap), Arc::new(edge)];

        let criteria = SearchCriteria::new(
            TypeFilter::Any,
            BedroomFilter::Any,
            Price::new(100.5).unwrap(),
            Price::MAX,
        )
        .unwrap();
        assert_eq!(ids(&filter(&data, &criteria)), ["2"]);
    }

    #[test]
    fn all_three_conditions_must_hold() {
        let data = vec![
            record(1, "House", 300, 3),
            record(2, "Flat", 300, 3),
            record(3, "House", 300, 1),
            record(4, "House", 900, 3),
        ];
        let criteria = SearchCriteria::new(
            TypeFilter::Only(PropertyType::House),
            BedroomFilter::AtLeast(2),
            Price::ZERO,
            Price::from(500),
        )
        .unwrap();
        assert_eq!(ids(&filter(&data, &criteria)), ["1"]);
    }

    #[test]
    fn no_match_is_an_empty_result() {
        let data = vec![record(1, "House", 300, 3)];
        let form = SearchForm {
            property_type: "Bungalow".to_string(),
            ..SearchForm::unbounded()
        };
        assert!(search(&data, &form).unwrap().is_empty());
        assert!(search(&[], &SearchForm::unbounded()).unwrap().is_empty());
    }

    #[test]
    fn malformed_form_fails_before_filtering() {
        let data = vec![record(1, "House", 300, 3)];
        let form = SearchForm {
            bedrooms: "lots".to_string(),
            ..SearchForm::unbounded()
        };
        assert_eq!(
            search(&data, &form),
            Err(CriteriaError::MalformedBedrooms("lots".to_string()))
        );
    }

    #[test]
    fn types_listed_once_in_first_seen_order() {
        let data = vec![
            record(1, "Flat", 1, 1),
            record(2, "House", 1, 1),
            record(3, "Flat", 1, 1),
        ];
        assert_eq!(available_types(&data), [PropertyType::Flat, PropertyType::House]);
    }
}
