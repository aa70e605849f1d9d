use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

use crate::error::RecordError;

/// Stable identifier of a listing
///
/// Datasets carry either strings (`"prop1"`) or bare numbers (`1`); both are
/// kept as text so lookups compare one way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PropertyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for PropertyId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for PropertyId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        }
    }
}

/// Kind of dwelling. Matching is case-sensitive: `"house"` is not `House`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    House,
    Flat,
    Other(String),
}

impl PropertyType {
    pub fn as_str(&self) -> &str {
        match self {
            PropertyType::House => "House",
            PropertyType::Flat => "Flat",
            PropertyType::Other(name) => name,
        }
    }
}

impl From<String> for PropertyType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "House" => PropertyType::House,
            "Flat" => PropertyType::Flat,
            _ => PropertyType::Other(name),
        }
    }
}

impl From<&str> for PropertyType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<PropertyType> for String {
    fn from(kind: PropertyType) -> Self {
        match kind {
            PropertyType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asking price, currency-agnostic
///
/// Always finite and non-negative, so it is totally ordered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Price(f64);

impl Price {
    pub const ZERO: Price = Price(0.0);
    pub const MAX: Price = Price(f64::MAX);

    /// `None` for negative, NaN or infinite amounts
    pub fn new(amount: f64) -> Option<Self> {
        // `+ 0.0` folds -0.0 into 0.0
        (amount.is_finite() && amount >= 0.0).then_some(Self(amount + 0.0))
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    pub fn is_whole(self) -> bool {
        self.0.fract() == 0.0
    }

    /// Sum that stops at `Price::MAX` instead of becoming infinite
    pub fn saturating_add(self, other: Price) -> Price {
        Price((self.0 + other.0).min(f64::MAX))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Price(amount as f64)
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Price {}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // whole amounts within u64 keep their integer JSON form
        if self.is_whole() && self.0 < u64::MAX as f64 {
            serializer.serialize_u64(self.0 as u64)
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

/// One listing from the dataset. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRecord")]
pub struct PropertyRecord {
    pub id: PropertyId,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub price: Price,
    pub location: String,
    pub bedrooms: u32,
    pub date_added: NaiveDate,
    pub description: String,
    pub picture: String,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Wire shape of a record, tolerant of both date layouts seen in datasets
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    id: PropertyId,
    #[serde(rename = "type")]
    property_type: PropertyType,
    price: f64,
    #[serde(default)]
    location: String,
    bedrooms: u32,
    date_added: Option<NaiveDate>,
    added: Option<AddedParts>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    picture: String,
    #[serde(default)]
    images: Vec<String>,
    tenure: Option<String>,
    url: Option<String>,
}

/// `"added": { "month": "October", "day": 12, "year": 2022 }`
#[derive(Deserialize)]
struct AddedParts {
    month: String,
    day: u32,
    year: i32,
}

impl AddedParts {
    fn to_date(&self, id: &PropertyId) -> Result<NaiveDate, RecordError> {
        let month: Month = self.month.parse().map_err(|_| RecordError::InvalidDate {
            id: id.clone(),
            value: format!("{} {} {}", self.day, self.month, self.year),
        })?;

        NaiveDate::from_ymd_opt(self.year, month.number_from_month(), self.day).ok_or_else(|| {
            RecordError::InvalidDate {
                id: id.clone(),
                value: format!("{} {} {}", self.day, self.month, self.year),
            }
        })
    }
}

impl TryFrom<RawRecord> for PropertyRecord {
    type Error = RecordError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let date_added = match (raw.date_added, &raw.added) {
            (Some(date), _) => date,
            (None, Some(parts)) => parts.to_date(&raw.id)?,
            (None, None) => return Err(RecordError::MissingDate { id: raw.id }),
        };
        let price = Price::new(raw.price).ok_or_else(|| RecordError::InvalidPrice {
            id: raw.id.clone(),
            value: raw.price,
        })?;

        Ok(Self {
            id: raw.id,
            property_type: raw.property_type,
            price,
            location: raw.location,
            bedrooms: raw.bedrooms,
            date_added,
            description: raw.description,
            picture: raw.picture,
            images: raw.images,
            tenure: raw.tenure,
            url: raw.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_and_text_ids_normalize_to_text() {
        let numeric: PropertyId = serde_json::from_value(json!(7)).unwrap();
        let text: PropertyId = serde_json::from_value(json!("7")).unwrap();
        assert_eq!(numeric, text);
        assert_eq!(numeric.as_str(), "7");
    }

    #[test]
    fn property_type_is_case_sensitive() {
        assert_eq!(PropertyType::from("House"), PropertyType::House);
        assert_eq!(
            PropertyType::from("house"),
            PropertyType::Other("house".to_string())
        );
        assert_ne!(PropertyType::from("flat"), PropertyType::Flat);
    }

    #[test]
    fn record_accepts_split_added_date() {
        let record: PropertyRecord = serde_json::from_value(json!({
            "id": "prop1",
            "type": "House",
            "bedrooms": 3,
            "price": 750000,
            "tenure": "Freehold",
            "description": "Attractive three bedroom semi-detached family home.",
            "location": "Petts Wood Road, Orpington BR5",
            "picture": "images/prop1pic1small.jpg",
            "added": { "month": "October", "day": 12, "year": 2022 }
        }))
        .unwrap();

        assert_eq!(record.date_added, NaiveDate::from_ymd_opt(2022, 10, 12).unwrap());
        assert!(record.images.is_empty());
        assert_eq!(record.tenure.as_deref(), Some("Freehold"));
    }

    #[test]
    fn record_round_trips_through_iso_date() {
        let record: PropertyRecord = serde_json::from_value(json!({
            "id": 2,
            "type": "Flat",
            "bedrooms": 1,
            "price": 100000,
            "dateAdded": "2023-01-05"
        }))
        .unwrap();

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["dateAdded"], json!("2023-01-05"));
        assert_eq!(value["price"], json!(100000));
        assert_eq!(value["type"], json!("Flat"));
        assert_eq!(value["id"], json!("2"));

        let again: PropertyRecord = serde_json::from_value(value).unwrap();
        assert_eq!(again, record);
    }

    #[test]
    fn fractional_prices_are_kept() {
        let record: PropertyRecord = serde_json::from_value(json!({
            "id": "a",
            "type": "Flat",
            "bedrooms": 1,
            "price": 1250.5,
            "dateAdded": "2023-01-01"
        }))
        .unwrap();

        assert_eq!(record.price.amount(), 1250.5);
        assert_eq!(serde_json::to_value(&record).unwrap()["price"], json!(1250.5));
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = serde_json::from_value::<PropertyRecord>(json!({
            "id": "a",
            "type": "Flat",
            "bedrooms": 1,
            "price": -10,
            "dateAdded": "2023-01-01"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid price"));
    }

    #[test]
    fn price_ordering_and_display() {
        assert!(Price::from(500) < Price::new(500.5).unwrap());
        assert_eq!(Price::new(-0.0), Some(Price::ZERO));
        assert_eq!(Price::new(f64::NAN), None);
        assert_eq!(Price::new(f64::INFINITY), None);
        assert_eq!(Price::from(750_000).to_string(), "750000");
        assert_eq!(Price::new(1250.5).unwrap().to_string(), "1250.5");
        assert_eq!(Price::MAX.saturating_add(Price::MAX), Price::MAX);
    }

    #[test]
    fn record_without_any_date_is_rejected() {
        let err = serde_json::from_value::<PropertyRecord>(json!({
            "id": "x",
            "type": "Flat",
            "bedrooms": 1,
            "price": 1
        }))
        .unwrap_err();
        assert!(err.to_string().contains("no date"));
    }

    #[test]
    fn impossible_calendar_day_is_rejected() {
        let err = serde_json::from_value::<PropertyRecord>(json!({
            "id": "x",
            "type": "Flat",
            "bedrooms": 1,
            "price": 1,
            "added": { "month": "February", "day": 30, "year": 2023 }
        }))
        .unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }
}
