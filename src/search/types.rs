use crate::models::{float_from_value, AdType, Property, PropertyStatus, PropertyType};
use crate::normalize::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Search parameters for property listings.
///
/// Every field is optional and an absent field imposes no constraint. When
/// decoded from JSON, malformed values (a non-numeric price, an unknown status)
/// are dropped instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchCriteria {
    /// Case-insensitive substring of the listing location
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Case-insensitive substring of the title or description
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Case-insensitive substring of the city
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Country, compared case-insensitively
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min_bedrooms: Option<u32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max_bedrooms: Option<u32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min_bathrooms: Option<u32>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min_area_sqm: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max_area_sqm: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ad_type: Option<AdType>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    /// Only listings that allow pets, when `true`
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pets_allowed: Option<bool>,
    /// Only furnished listings, when `true`
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub furnished: Option<bool>,
    /// Only listings available on or before this date
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub available_from: Option<DateTime<Utc>>,
    /// 1-indexed page number
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub items: Vec<Property>,
    /// Number of matches before pagination
    pub total: usize,
}

/// A criterion value that can be recovered from loosely typed JSON.
trait Criterion: Sized {
    fn from_value(value: &Value) -> Option<Self>;
}

impl Criterion for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl Criterion for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        float_from_value(value)
    }
}

impl Criterion for u32 {
    /// Whole, non-negative numbers only; `1.5` bedrooms is not a usable bound.
    fn from_value(value: &Value) -> Option<Self> {
        float_from_value(value)
            .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u32::MAX))
            .map(|n| n as u32)
    }
}

impl Criterion for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

impl Criterion for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(parse_timestamp)
    }
}

impl Criterion for PropertyType {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(PropertyType::parse)
    }
}

impl Criterion for PropertyStatus {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(PropertyStatus::parse)
    }
}

impl Criterion for AdType {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(AdType::parse)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Criterion,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(T::from_value))
}
