use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod enums;
mod raw;

pub use enums::{AdType, PromotionStatus, PropertyStatus, PropertyType, Visibility};
pub use raw::RawRecord;
pub(crate) use raw::{float_from_value, integer_from_value};

/// An image attached to a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImage {
    pub url: String,
    /// Storage identifier, derived from the URL when the backend has none
    pub public_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Whether this is the cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_main: Option<bool>,
}

impl PropertyImage {
    /// Builds an image from a bare URL, deriving the public id from its last path segment.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        let public_id = url
            .split('/')
            .last()
            .filter(|segment| !segment.is_empty())
            .unwrap_or("unknown")
            .to_string();

        Self {
            url,
            public_id,
            caption: None,
            is_main: None,
        }
    }
}

/// Open-ended amenity flags of a listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyFeatures(BTreeMap<String, bool>);

impl PropertyFeatures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the named feature is set. Unknown features are unset.
    pub fn has(&self, key: &str) -> bool {
        self.0.get(key).copied().unwrap_or(false)
    }

    pub fn insert(&mut self, key: impl Into<String>, enabled: bool) {
        self.0.insert(key.into(), enabled);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn pets_allowed(&self) -> bool {
        self.has("petsAllowed")
    }

    pub fn furnished(&self) -> bool {
        self.has("furnished")
    }

    pub fn parking(&self) -> bool {
        self.has("parking")
    }

    pub fn air_conditioning(&self) -> bool {
        self.has("airConditioning")
    }

    pub fn heating(&self) -> bool {
        self.has("heating")
    }

    pub fn garden(&self) -> bool {
        self.has("garden")
    }

    pub fn balcony(&self) -> bool {
        self.has("balcony")
    }

    pub fn wifi(&self) -> bool {
        self.has("wifi")
    }

    pub fn pool(&self) -> bool {
        self.has("pool")
    }
}

impl FromIterator<(String, bool)> for PropertyFeatures {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Core property data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    /// Owning user, referenced only
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub country: String,
    /// Derived from address, city and country
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub price: f64,
    pub currency: String,
    pub property_type: PropertyType,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_sqm: f64,
    pub features: PropertyFeatures,
    pub images: Vec<PropertyImage>,
    pub virtual_tour_url: Option<String>,
    pub status: PropertyStatus,
    pub availability_date: Option<DateTime<Utc>>,
    pub is_featured: bool,
    pub featured_until: Option<DateTime<Utc>>,
    pub ad_type: AdType,
    pub views_count: Option<i64>,
    pub contact_clicks: Option<i64>,
    pub listing_created_at: Option<DateTime<Utc>>,
    pub listing_expires_at: Option<DateTime<Utc>>,
    pub promotion_status: PromotionStatus,
    pub visibility: Visibility,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Property {
    /// A patch that sets every stored field of this property.
    pub fn to_patch(&self) -> PropertyPatch {
        PropertyPatch {
            id: Some(self.id.clone()),
            user_id: Some(self.user_id.clone()),
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            address: Some(self.address.clone()),
            city: Some(self.city.clone()),
            country: Some(self.country.clone()),
            latitude: self.latitude,
            longitude: self.longitude,
            price: Some(self.price),
            currency: Some(self.currency.clone()),
            property_type: Some(self.property_type),
            bedrooms: Some(self.bedrooms),
            bathrooms: Some(self.bathrooms),
            area_sqm: Some(self.area_sqm),
            features: Some(self.features.clone()),
            images: Some(self.images.clone()),
            virtual_tour_url: self.virtual_tour_url.clone(),
            status: Some(self.status),
            availability_date: self.availability_date,
            is_featured: Some(self.is_featured),
            featured_until: self.featured_until,
            ad_type: Some(self.ad_type),
            views_count: self.views_count,
            contact_clicks: self.contact_clicks,
            listing_created_at: self.listing_created_at,
            listing_expires_at: self.listing_expires_at,
            promotion_status: Some(self.promotion_status),
            visibility: Some(self.visibility),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A partial property used for inserts and updates. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_sqm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<PropertyFeatures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<PropertyImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_tour_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PropertyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_until: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_type: Option<AdType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_clicks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_status: Option<PromotionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_from_url_uses_last_segment() {
        let image = PropertyImage::from_url("https://cdn.example.com/listings/42/front.jpg");
        assert_eq!(image.public_id, "front.jpg");

        let image = PropertyImage::from_url("https://cdn.example.com/listings/");
        assert_eq!(image.public_id, "unknown");
    }

    #[test]
    fn features_default_to_unset() {
        let mut features = PropertyFeatures::new();
        features.insert("petsAllowed", true);
        features.insert("furnished", false);

        assert!(features.pets_allowed());
        assert!(!features.furnished());
        assert!(!features.pool());
        assert_eq!(features.len(), 2);
    }

    #[test]
    fn well_known_feature_accessors() {
        let features: PropertyFeatures = [
            "parking",
            "airConditioning",
            "heating",
            "garden",
            "balcony",
            "wifi",
            "pool",
        ]
        .into_iter()
        .map(|key| (key.to_string(), true))
        .collect();

        assert!(features.parking());
        assert!(features.air_conditioning());
        assert!(features.heating());
        assert!(features.garden());
        assert!(features.balcony());
        assert!(features.wifi());
        assert!(features.pool());
        assert!(!features.pets_allowed());
        assert!(!features.furnished());
    }
}
