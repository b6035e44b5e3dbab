use super::fields::{
    normalize_ad_type, normalize_features, normalize_images, normalize_promotion_status,
    normalize_property_type, normalize_status, normalize_visibility, parse_timestamp, truthy,
};
use crate::models::{Property, RawRecord};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Currency assumed when a row has none
pub const DEFAULT_CURRENCY: &str = "USD";

/// Converts a backend row into a fully populated [`Property`].
///
/// Never fails: every absent or malformed column is replaced by its default.
/// Coordinates, counters and the virtual tour URL are only kept when truthy.
pub fn normalize(raw: &RawRecord) -> Property {
    let address = text(&raw.address);
    let city = text(&raw.city);
    let country = text(&raw.country);
    let location = join_location(&[address.as_str(), city.as_str(), country.as_str()]);

    Property {
        id: text(&raw.id),
        user_id: text(&raw.user_id),
        title: text(&raw.title),
        description: text(&raw.description),
        location,
        address,
        city,
        country,
        latitude: raw.latitude.filter(|v| *v != 0.0),
        longitude: raw.longitude.filter(|v| *v != 0.0),
        price: raw.price.unwrap_or(0.0),
        currency: raw
            .currency
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        property_type: normalize_property_type(raw.property_type.as_deref().unwrap_or("other")),
        bedrooms: count(raw.bedrooms),
        bathrooms: count(raw.bathrooms),
        area_sqm: raw.area_sqm.unwrap_or(0.0),
        features: normalize_features(raw.features.as_ref()),
        images: normalize_images(raw.images.as_ref()),
        virtual_tour_url: raw.virtual_tour_url.clone().filter(|url| !url.is_empty()),
        status: normalize_status(raw.status.as_deref()),
        availability_date: timestamp(&raw.availability_date),
        is_featured: raw.is_featured.as_ref().map(truthy).unwrap_or(false),
        featured_until: timestamp(&raw.featured_until),
        ad_type: normalize_ad_type(raw.ad_type.as_deref()),
        views_count: raw.views_count.filter(|v| *v != 0),
        contact_clicks: raw.contact_clicks.filter(|v| *v != 0),
        listing_created_at: timestamp(&raw.listing_created_at),
        listing_expires_at: timestamp(&raw.listing_expires_at),
        promotion_status: normalize_promotion_status(raw.promotion_status.as_deref()),
        visibility: normalize_visibility(raw.visibility.as_deref()),
        created_at: timestamp(&raw.created_at),
        updated_at: timestamp(&raw.updated_at),
    }
}

/// Normalizes a batch of rows, preserving their order.
pub fn normalize_all(rows: &[RawRecord]) -> Vec<Property> {
    let properties: Vec<Property> = rows.iter().map(normalize).collect();
    debug!("Normalized {} property rows", properties.len());
    properties
}

/// Joins the non-empty location parts with `", "`.
pub fn join_location(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn count(value: Option<i64>) -> u32 {
    value
        .unwrap_or(0)
        .clamp(0, i64::from(u32::MAX))
        .try_into()
        .unwrap_or(0)
}

fn timestamp(value: &Option<String>) -> Option<DateTime<Utc>> {
    value.as_deref().and_then(parse_timestamp)
}
