use crate::models::{PropertyFeatures, PropertyImage, PropertyPatch, RawRecord};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

/// Converts a partial property into a sparse backend patch.
///
/// Only supplied fields produce columns; everything else stays absent so the
/// backend leaves it untouched. The derived `location` is never written.
pub fn to_raw_format(patch: &PropertyPatch) -> RawRecord {
    RawRecord {
        id: patch.id.clone(),
        title: patch.title.clone(),
        description: patch.description.clone(),
        address: patch.address.clone(),
        city: patch.city.clone(),
        country: patch.country.clone(),
        latitude: patch.latitude,
        longitude: patch.longitude,
        price: patch.price,
        currency: patch.currency.clone(),
        property_type: patch.property_type.map(|t| t.as_str().to_string()),
        bedrooms: patch.bedrooms.map(i64::from),
        bathrooms: patch.bathrooms.map(i64::from),
        area_sqm: patch.area_sqm,
        features: patch.features.as_ref().map(features_value),
        images: patch.images.as_deref().map(images_value),
        virtual_tour_url: patch.virtual_tour_url.clone(),
        status: patch.status.map(|s| s.as_str().to_string()),
        availability_date: patch.availability_date.as_ref().map(format_timestamp),
        is_featured: patch.is_featured.map(Value::Bool),
        featured_until: patch.featured_until.as_ref().map(format_timestamp),
        ad_type: patch.ad_type.map(|a| a.as_str().to_string()),
        views_count: patch.views_count,
        contact_clicks: patch.contact_clicks,
        listing_created_at: patch.listing_created_at.as_ref().map(format_timestamp),
        listing_expires_at: patch.listing_expires_at.as_ref().map(format_timestamp),
        promotion_status: patch.promotion_status.map(|p| p.as_str().to_string()),
        visibility: patch.visibility.map(|v| v.as_str().to_string()),
        user_id: patch.user_id.clone(),
        created_at: patch.created_at.as_ref().map(format_timestamp),
        updated_at: patch.updated_at.as_ref().map(format_timestamp),
    }
}

/// RFC 3339 in UTC with a `Z` suffix, keeping whatever sub-second precision is present.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn features_value(features: &PropertyFeatures) -> Value {
    Value::Object(
        features
            .iter()
            .map(|(key, enabled)| (key.to_string(), Value::Bool(enabled)))
            .collect(),
    )
}

fn images_value(images: &[PropertyImage]) -> Value {
    Value::Array(images.iter().map(image_value).collect())
}

fn image_value(image: &PropertyImage) -> Value {
    let mut object = Map::new();
    object.insert("url".to_string(), Value::String(image.url.clone()));
    object.insert("publicId".to_string(), Value::String(image.public_id.clone()));
    if let Some(caption) = &image.caption {
        object.insert("caption".to_string(), Value::String(caption.clone()));
    }
    if let Some(is_main) = image.is_main {
        object.insert("isMain".to_string(), Value::Bool(is_main));
    }
    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyStatus, PropertyType};
    use crate::normalize::normalize;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn title_only_patch_has_a_single_key() {
        let patch = PropertyPatch {
            title: Some("New".to_string()),
            ..Default::default()
        };

        let raw = to_raw_format(&patch);
        assert_eq!(serde_json::to_value(&raw).unwrap(), json!({ "title": "New" }));
    }

    #[test]
    fn renames_to_backend_columns() {
        let patch = PropertyPatch {
            user_id: Some("u-7".to_string()),
            property_type: Some(PropertyType::Studio),
            area_sqm: Some(31.0),
            is_featured: Some(false),
            status: Some(PropertyStatus::Archived),
            virtual_tour_url: Some("https://tour/1".to_string()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(to_raw_format(&patch)).unwrap(),
            json!({
                "user_id": "u-7",
                "property_type": "studio",
                "area_sqm": 31.0,
                "is_featured": false,
                "status": "archived",
                "virtual_tour_url": "https://tour/1"
            })
        );
    }

    #[test]
    fn timestamps_round_trip() {
        let when = Utc.with_ymd_and_hms(2025, 1, 31, 23, 59, 58).unwrap()
            + chrono::Duration::microseconds(123_456);
        let patch = PropertyPatch {
            availability_date: Some(when),
            ..Default::default()
        };

        let raw = to_raw_format(&patch);
        assert_eq!(raw.availability_date.as_deref(), Some("2025-01-31T23:59:58.123456Z"));
        assert_eq!(normalize(&raw).availability_date, Some(when));
    }

    #[test]
    fn images_are_written_as_objects() {
        let patch = PropertyPatch {
            images: Some(vec![PropertyImage::from_url("https://x/a.jpg")]),
            ..Default::default()
        };

        assert_eq!(
            to_raw_format(&patch).images,
            Some(json!([{ "url": "https://x/a.jpg", "publicId": "a.jpg" }]))
        );
    }
}
