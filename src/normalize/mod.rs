//! Conversion between backend rows and the typed property model.

pub mod fields;
pub mod property;
pub mod reverse;

pub use fields::{normalize_features, normalize_images, normalize_property_type, parse_timestamp};
pub use property::{join_location, normalize, normalize_all, DEFAULT_CURRENCY};
pub use reverse::{format_timestamp, to_raw_format};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRecord;
    use serde_json::json;

    fn round_trip(raw: &RawRecord) {
        let once = normalize(raw);
        let twice = normalize(&to_raw_format(&once.to_patch()));
        assert_eq!(twice, once);
    }

    #[test]
    fn normalization_is_idempotent() {
        let rows = [
            json!({}),
            json!({ "id": "a", "title": "Bare", "images": null, "features": null }),
            json!({
                "id": "b",
                "title": "Messy",
                "images": "[\"https://x/1.jpg\", {\"url\": \"https://x/2.jpg\", \"public_id\": \"two\"}]",
                "features": "{\"wifi\": true, \"pool\": 0}",
                "property_type": "Villa",
                "status": "nonsense",
                "is_featured": "yes",
                "latitude": 0,
                "views_count": "12",
                "price": "950.75",
                "availability_date": "2024-07-01",
                "created_at": "2024-06-01 09:15:00.123456+00",
                "updated_at": "2024-06-02T10:00:00"
            }),
            json!({
                "id": "c",
                "title": "Broken blobs",
                "images": "not json at all",
                "features": "{not json",
                "currency": ""
            }),
        ];

        for row in rows {
            let raw: RawRecord = serde_json::from_value(row).unwrap();
            round_trip(&raw);
        }
    }
}
