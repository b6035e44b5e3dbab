use rental_market::normalize::{normalize_features, normalize_images};
use rental_market::{filter, normalize, to_raw_format, PropertyImage, PropertyPatch, RawRecord, SearchCriteria};
use serde_json::{json, Value};

fn raw(value: Value) -> RawRecord {
    serde_json::from_value(value).unwrap()
}

#[test]
fn normalizing_written_output_changes_nothing() {
    let original = raw(json!({
        "id": "rt-1",
        "title": "Canal view",
        "description": "Bright two-room flat",
        "address": "Prinsengracht 2",
        "city": "Amsterdam",
        "country": "Netherlands",
        "latitude": 52.37,
        "longitude": 4.88,
        "price": 2250,
        "currency": "EUR",
        "property_type": "Apartment",
        "bedrooms": 2,
        "bathrooms": 1,
        "area_sqm": 64.2,
        "features": { "balcony": true, "wifi": true, "pool": false },
        "images": [
            "https://cdn/rt-1/front.jpg",
            { "url": "https://cdn/rt-1/back.jpg", "public_id": "rt-1-back", "caption": "Garden", "is_main": false }
        ],
        "virtual_tour_url": "https://tour/rt-1",
        "status": "published",
        "availability_date": "2024-10-01",
        "is_featured": true,
        "featured_until": "2024-11-01T00:00:00Z",
        "ad_type": "featured",
        "views_count": 120,
        "contact_clicks": 9,
        "listing_created_at": "2024-09-01T12:00:00.5Z",
        "listing_expires_at": "2024-12-01T12:00:00Z",
        "promotion_status": "active",
        "visibility": "unlisted",
        "user_id": "owner-7",
        "created_at": "2024-09-01T12:00:00Z",
        "updated_at": "2024-09-02 08:30:00+00"
    }));

    let once = normalize(&original);
    let again = normalize(&to_raw_format(&once.to_patch()));
    assert_eq!(again, once);
}

#[test]
fn empty_row_normalizes_to_defaults() {
    let property = normalize(&RawRecord::default());
    let json = serde_json::to_value(&property).unwrap();

    assert_eq!(json["images"], json!([]));
    assert_eq!(json["features"], json!({}));
    assert_eq!(json["propertyType"], json!("other"));
    assert_eq!(json["status"], json!("draft"));
    assert_eq!(json["adType"], json!("standard"));
    assert_eq!(json["promotionStatus"], json!("inactive"));
    assert_eq!(json["visibility"], json!("public"));
    assert_eq!(json["isFeatured"], json!(false));
    assert_eq!(json["location"], json!(""));
}

#[test]
fn image_strings_and_arrays_agree() {
    let expected = vec![PropertyImage::from_url("https://x/a.jpg")];
    assert_eq!(expected[0].public_id, "a.jpg");
    assert_eq!(normalize_images(Some(&json!("[\"https://x/a.jpg\"]"))), expected);
    assert_eq!(normalize_images(Some(&json!(["https://x/a.jpg"]))), expected);
}

#[test]
fn malformed_features_become_empty() {
    assert!(normalize_features(Some(&json!("{not json"))).is_empty());
}

#[test]
fn filter_requires_every_criterion() {
    let properties: Vec<_> = [
        json!({ "id": "cheap", "price": 1000, "bedrooms": 1 }),
        json!({ "id": "dear", "price": 2000, "bedrooms": 2 }),
    ]
    .into_iter()
    .map(|v| normalize(&raw(v)))
    .collect();

    let criteria: SearchCriteria =
        serde_json::from_value(json!({ "maxPrice": 1500, "minBedrooms": 1 })).unwrap();
    let result = filter(&properties, &criteria);

    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].id, "cheap");
}

#[test]
fn third_page_of_twenty_five() {
    let properties: Vec<_> = (0..25)
        .map(|i| {
            normalize(&raw(json!({
                "id": format!("p{:02}", i),
                "created_at": format!("2024-01-{:02}T00:00:00Z", 31 - i)
            })))
        })
        .collect();

    let criteria = SearchCriteria {
        page: Some(3),
        limit: Some(10),
        ..Default::default()
    };
    let result = filter(&properties, &criteria);

    assert_eq!(result.total, 25);
    let ids: Vec<_> = result.items.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec!["p20", "p21", "p22", "p23", "p24"]);
}

#[test]
fn equal_creation_dates_order_by_id() {
    let properties: Vec<_> = ["c", "a", "b"]
        .into_iter()
        .map(|id| normalize(&raw(json!({ "id": id, "created_at": "2024-03-03T03:03:03Z" }))))
        .collect();

    for _ in 0..3 {
        let ids: Vec<_> = filter(&properties, &SearchCriteria::default())
            .items
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}

#[test]
fn title_patch_writes_only_title() {
    let patch: PropertyPatch = serde_json::from_value(json!({ "title": "New" })).unwrap();
    let written = serde_json::to_value(to_raw_format(&patch)).unwrap();
    assert_eq!(written, json!({ "title": "New" }));
}
