use rental_market::models::{AdType, PromotionStatus, PropertyStatus, PropertyType, Visibility};
use rental_market::{MemoryBackend, PropertyBackend, PropertyPatch, PropertyService, RawRecord, SearchCriteria};
use serde_json::{json, Value};

fn rows(values: Vec<Value>) -> Vec<RawRecord> {
    values
        .into_iter()
        .map(|v| serde_json::from_value(v).unwrap())
        .collect()
}

fn seeded() -> PropertyService<MemoryBackend> {
    PropertyService::new(MemoryBackend::with_rows(rows(vec![
        json!({
            "id": "berlin-1",
            "title": "Altbau flat",
            "city": "Berlin",
            "country": "Germany",
            "price": 1400,
            "bedrooms": 2,
            "property_type": "apartment",
            "status": "published",
            "images": "[\"https://cdn/berlin-1/a.jpg\"]",
            "created_at": "2024-04-01T10:00:00Z"
        }),
        json!({
            "id": "berlin-2",
            "title": "Penthouse",
            "city": "Berlin",
            "country": "Germany",
            "price": "3200",
            "bedrooms": 4,
            "property_type": "APARTMENT",
            "status": "published",
            "is_featured": 1,
            "created_at": "2024-02-01T10:00:00Z"
        }),
        json!({
            "id": "hamburg-1",
            "title": "Harbour house",
            "city": "Hamburg",
            "country": "Germany",
            "price": 2100,
            "bedrooms": 3,
            "property_type": "house",
            "status": "draft",
            "features": "{not json",
            "created_at": "2024-05-01T10:00:00Z"
        }),
    ])))
}

#[tokio::test]
async fn search_normalizes_and_filters_backend_rows() {
    let service = seeded();
    let criteria: SearchCriteria = serde_json::from_value(json!({
        "location": "berlin",
        "propertyType": "apartment",
        "maxPrice": "not a number"
    }))
    .unwrap();

    let result = service.search(&criteria).await.unwrap();

    assert_eq!(result.total, 2);
    let ids: Vec<_> = result.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["berlin-2", "berlin-1"]);
    assert_eq!(result.items[0].price, 3200.0);
    assert_eq!(result.items[1].images[0].public_id, "a.jpg");
}

#[tokio::test]
async fn search_paginates_the_ordered_matches() {
    let service = seeded();
    let criteria = SearchCriteria {
        page: Some(2),
        limit: Some(2),
        ..Default::default()
    };

    let result = service.search(&criteria).await.unwrap();
    assert_eq!(result.total, 3);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].id, "berlin-1");
}

#[tokio::test]
async fn get_by_id_returns_a_normalized_property() {
    let service = seeded();

    let property = service.get_by_id("hamburg-1").await.unwrap().unwrap();
    assert_eq!(property.property_type, PropertyType::House);
    assert!(property.features.is_empty());
    assert_eq!(property.location, "Hamburg, Germany");

    assert!(service.get_by_id("nowhere").await.unwrap().is_none());
}

#[tokio::test]
async fn create_fills_lifecycle_defaults() {
    let service = PropertyService::new(MemoryBackend::new());
    let created = service
        .create(PropertyPatch {
            title: Some("Garden studio".to_string()),
            user_id: Some("owner-1".to_string()),
            city: Some("Utrecht".to_string()),
            price: Some(950.0),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.id, "prop_1");
    assert_eq!(created.status, PropertyStatus::Draft);
    assert_eq!(created.ad_type, AdType::Standard);
    assert_eq!(created.promotion_status, PromotionStatus::Inactive);
    assert_eq!(created.visibility, Visibility::Public);
    assert!(!created.is_featured);
    assert!(created.created_at.is_some());
    assert!(created.listing_created_at.is_some());
    assert_eq!(created.location, "Utrecht");

    let stored = service.backend().get_property("prop_1").await.unwrap().unwrap();
    assert_eq!(stored.status.as_deref(), Some("draft"));
    assert_eq!(stored.images, Some(json!([])));
}

#[tokio::test]
async fn create_requires_title_and_owner() {
    let service = PropertyService::new(MemoryBackend::new());

    let missing_title = service
        .create(PropertyPatch {
            user_id: Some("owner-1".to_string()),
            ..Default::default()
        })
        .await;
    assert!(missing_title.is_err());

    let missing_owner = service
        .create(PropertyPatch {
            title: Some("Nice".to_string()),
            ..Default::default()
        })
        .await;
    assert!(missing_owner.is_err());
    assert!(service.backend().is_empty().await);
}

#[tokio::test]
async fn update_sends_a_sparse_patch() {
    let service = seeded();

    let updated = service
        .update(
            "berlin-1",
            PropertyPatch {
                id: Some("hijack".to_string()),
                title: Some("Renovated Altbau flat".to_string()),
                status: Some(PropertyStatus::Rented),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, "berlin-1");
    assert_eq!(updated.title, "Renovated Altbau flat");
    assert_eq!(updated.status, PropertyStatus::Rented);
    assert_eq!(updated.price, 1400.0);
    assert_eq!(updated.images.len(), 1);
    assert!(updated.updated_at.is_some());

    assert!(service.update("", PropertyPatch::default()).await.is_err());
    assert!(service.update("missing", PropertyPatch::default()).await.is_err());
}

#[tokio::test]
async fn delete_removes_listing() {
    let service = seeded();

    service.delete("hamburg-1").await.unwrap();
    assert!(service.get_by_id("hamburg-1").await.unwrap().is_none());
    assert_eq!(service.search(&SearchCriteria::default()).await.unwrap().total, 2);
    assert!(service.delete("hamburg-1").await.is_err());
}
