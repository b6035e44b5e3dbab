use crate::backend::PropertyBackend;
use crate::models::{Property, PropertyFeatures, PropertyPatch};
use crate::normalize::{normalize, normalize_all, to_raw_format};
use crate::search::{filter, SearchCriteria, SearchResult};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::{debug, info};

/// Listing operations over an injected backend.
///
/// Rows coming back from the backend are always normalized before they leave
/// the service, and writes always go out as sparse patches.
pub struct PropertyService<B> {
    backend: B,
}

impl<B: PropertyBackend> PropertyService<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs a search over every stored listing.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResult> {
        let rows = self
            .backend
            .list_properties()
            .await
            .with_context(|| format!("Failed to load properties from {}", self.backend.backend_name()))?;

        let properties = normalize_all(&rows);
        let result = filter(&properties, criteria);
        info!("Search returned {} of {} matches", result.items.len(), result.total);
        Ok(result)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Property>> {
        let row = self.backend.get_property(id).await?;
        Ok(row.as_ref().map(normalize))
    }

    /// Creates a listing, filling lifecycle defaults for anything not supplied.
    ///
    /// A title and an owning user are required.
    pub async fn create(&self, mut patch: PropertyPatch) -> Result<Property> {
        if patch.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            bail!("A property needs a title");
        }
        if patch.user_id.as_deref().map_or(true, |u| u.trim().is_empty()) {
            bail!("A property needs an owning user");
        }

        let now = Utc::now();
        patch.status.get_or_insert_with(Default::default);
        patch.ad_type.get_or_insert_with(Default::default);
        patch.promotion_status.get_or_insert_with(Default::default);
        patch.visibility.get_or_insert_with(Default::default);
        patch.is_featured.get_or_insert(false);
        patch.images.get_or_insert_with(Vec::new);
        patch.features.get_or_insert_with(PropertyFeatures::new);
        patch.listing_created_at.get_or_insert(now);
        patch.created_at.get_or_insert(now);
        patch.updated_at.get_or_insert(now);

        let stored = self
            .backend
            .insert_property(&to_raw_format(&patch))
            .await
            .context("Failed to create property")?;

        let property = normalize(&stored);
        info!("Created property {}", property.id);
        Ok(property)
    }

    /// Applies a partial update. Only supplied fields are sent to the backend.
    pub async fn update(&self, id: &str, mut patch: PropertyPatch) -> Result<Property> {
        if id.trim().is_empty() {
            bail!("Cannot update a property without an id");
        }

        // identity is fixed by the path, never by the body
        patch.id = None;
        patch.updated_at.get_or_insert_with(Utc::now);

        let changes = to_raw_format(&patch);
        debug!("Updating property {} with {:?}", id, changes);

        let stored = self
            .backend
            .update_property(id, &changes)
            .await
            .with_context(|| format!("Failed to update property {}", id))?;
        Ok(normalize(&stored))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if id.trim().is_empty() {
            bail!("Cannot delete a property without an id");
        }

        self.backend
            .delete_property(id)
            .await
            .with_context(|| format!("Failed to delete property {}", id))?;
        info!("Deleted property {}", id);
        Ok(())
    }
}
