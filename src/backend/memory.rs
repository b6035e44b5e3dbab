use crate::backend::traits::PropertyBackend;
use crate::models::RawRecord;
use crate::normalize::parse_timestamp;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Property rows held in process, optionally seeded from a JSON export
#[derive(Default)]
pub struct MemoryBackend {
    rows: RwLock<Vec<RawRecord>>,
    next_id: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<RawRecord>) -> Self {
        Self {
            rows: RwLock::new(rows),
            next_id: AtomicU64::new(0),
        }
    }

    /// Loads rows from a JSON file holding an array of backend rows
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let rows: Vec<RawRecord> = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a JSON array of property rows", path.display()))?;

        info!("Loaded {} property rows from {}", rows.len(), path.display());
        Ok(Self::with_rows(rows))
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn generate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        format!("prop_{}", n)
    }
}

#[async_trait]
impl PropertyBackend for MemoryBackend {
    async fn list_properties(&self) -> Result<Vec<RawRecord>> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by_cached_key(|row| {
            std::cmp::Reverse(row.created_at.as_deref().and_then(parse_timestamp))
        });
        Ok(rows)
    }

    async fn get_property(&self, id: &str) -> Result<Option<RawRecord>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id.as_deref() == Some(id)).cloned())
    }

    async fn insert_property(&self, row: &RawRecord) -> Result<RawRecord> {
        let mut rows = self.rows.write().await;

        let mut stored = row.clone();
        match stored.id.as_deref() {
            Some(id) if !id.is_empty() => {
                if rows.iter().any(|existing| existing.id.as_deref() == Some(id)) {
                    bail!("Property {} already exists", id);
                }
            }
            _ => {
                let mut id = self.generate_id();
                while rows.iter().any(|existing| existing.id.as_deref() == Some(id.as_str())) {
                    id = self.generate_id();
                }
                stored.id = Some(id);
            }
        }

        debug!("Inserted property {:?}", stored.id);
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update_property(&self, id: &str, patch: &RawRecord) -> Result<RawRecord> {
        let mut rows = self.rows.write().await;
        let Some(row) = rows.iter_mut().find(|row| row.id.as_deref() == Some(id)) else {
            bail!("Property {} not found", id);
        };

        *row = apply_patch(row, patch)?;
        debug!("Updated property {}", id);
        Ok(row.clone())
    }

    async fn delete_property(&self, id: &str) -> Result<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id.as_deref() != Some(id));
        if rows.len() == before {
            bail!("Property {} not found", id);
        }
        debug!("Deleted property {}", id);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Overwrites the columns of `row` that are present in `patch`.
fn apply_patch(row: &RawRecord, patch: &RawRecord) -> Result<RawRecord> {
    let mut merged = serde_json::to_value(row).context("Failed to encode stored row")?;
    let changes = serde_json::to_value(patch).context("Failed to encode patch")?;
    if let (Value::Object(target), Value::Object(changes)) = (&mut merged, changes) {
        target.extend(changes);
    }
    serde_json::from_value(merged).context("Failed to decode patched row")
}
