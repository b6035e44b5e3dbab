use crate::models::RawRecord;
use anyhow::Result;
use async_trait::async_trait;

/// Access to the table that stores property rows.
///
/// Implementations only move rows; normalization and filtering happen in the
/// caller, so any backend (remote, in-memory, file) can be swapped in.
#[async_trait]
pub trait PropertyBackend: Send + Sync {
    /// All property rows, newest first
    async fn list_properties(&self) -> Result<Vec<RawRecord>>;

    /// A single row by id, or `None` when it does not exist
    async fn get_property(&self, id: &str) -> Result<Option<RawRecord>>;

    /// Inserts a row and returns it as stored
    async fn insert_property(&self, row: &RawRecord) -> Result<RawRecord>;

    /// Applies a sparse patch to a row and returns the updated row
    async fn update_property(&self, id: &str, patch: &RawRecord) -> Result<RawRecord>;

    /// Removes a row
    async fn delete_property(&self, id: &str) -> Result<()>;

    /// Get the name of the backend
    fn backend_name(&self) -> &'static str;
}
