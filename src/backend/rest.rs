use crate::backend::config::BackendConfig;
use crate::backend::traits::PropertyBackend;
use crate::models::RawRecord;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("rental-market/", env!("CARGO_PKG_VERSION"));

/// Property table exposed over a PostgREST-style HTTP API
pub struct RestBackend {
    client: Client,
    config: BackendConfig,
}

impl RestBackend {
    /// Create a backend from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::new(BackendConfig::from_env()?)
    }

    pub fn new(config: BackendConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.api_key).context("API key is not a valid header value")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .context("API key is not a valid header value")?,
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    fn table(&self) -> String {
        self.config.table_url()
    }

    fn returning(request: RequestBuilder) -> RequestBuilder {
        request.header("Prefer", "return=representation")
    }

    /// Sends a request and decodes the returned rows.
    async fn rows(&self, request: RequestBuilder, action: &str) -> Result<Vec<RawRecord>> {
        let response = self.send(request, action).await?;
        let rows: Vec<RawRecord> = response
            .json()
            .await
            .with_context(|| format!("Failed to decode rows from {}", action))?;
        debug!("{} returned {} rows", action, rows.len());
        Ok(rows)
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to {}", action))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend returned status {} for {}: {}", status, action, body);
            anyhow::bail!("Failed to {}: {}", action, status);
        }

        Ok(response)
    }
}

#[async_trait]
impl PropertyBackend for RestBackend {
    async fn list_properties(&self) -> Result<Vec<RawRecord>> {
        info!("Fetching properties from {}", self.table());
        let request = self
            .client
            .get(self.table())
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        self.rows(request, "list properties").await
    }

    async fn get_property(&self, id: &str) -> Result<Option<RawRecord>> {
        let request = self
            .client
            .get(self.table())
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);
        let rows = self.rows(request, "fetch property").await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_property(&self, row: &RawRecord) -> Result<RawRecord> {
        let request = Self::returning(self.client.post(self.table()).json(row));
        self.rows(request, "insert property")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Backend returned no row for the inserted property"))
    }

    async fn update_property(&self, id: &str, patch: &RawRecord) -> Result<RawRecord> {
        let request = Self::returning(
            self.client
                .patch(self.table())
                .query(&[("id", format!("eq.{}", id))])
                .json(patch),
        );
        self.rows(request, "update property")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Property {} not found", id))
    }

    async fn delete_property(&self, id: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.table())
            .query(&[("id", format!("eq.{}", id))]);
        self.send(request, "delete property").await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "REST"
    }
}
