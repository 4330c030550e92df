//! HTTP client for the UCRM REST API.
//!
//! Every request carries the instance's app key in the `X-Auth-App-Key`
//! header. Responses are plain JSON arrays of entities.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::UcrmConfig;
use crate::models::{Client, Invoice, Service, ServicePlan};

use super::{ApiError, ClientQuery, InvoiceQuery, ServiceQuery, UcrmFetch};

/// Header carrying the UCRM app key.
const APP_KEY_HEADER: &str = "X-Auth-App-Key";

/// UCRM REST API client.
///
/// Stateless apart from connection settings: no retries, no caching, no
/// pagination loops. Callers see upstream failures as-is.
pub struct UcrmClient {
    config: UcrmConfig,
    base_url: String,
    client: reqwest::Client,
}

impl UcrmClient {
    pub fn new(config: UcrmConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Override API base URL (useful for tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<Vec<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, params = params.len(), "UCRM GET");

        let response = self
            .client
            .get(&url)
            .header(APP_KEY_HEADER, self.config.app_key.expose_secret())
            .header(CONTENT_TYPE, "application/json")
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            detail: err.to_string(),
        })
    }
}

#[async_trait]
impl UcrmFetch for UcrmClient {
    async fn list_clients(&self, query: &ClientQuery) -> Result<Vec<Client>, ApiError> {
        self.get("/clients", &query.to_params()).await
    }

    async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<Service>, ApiError> {
        self.get("/clients/services", &query.to_params()).await
    }

    async fn list_service_plans(&self) -> Result<Vec<ServicePlan>, ApiError> {
        self.get("/service-plans", &[]).await
    }

    async fn list_invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, ApiError> {
        self.get("/invoices", &query.to_params()).await
    }
}
