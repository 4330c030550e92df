//! Read-only access to the UCRM REST API.

mod client;
mod error;
mod query;

pub use client::UcrmClient;
pub use error::ApiError;
pub use query::{ClientQuery, InvoiceQuery, ServiceQuery};

use async_trait::async_trait;

use crate::models::{Client, Invoice, Service, ServicePlan};

/// Fetch boundary over the CRM's entity collections.
///
/// Implemented by [`UcrmClient`] over HTTP; aggregation code depends on this
/// trait so tests can stand in in-memory fakes.
#[async_trait]
pub trait UcrmFetch: Send + Sync {
    async fn list_clients(&self, query: &ClientQuery) -> Result<Vec<Client>, ApiError>;

    async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<Service>, ApiError>;

    async fn list_service_plans(&self) -> Result<Vec<ServicePlan>, ApiError>;

    async fn list_invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, ApiError>;
}
