use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use revcast::api::{ApiError, ClientQuery, InvoiceQuery, ServiceQuery, UcrmFetch};
use revcast::models::{Client, Invoice, Service, ServicePlan};

/// In-memory CRM double serving fixed collections.
///
/// Invoices are filed under their creation date and filtered the way the
/// real API filters on `createdDateFrom`/`createdDateTo` (inclusive on both
/// ends). Every invoice query is recorded so tests can assert on window
/// scoping.
#[derive(Default)]
pub struct FakeUcrm {
    clients: Vec<Client>,
    services: Vec<Service>,
    plans: Vec<ServicePlan>,
    invoices: Vec<(NaiveDate, Invoice)>,
    fail_invoices: bool,
    pub invoice_queries: Mutex<Vec<InvoiceQuery>>,
}

impl FakeUcrm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(mut self, clients: Vec<Client>) -> Self {
        self.clients = clients;
        self
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    pub fn with_plans(mut self, plans: Vec<ServicePlan>) -> Self {
        self.plans = plans;
        self
    }

    pub fn with_invoice(mut self, created: NaiveDate, invoice: Invoice) -> Self {
        self.invoices.push((created, invoice));
        self
    }

    /// Make every invoice listing fail with an upstream 500.
    pub fn with_failing_invoices(mut self) -> Self {
        self.fail_invoices = true;
        self
    }

    pub fn recorded_invoice_queries(&self) -> Vec<InvoiceQuery> {
        self.invoice_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl UcrmFetch for FakeUcrm {
    async fn list_clients(&self, _query: &ClientQuery) -> Result<Vec<Client>, ApiError> {
        Ok(self.clients.clone())
    }

    async fn list_services(&self, query: &ServiceQuery) -> Result<Vec<Service>, ApiError> {
        Ok(self
            .services
            .iter()
            .filter(|service| {
                query.statuses.is_empty() || query.statuses.contains(&service.status)
            })
            .cloned()
            .collect())
    }

    async fn list_service_plans(&self) -> Result<Vec<ServicePlan>, ApiError> {
        Ok(self.plans.clone())
    }

    async fn list_invoices(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, ApiError> {
        self.invoice_queries.lock().unwrap().push(query.clone());

        if self.fail_invoices {
            return Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: "upstream unavailable".to_string(),
            });
        }

        Ok(self
            .invoices
            .iter()
            .filter(|(created, _)| {
                query.created_date_from.map_or(true, |from| *created >= from)
                    && query.created_date_to.map_or(true, |to| *created <= to)
            })
            .map(|(_, invoice)| invoice.clone())
            .collect())
    }
}
