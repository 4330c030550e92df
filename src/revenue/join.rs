//! In-memory joins between clients, services, and invoices.
//!
//! All joins key on `clientId`. References to clients outside the fetched
//! set stay empty rather than failing the batch; entity order follows the
//! API's listing order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Client, Invoice, Service};

/// A client together with its services in countable statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveClient {
    #[serde(flatten)]
    pub client: Client,
    /// Always true here; the join drops clients without matching services.
    pub has_services: bool,
    pub active_services: Vec<Service>,
}

/// An invoice with its owning client attached when the client is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceWithClient {
    #[serde(flatten)]
    pub invoice: Invoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
}

/// A service with its owning client attached when the client is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceWithClient {
    #[serde(flatten)]
    pub service: Service,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
}

/// Joins each client to its services, keeping only clients with at least one
/// match.
///
/// Clients without services are dropped entirely, not returned with empty
/// lists. Client order and each client's service order are preserved from
/// the inputs.
pub fn join_active_clients(clients: &[Client], services: &[Service]) -> Vec<ActiveClient> {
    let mut by_client: HashMap<i64, Vec<Service>> = HashMap::new();
    for service in services {
        by_client
            .entry(service.client_id)
            .or_default()
            .push(service.clone());
    }

    clients
        .iter()
        .filter_map(|client| {
            let active_services = by_client.remove(&client.id)?;
            Some(ActiveClient {
                client: client.clone(),
                has_services: true,
                active_services,
            })
        })
        .collect()
}

/// Attaches the owning client to each invoice by `clientId`.
pub fn attach_clients_to_invoices(
    invoices: Vec<Invoice>,
    clients: &[Client],
) -> Vec<InvoiceWithClient> {
    let by_id: HashMap<i64, &Client> = clients.iter().map(|c| (c.id, c)).collect();

    invoices
        .into_iter()
        .map(|invoice| {
            let client = by_id.get(&invoice.client_id).map(|&c| c.clone());
            InvoiceWithClient { invoice, client }
        })
        .collect()
}

/// Attaches the owning client to each service by `clientId`.
pub fn attach_clients_to_services(
    services: Vec<Service>,
    clients: &[Client],
) -> Vec<ServiceWithClient> {
    let by_id: HashMap<i64, &Client> = clients.iter().map(|c| (c.id, c)).collect();

    services
        .into_iter()
        .map(|service| {
            let client = by_id.get(&service.client_id).map(|&c| c.clone());
            ServiceWithClient { service, client }
        })
        .collect()
}
