mod client;
mod invoice;
mod plan;
mod range;
mod service;

pub use client::Client;
pub use invoice::{Invoice, InvoiceStatus};
pub use plan::{PlanPeriod, ServicePlan};
pub use range::DateRange;
pub use service::{Service, ServiceStatus, COUNTABLE_STATUSES};
