//! Revenue aggregation and forecasting over CRM data.
//!
//! Elapsed time is measured from invoices the CRM actually issued; time that
//! hasn't elapsed yet is projected from what active clients' service plans
//! would bill. [`RevenueService`] ties the two together per month bucket.

mod actual;
mod forecast;
mod join;
mod periods;
mod service;

pub use actual::{
    aggregate_actual, group_invoices_by_client, invoice_totals, BucketRevenue, ClientInvoiceGroup,
};
pub use forecast::{
    forecast_active_clients, forecast_totals, ClientForecast, ForecastTotals, ServiceForecast,
};
pub use join::{
    attach_clients_to_invoices, attach_clients_to_services, join_active_clients, ActiveClient,
    InvoiceWithClient, ServiceWithClient,
};
pub use periods::{month_buckets, whole_months_between, MonthBucket};
pub use service::{DashboardData, ExpectedRevenue, MonthlyForecast, RevenueService};
