//! Fetch-join-aggregate pipelines behind the reporting views.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{ClientQuery, InvoiceQuery, ServiceQuery, UcrmFetch};
use crate::clock::{Clock, SystemClock};
use crate::models::{Client, DateRange, ServicePlan};

use super::{
    aggregate_actual, attach_clients_to_invoices, attach_clients_to_services,
    forecast_active_clients, forecast_totals, group_invoices_by_client, invoice_totals,
    join_active_clients, month_buckets, ActiveClient, BucketRevenue, ClientForecast,
    ClientInvoiceGroup, InvoiceWithClient, MonthBucket, ServiceWithClient,
};

/// Upper bound on services fetched per computation.
const SERVICE_FETCH_LIMIT: u32 = 399;

/// Everything the prediction view needs for one forecast window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedRevenue {
    pub active_clients: Vec<ActiveClient>,
    /// Per-client projections, one entry per active client.
    pub expected_revenue: Vec<ClientForecast>,
    pub service_plans: Vec<ServicePlan>,
    pub total_expected_revenue: Decimal,
    /// Months-in-range summed per client; see
    /// [`ForecastTotals`](super::ForecastTotals).
    #[serde(rename = "totalInvoicesTobeSent")]
    pub total_invoices_to_be_sent: u64,
    /// Number of active clients in the window.
    pub client_count: usize,
    pub service_plan_count: usize,
    pub active_service_count: usize,
}

/// Range-scoped billing aggregates: who was invoiced, who paid, what's
/// still outstanding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub invoices: Vec<InvoiceWithClient>,
    /// Per-client rollups ordered by client id.
    pub group_invoices: Vec<ClientInvoiceGroup>,
    pub invoice_count: usize,
    /// Collected within the range, summed across groups.
    pub total_revenue: Decimal,
    /// Outstanding within the range, summed across groups.
    pub pending_amount: Decimal,
    pub clients: Vec<Client>,
    pub client_count: usize,
    pub services: Vec<ServiceWithClient>,
    pub service_count: usize,
    pub active_clients: Vec<ActiveClient>,
}

/// Month-by-month revenue over a range, mixing actuals with projections.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyForecast {
    pub months: Vec<MonthBucket>,
    /// One record per bucket, chronological. Elapsed buckets carry invoice
    /// sums; future buckets carry projections with `amount_paid` zero.
    #[serde(rename = "invoicesData")]
    pub records: Vec<BucketRevenue>,
    /// Sum of `amount_to_pay` across all records, actual and projected.
    pub total_expected_revenue: Decimal,
    /// Accumulated from future buckets only; approximate, see
    /// [`ForecastTotals`](super::ForecastTotals).
    #[serde(rename = "invoicesTobeSent")]
    pub invoices_to_be_sent: u64,
    #[serde(rename = "date")]
    pub range: DateRange,
}

/// Aggregation pipelines over a CRM snapshot.
///
/// Holds no state between calls: every operation fetches fresh collections,
/// joins and reduces them in memory, and returns owned records.
pub struct RevenueService {
    fetcher: Arc<dyn UcrmFetch>,
    clock: Arc<dyn Clock>,
}

impl RevenueService {
    pub fn new(fetcher: Arc<dyn UcrmFetch>) -> Self {
        Self {
            fetcher,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Projects billing for every active client over `range`.
    ///
    /// Clients, services, and service plans are fetched concurrently; the
    /// join and projection run once all three arrive.
    pub async fn expected_revenue(&self, range: &DateRange) -> Result<ExpectedRevenue> {
        debug!(from = %range.from, to = %range.to, "computing expected revenue");

        let service_query = ServiceQuery::default().with_limit(SERVICE_FETCH_LIMIT);
        let client_query = ClientQuery::default();
        let (clients, services, service_plans) = tokio::try_join!(
            self.fetcher.list_clients(&client_query),
            self.fetcher.list_services(&service_query),
            self.fetcher.list_service_plans(),
        )
        .context("Failed to fetch CRM collections for forecasting")?;

        let active_service_count = services.len();
        let active_clients = join_active_clients(&clients, &services);
        let expected_revenue = forecast_active_clients(&clients, &services, range);
        let totals = forecast_totals(&expected_revenue);

        info!(
            active_clients = active_clients.len(),
            total_expected_revenue = %totals.total_expected_revenue,
            "expected revenue computed"
        );

        Ok(ExpectedRevenue {
            client_count: active_clients.len(),
            service_plan_count: service_plans.len(),
            active_service_count,
            active_clients,
            expected_revenue,
            service_plans,
            total_expected_revenue: totals.total_expected_revenue,
            total_invoices_to_be_sent: totals.total_invoices_to_be_sent,
        })
    }

    /// Builds the range-scoped billing dashboard.
    ///
    /// Clients come first since both joins need them; services and the
    /// range's invoices are then fetched concurrently.
    pub async fn dashboard(&self, range: &DateRange) -> Result<DashboardData> {
        debug!(from = %range.from, to = %range.to, "building dashboard data");

        let clients = self
            .fetcher
            .list_clients(&ClientQuery::default())
            .await
            .context("Failed to fetch clients")?;

        let service_query = ServiceQuery::default().with_limit(SERVICE_FETCH_LIMIT);
        let invoice_query = InvoiceQuery::new().created_between(range.from, range.to);
        let (services, invoices) = tokio::try_join!(
            self.fetcher.list_services(&service_query),
            self.fetcher.list_invoices(&invoice_query),
        )
        .context("Failed to fetch services and invoices")?;

        let active_clients = join_active_clients(&clients, &services);
        let invoices = attach_clients_to_invoices(invoices, &clients);
        let services = attach_clients_to_services(services, &clients);
        let group_invoices = group_invoices_by_client(&invoices);
        let (total_revenue, pending_amount) = invoice_totals(&group_invoices);

        info!(
            invoices = invoices.len(),
            %total_revenue,
            %pending_amount,
            "dashboard data built"
        );

        Ok(DashboardData {
            invoice_count: invoices.len(),
            client_count: clients.len(),
            service_count: services.len(),
            invoices,
            group_invoices,
            total_revenue,
            pending_amount,
            clients,
            services,
            active_clients,
        })
    }

    /// Month-by-month revenue over `range`: elapsed buckets aggregate real
    /// invoices, future buckets project plan billing.
    ///
    /// "Today" is read once up front, so a computation spanning midnight
    /// classifies every bucket against the same date. Buckets run in order
    /// and the records come back chronological.
    pub async fn monthly_forecast(&self, range: &DateRange) -> Result<MonthlyForecast> {
        let today = self.clock.today();
        let months = month_buckets(range, today);
        debug!(
            from = %range.from,
            to = %range.to,
            buckets = months.len(),
            "building monthly forecast"
        );

        let mut records = Vec::with_capacity(months.len());
        let mut invoices_to_be_sent: u64 = 0;

        for bucket in &months {
            if bucket.is_future {
                let window = DateRange::new(bucket.start, bucket.window_end());
                let expected = self.expected_revenue(&window).await?;

                records.push(BucketRevenue {
                    amount_paid: Decimal::ZERO,
                    amount_to_pay: expected.total_expected_revenue,
                    from: bucket.start,
                    to: bucket.window_end(),
                    date: bucket.label.clone(),
                    month: bucket.month_label.clone(),
                });
                invoices_to_be_sent += expected.total_invoices_to_be_sent;
            } else {
                let query = InvoiceQuery::new()
                    .created_between(bucket.start, last_included_day(bucket.window_end()));
                let invoices = self.fetcher.list_invoices(&query).await.with_context(|| {
                    format!("Failed to fetch invoices for the month starting {}", bucket.start)
                })?;
                records.push(aggregate_actual(&invoices, bucket));
            }
        }

        let total_expected_revenue = records.iter().map(|r| r.amount_to_pay).sum();

        info!(
            buckets = months.len(),
            %total_expected_revenue,
            "monthly forecast assembled"
        );

        Ok(MonthlyForecast {
            months,
            records,
            total_expected_revenue,
            invoices_to_be_sent,
            range: *range,
        })
    }
}

/// Last date the invoice query should include for a window that ends
/// (exclusively) at `window_end`; the API's date bounds are inclusive.
fn last_included_day(window_end: NaiveDate) -> NaiveDate {
    window_end.pred_opt().unwrap_or(window_end)
}
