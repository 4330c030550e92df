//! Projected billing for time that hasn't elapsed yet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Client, DateRange, Service};

use super::{join_active_clients, whole_months_between};

/// Projected billing for one service over a forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceForecast {
    pub plan_id: i64,
    /// Price per billing cycle, from the service's subscription-time snapshot.
    pub price: Decimal,
    /// Billing cycle length in whole months.
    pub period: i64,
    /// `price` times `billing_cycles`.
    pub amount: Decimal,
    /// Whole cycles that fit in the window. Partial cycles never bill.
    pub billing_cycles: u32,
    /// Months those cycles consume, `billing_cycles` times `period`.
    pub total_months_covered: u32,
}

/// One client's projected billing across its active services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientForecast {
    /// Company name, or "First Last" when no company is set.
    pub name: String,
    pub active_services: Vec<Service>,
    /// Per-service breakdown. Services whose cycle doesn't fit the window
    /// stay listed with amount zero.
    pub pricing: Vec<ServiceForecast>,
    /// Sum of the per-service amounts.
    pub amount_to_pay: Decimal,
    /// Whole months in the forecast window; range-wide, not per-service.
    pub months: u32,
}

/// Grand totals across client forecasts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastTotals {
    /// Sum of every client's `amount_to_pay`.
    pub total_expected_revenue: Decimal,
    /// Sum of every client's `months`. Approximates the number of invoices
    /// to send: it counts months in range per client rather than billing
    /// cycles, so clients on multi-month plans are overcounted. The wire
    /// name keeps its legacy casing.
    #[serde(rename = "totalInvoicesTobeSent")]
    pub total_invoices_to_be_sent: u64,
}

/// Projects billing for every active client over `range`.
///
/// Each service bills `floor(months / period)` whole cycles at its snapshot
/// price; the window's remainder goes unbilled rather than prorated. Clients
/// without services in countable statuses don't appear at all.
pub fn forecast_active_clients(
    clients: &[Client],
    services: &[Service],
    range: &DateRange,
) -> Vec<ClientForecast> {
    let total_months = whole_months_between(range.from, range.to);

    join_active_clients(clients, services)
        .into_iter()
        .map(|active| {
            let pricing: Vec<ServiceForecast> = active
                .active_services
                .iter()
                .map(|service| forecast_service(service, total_months))
                .collect();
            let amount_to_pay = pricing.iter().map(|p| p.amount).sum();

            ClientForecast {
                name: active.client.display_name(),
                active_services: active.active_services,
                pricing,
                amount_to_pay,
                months: total_months,
            }
        })
        .collect()
}

fn forecast_service(service: &Service, total_months: u32) -> ServiceForecast {
    // Periods outside 1..=u32::MAX (absent, zero, negative) bill zero
    // cycles instead of faulting the whole projection.
    let period = u32::try_from(service.service_plan_period)
        .ok()
        .filter(|p| *p > 0);
    let billing_cycles = period.map_or(0, |p| total_months / p);

    ServiceForecast {
        plan_id: service.service_plan_id,
        price: service.service_plan_price,
        period: service.service_plan_period,
        amount: service.service_plan_price * Decimal::from(billing_cycles),
        billing_cycles,
        total_months_covered: period.map_or(0, |p| billing_cycles * p),
    }
}

/// Reduces client forecasts to their grand totals.
pub fn forecast_totals(clients: &[ClientForecast]) -> ForecastTotals {
    let mut totals = ForecastTotals::default();
    for client in clients {
        totals.total_expected_revenue += client.amount_to_pay;
        totals.total_invoices_to_be_sent += u64::from(client.months);
    }
    totals
}
