//! Sums over invoices the CRM actually issued.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Client, Invoice, InvoiceStatus};

use super::{InvoiceWithClient, MonthBucket};

/// Actual or projected revenue for one month bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketRevenue {
    pub amount_paid: Decimal,
    pub amount_to_pay: Decimal,
    pub from: NaiveDate,
    /// Exclusive end of the bucket's window.
    pub to: NaiveDate,
    /// Bucket start for display, e.g. "Jan 15, 2024".
    pub date: String,
    /// Bucket month for display, e.g. "Jan 2024".
    pub month: String,
}

/// Sums paid and outstanding amounts over invoices already scoped to
/// `bucket`'s window.
///
/// No date re-filtering happens here; the fetch query must have constrained
/// the invoice set to `[start, start + 1 month)`.
pub fn aggregate_actual(invoices: &[Invoice], bucket: &MonthBucket) -> BucketRevenue {
    let mut amount_paid = Decimal::ZERO;
    let mut amount_to_pay = Decimal::ZERO;
    for invoice in invoices {
        amount_paid += invoice.amount_paid;
        amount_to_pay += invoice.amount_to_pay;
    }

    BucketRevenue {
        amount_paid,
        amount_to_pay,
        from: bucket.start,
        to: bucket.window_end(),
        date: bucket.label.clone(),
        month: bucket.month_label.clone(),
    }
}

/// Per-client rollup of a set of invoices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInvoiceGroup {
    pub client_id: i64,
    /// Empty when the invoices reference a client outside the fetched set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    pub amount_paid: Decimal,
    pub amount_to_pay: Decimal,
    pub total_invoices: usize,
    /// [`InvoiceStatus::Paid`] when nothing is outstanding across the
    /// group, [`InvoiceStatus::Unpaid`] otherwise.
    pub status: InvoiceStatus,
}

#[derive(Default)]
struct GroupSums {
    client: Option<Client>,
    amount_paid: Decimal,
    amount_to_pay: Decimal,
    count: usize,
}

/// Groups invoices by client id, summing amounts and counting invoices.
///
/// Output is ordered by ascending client id. Orphaned invoices keep their
/// client id and group like any other, just with no client attached.
pub fn group_invoices_by_client(invoices: &[InvoiceWithClient]) -> Vec<ClientInvoiceGroup> {
    let mut groups: BTreeMap<i64, GroupSums> = BTreeMap::new();

    for entry in invoices {
        let sums = groups.entry(entry.invoice.client_id).or_default();
        if sums.count == 0 {
            sums.client = entry.client.clone();
        }
        sums.amount_paid += entry.invoice.amount_paid;
        sums.amount_to_pay += entry.invoice.amount_to_pay;
        sums.count += 1;
    }

    groups
        .into_iter()
        .map(|(client_id, sums)| ClientInvoiceGroup {
            client_id,
            client: sums.client,
            amount_paid: sums.amount_paid,
            amount_to_pay: sums.amount_to_pay,
            total_invoices: sums.count,
            status: if sums.amount_to_pay.is_zero() {
                InvoiceStatus::Paid
            } else {
                InvoiceStatus::Unpaid
            },
        })
        .collect()
}

/// Grand totals across per-client groups: collected revenue and pending
/// (still outstanding) amount.
pub fn invoice_totals(groups: &[ClientInvoiceGroup]) -> (Decimal, Decimal) {
    let total_revenue = groups.iter().map(|g| g.amount_paid).sum();
    let pending_amount = groups.iter().map(|g| g.amount_to_pay).sum();
    (total_revenue, pending_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;
    use crate::revenue::{attach_clients_to_invoices, month_buckets};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(value: i64) -> Decimal {
        Decimal::new(value, 0)
    }

    fn march_bucket() -> MonthBucket {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 1));
        month_buckets(&range, date(2024, 6, 1)).remove(0)
    }

    #[test]
    fn sums_paid_and_outstanding_amounts() {
        let invoices = vec![
            Invoice::new(1, 4).with_amounts(dec(30), dec(0)),
            Invoice::new(2, 5).with_amounts(dec(0), dec(20)),
            Invoice::new(3, 4).with_amounts(dec(10), dec(5)),
        ];

        let revenue = aggregate_actual(&invoices, &march_bucket());

        assert_eq!(revenue.amount_paid, dec(40));
        assert_eq!(revenue.amount_to_pay, dec(25));
        assert_eq!(revenue.from, date(2024, 3, 1));
        assert_eq!(revenue.to, date(2024, 4, 1));
        assert_eq!(revenue.month, "Mar 2024");
    }

    #[test]
    fn empty_invoice_set_sums_to_zero() {
        let revenue = aggregate_actual(&[], &march_bucket());
        assert!(revenue.amount_paid.is_zero());
        assert!(revenue.amount_to_pay.is_zero());
    }

    #[test]
    fn aggregation_is_idempotent_over_the_same_set() {
        let invoices = vec![Invoice::new(1, 4).with_amounts(dec(30), dec(12))];
        let bucket = march_bucket();
        assert_eq!(
            aggregate_actual(&invoices, &bucket),
            aggregate_actual(&invoices, &bucket)
        );
    }

    #[test]
    fn groups_sum_per_client_and_order_by_id() {
        let clients = vec![
            Client::new(7).with_company_name("Acme Wireless"),
            Client::new(3),
        ];
        let invoices = attach_clients_to_invoices(
            vec![
                Invoice::new(1, 7).with_amounts(dec(50), dec(0)),
                Invoice::new(2, 3).with_amounts(dec(0), dec(25)),
                Invoice::new(3, 7).with_amounts(dec(50), dec(0)),
            ],
            &clients,
        );

        let groups = group_invoices_by_client(&invoices);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].client_id, 3);
        assert_eq!(groups[1].client_id, 7);

        let acme = &groups[1];
        assert_eq!(acme.amount_paid, dec(100));
        assert!(acme.amount_to_pay.is_zero());
        assert_eq!(acme.total_invoices, 2);
        assert_eq!(acme.status, InvoiceStatus::Paid);
        assert_eq!(
            acme.client.as_ref().and_then(|c| c.company_name.as_deref()),
            Some("Acme Wireless")
        );

        assert_eq!(groups[0].status, InvoiceStatus::Unpaid);
    }

    #[test]
    fn any_outstanding_amount_marks_the_group_unpaid() {
        let invoices = attach_clients_to_invoices(
            vec![
                Invoice::new(1, 7).with_amounts(dec(100), dec(0)),
                Invoice::new(2, 7).with_amounts(dec(0), dec(200)),
            ],
            &[Client::new(7)],
        );

        let groups = group_invoices_by_client(&invoices);
        let group = &groups[0];
        assert_eq!(group.amount_paid, dec(100));
        assert_eq!(group.amount_to_pay, dec(200));
        assert_eq!(group.total_invoices, 2);
        assert_eq!(group.status, InvoiceStatus::Unpaid);
    }

    #[test]
    fn orphan_invoices_group_without_a_client() {
        let invoices = attach_clients_to_invoices(
            vec![Invoice::new(1, 99).with_amounts(dec(10), dec(10))],
            &[Client::new(1)],
        );

        let groups = group_invoices_by_client(&invoices);
        assert_eq!(groups[0].client_id, 99);
        assert!(groups[0].client.is_none());
        assert_eq!(groups[0].total_invoices, 1);
    }

    #[test]
    fn totals_sum_across_groups() {
        let invoices = attach_clients_to_invoices(
            vec![
                Invoice::new(1, 1).with_amounts(dec(50), dec(5)),
                Invoice::new(2, 2).with_amounts(dec(30), dec(0)),
            ],
            &[Client::new(1), Client::new(2)],
        );

        let groups = group_invoices_by_client(&invoices);
        let (total_revenue, pending_amount) = invoice_totals(&groups);
        assert_eq!(total_revenue, dec(80));
        assert_eq!(pending_amount, dec(5));
    }
}
