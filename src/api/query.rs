use chrono::NaiveDate;

use crate::models::{ServiceStatus, COUNTABLE_STATUSES};

/// Wire format for date-valued query parameters.
const DATE_PARAM_FORMAT: &str = "%Y-%m-%d";

/// Query parameters for `GET /clients`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientQuery {
    pub is_lead: Option<bool>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ClientQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn leads_only(mut self) -> Self {
        self.is_lead = Some(true);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(is_lead) = self.is_lead {
            params.push(("isLead".to_string(), i32::from(is_lead).to_string()));
        }
        push_paging(&mut params, self.limit, self.offset);
        params
    }
}

/// Query parameters for `GET /clients/services`.
///
/// Defaults to the countable statuses, which is what every aggregation in
/// this crate wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceQuery {
    /// Lifecycle statuses to include, repeated as `statuses[]` on the wire.
    /// Empty means no status filter.
    pub statuses: Vec<ServiceStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Default for ServiceQuery {
    fn default() -> Self {
        Self {
            statuses: COUNTABLE_STATUSES.to_vec(),
            limit: None,
            offset: None,
        }
    }
}

impl ServiceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the status filter and fetch services in every lifecycle state.
    pub fn any_status(mut self) -> Self {
        self.statuses.clear();
        self
    }

    pub fn with_statuses(mut self, statuses: impl Into<Vec<ServiceStatus>>) -> Self {
        self.statuses = statuses.into();
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params: Vec<(String, String)> = self
            .statuses
            .iter()
            .map(|status| ("statuses[]".to_string(), status.code().to_string()))
            .collect();
        push_paging(&mut params, self.limit, self.offset);
        params
    }
}

/// Query parameters for `GET /invoices`.
///
/// Both creation-date bounds are inclusive, matching the API's own
/// `createdDateFrom`/`createdDateTo` semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    pub created_date_from: Option<NaiveDate>,
    pub created_date_to: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl InvoiceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to invoices created between `from` and `to`, inclusive.
    pub fn created_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.created_date_from = Some(from);
        self.created_date_to = Some(to);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.created_date_from {
            params.push((
                "createdDateFrom".to_string(),
                from.format(DATE_PARAM_FORMAT).to_string(),
            ));
        }
        if let Some(to) = self.created_date_to {
            params.push((
                "createdDateTo".to_string(),
                to.format(DATE_PARAM_FORMAT).to_string(),
            ));
        }
        push_paging(&mut params, self.limit, self.offset);
        params
    }
}

fn push_paging(params: &mut Vec<(String, String)>, limit: Option<u32>, offset: Option<u32>) {
    if let Some(limit) = limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    if let Some(offset) = offset {
        params.push(("offset".to_string(), offset.to_string()));
    }
}
