use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle status of a service, wire-encoded as an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceStatus {
    Prepared,
    Active,
    Ended,
    Suspended,
    PreparedBlocked,
    Obsolete,
    Deferred,
    Quoted,
}

/// Statuses that make a service count toward an "active client".
pub const COUNTABLE_STATUSES: [ServiceStatus; 2] = [ServiceStatus::Active, ServiceStatus::Quoted];

impl ServiceStatus {
    pub fn code(self) -> i64 {
        match self {
            Self::Prepared => 0,
            Self::Active => 1,
            Self::Ended => 2,
            Self::Suspended => 3,
            Self::PreparedBlocked => 4,
            Self::Obsolete => 5,
            Self::Deferred => 6,
            Self::Quoted => 7,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Prepared),
            1 => Some(Self::Active),
            2 => Some(Self::Ended),
            3 => Some(Self::Suspended),
            4 => Some(Self::PreparedBlocked),
            5 => Some(Self::Obsolete),
            6 => Some(Self::Deferred),
            7 => Some(Self::Quoted),
            _ => None,
        }
    }

    /// True for the statuses in [`COUNTABLE_STATUSES`].
    pub fn is_countable(self) -> bool {
        matches!(self, Self::Active | Self::Quoted)
    }
}

impl Serialize for ServiceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for ServiceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown service status code {code}")))
    }
}

/// One subscribed service, as returned by `GET /clients/services`.
///
/// Price and period are the snapshot taken when the client subscribed, which
/// is what forecasting bills against (not the live plan definition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub client_id: i64,
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub service_plan_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_plan_name: Option<String>,
    pub service_plan_price: Decimal,
    /// Billing cycle length in whole months.
    pub service_plan_period: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Service {
    pub fn new(id: i64, client_id: i64) -> Self {
        Self {
            id,
            client_id,
            status: ServiceStatus::Active,
            name: None,
            service_plan_id: 0,
            service_plan_name: None,
            service_plan_price: Decimal::ZERO,
            service_plan_period: 1,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_status(mut self, status: ServiceStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the subscription-time plan snapshot.
    pub fn with_plan(mut self, plan_id: i64, price: Decimal, period_months: i64) -> Self {
        self.service_plan_id = plan_id;
        self.service_plan_price = price;
        self.service_plan_period = period_months;
        self
    }
}
