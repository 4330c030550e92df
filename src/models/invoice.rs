use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Invoice lifecycle status, wire-encoded as an integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceStatus {
    Draft,
    Unpaid,
    PartiallyPaid,
    Paid,
    Void,
    ProformaProcessed,
}

impl InvoiceStatus {
    pub fn code(self) -> i64 {
        match self {
            Self::Draft => 0,
            Self::Unpaid => 1,
            Self::PartiallyPaid => 2,
            Self::Paid => 3,
            Self::Void => 4,
            Self::ProformaProcessed => 5,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Draft),
            1 => Some(Self::Unpaid),
            2 => Some(Self::PartiallyPaid),
            3 => Some(Self::Paid),
            4 => Some(Self::Void),
            5 => Some(Self::ProformaProcessed),
            _ => None,
        }
    }

    /// Human-readable status name as shown in the CRM.
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Unpaid => "Unpaid",
            Self::PartiallyPaid => "Partially paid",
            Self::Paid => "Paid",
            Self::Void => "Void",
            Self::ProformaProcessed => "Processed proforma",
        }
    }
}

impl Serialize for InvoiceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for InvoiceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = i64::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown invoice status code {code}")))
    }
}

/// An issued invoice, as returned by `GET /invoices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: i64,
    pub client_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    /// Issue timestamp as the API sends it. Range scoping happens server-side
    /// through query parameters, so this is never parsed here.
    #[serde(default)]
    pub created_date: String,
    pub amount_paid: Decimal,
    pub amount_to_pay: Decimal,
    #[serde(default)]
    pub total: Decimal,
    pub status: InvoiceStatus,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Invoice {
    pub fn new(id: i64, client_id: i64) -> Self {
        Self {
            id,
            client_id,
            number: None,
            created_date: String::new(),
            amount_paid: Decimal::ZERO,
            amount_to_pay: Decimal::ZERO,
            total: Decimal::ZERO,
            status: InvoiceStatus::Unpaid,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_amounts(mut self, paid: Decimal, to_pay: Decimal) -> Self {
        self.amount_paid = paid;
        self.amount_to_pay = to_pay;
        self.total = paid + to_pay;
        self
    }

    pub fn with_status(mut self, status: InvoiceStatus) -> Self {
        self.status = status;
        self
    }
}
