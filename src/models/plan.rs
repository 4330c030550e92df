use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A billing template from `GET /service-plans`.
///
/// Plans size the catalog in reports; forecasting itself bills from each
/// service's own price/period snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlan {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_plan_type: Option<String>,
    /// Price/length combinations the plan is offered at.
    #[serde(default)]
    pub periods: Vec<PlanPeriod>,
    #[serde(default)]
    pub archived: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One price/length option within a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPeriod {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Length in whole months.
    pub period: i64,
    pub enabled: bool,
}
