use serde::{Deserialize, Serialize};

/// A CRM client record, as returned by `GET /clients`.
///
/// Only the fields the aggregation pipelines read are typed; everything else
/// the API sends rides along in `extra` and is re-emitted on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_lead: bool,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Client {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            company_name: None,
            first_name: None,
            last_name: None,
            is_lead: false,
            is_archived: false,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.company_name = Some(name.into());
        self
    }

    pub fn with_person_name(
        mut self,
        first: impl Into<String>,
        last: impl Into<String>,
    ) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Company name when set and non-empty, otherwise "First Last".
    pub fn display_name(&self) -> String {
        match self.company_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => {
                let first = self.first_name.as_deref().unwrap_or("");
                let last = self.last_name.as_deref().unwrap_or("");
                format!("{first} {last}").trim().to_string()
            }
        }
    }
}
