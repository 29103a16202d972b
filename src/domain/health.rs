use serde::{Deserialize, Serialize};

/// Body of `GET /health`. Fields beyond the common ones are kept verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: Option<String>,
    pub message: Option<String>,
    pub time: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
