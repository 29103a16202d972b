use serde::{Deserialize, Serialize};

/// A restaurant as served by `/restaurants`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(default)]
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub delivery_time: Option<String>,
    pub delivery_fee: Option<f64>,
    pub address: Option<String>,
}

impl Restaurant {
    #[allow(dead_code)]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            ..Self::default()
        }
    }
}
