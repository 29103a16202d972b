use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle state of an order. The wire form is the plain Portuguese label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
    /// Any other label the backend uses for a not-yet-finished order.
    Other(String),
}

impl OrderStatus {
    pub const PREPARING: &'static str = "Em preparo";
    pub const OUT_FOR_DELIVERY: &'static str = "Saiu para entrega";
    pub const DELIVERED: &'static str = "Entregue";
    pub const CANCELLED: &'static str = "Cancelado";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Preparing => Self::PREPARING,
            Self::OutForDelivery => Self::OUT_FOR_DELIVERY,
            Self::Delivered => Self::DELIVERED,
            Self::Cancelled => Self::CANCELLED,
            Self::Other(label) => label,
        }
    }

    /// Neither delivered nor cancelled.
    pub fn is_pending(&self) -> bool {
        !matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Style class of the status badge on an order card.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Preparing => "preparo",
            Self::OutForDelivery => "entrega",
            _ => "concluido",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for OrderStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            Self::PREPARING => Self::Preparing,
            Self::OUT_FOR_DELIVERY => Self::OutForDelivery,
            Self::DELIVERED => Self::Delivered,
            Self::CANCELLED => Self::Cancelled,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order as listed by `/orders`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: u64,
    pub user_id: Option<u64>,
    #[serde(alias = "customerName")]
    pub customer_name: Option<String>,
    pub total: Option<f64>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: OrderStatus,
    pub items: Option<Vec<OrderItem>>,
}

impl Order {
    #[allow(dead_code)]
    pub fn new(id: u64, customer_name: impl Into<String>, total: f64, status: impl Into<OrderStatus>) -> Self {
        Self {
            id,
            customer_name: Some(customer_name.into()),
            total: Some(total),
            status: status.into(),
            ..Self::default()
        }
    }
}

/// `null` reads the same as a missing status.
fn status_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OrderStatus, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?
        .map(OrderStatus::from)
        .unwrap_or_default())
}
