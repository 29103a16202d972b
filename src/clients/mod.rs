//! Handles to the outside world: the REST backend and the application actor.

#[macro_use]
mod macros;
pub mod app_client;
pub mod http_client;

pub use app_client::*;
pub use http_client::*;

use async_trait::async_trait;

use crate::domain::{Food, HealthStatus, Order, OrderStatus, Restaurant, User};
use crate::error::RequestError;

/// The fixed set of REST operations the client consumes.
///
/// Only `update_order_status` writes; everything else is a read.
#[async_trait]
pub trait DeliveryBackend: Send + Sync + 'static {
    async fn list_users(&self) -> Result<Vec<User>, RequestError>;
    async fn get_user(&self, id: u64) -> Result<User, RequestError>;
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, RequestError>;
    async fn get_restaurant(&self, id: u64) -> Result<Restaurant, RequestError>;
    async fn list_foods(&self) -> Result<Vec<Food>, RequestError>;
    async fn get_food(&self, id: u64) -> Result<Food, RequestError>;
    async fn list_foods_by_restaurant(&self, restaurant_id: u64) -> Result<Vec<Food>, RequestError>;
    async fn list_foods_by_category(&self, category: &str) -> Result<Vec<Food>, RequestError>;
    async fn list_orders(&self) -> Result<Vec<Order>, RequestError>;
    async fn update_order_status(&self, order_id: u64, status: &OrderStatus) -> Result<Order, RequestError>;
    async fn health_check(&self) -> Result<HealthStatus, RequestError>;
}
