//! # Mock Framework
//!
//! A [`DeliveryBackend`] that forwards every call to a channel the test owns.
//!
//! Use [`create_mock_backend`] to get a backend and a receiver, run the code
//! under test in a task, then answer its calls with helpers like
//! [`expect_list_foods`]. Because the test decides when each reply is sent,
//! response ordering (and therefore races) is fully deterministic.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::clients::DeliveryBackend;
use crate::domain::{Food, HealthStatus, Order, OrderStatus, Restaurant, User};
use crate::error::RequestError;

pub type Reply<T> = oneshot::Sender<Result<T, RequestError>>;

/// One backend call captured by the mock.
#[derive(Debug)]
pub enum BackendCall {
    ListUsers { respond_to: Reply<Vec<User>> },
    GetUser { id: u64, respond_to: Reply<User> },
    ListRestaurants { respond_to: Reply<Vec<Restaurant>> },
    GetRestaurant { id: u64, respond_to: Reply<Restaurant> },
    ListFoods { respond_to: Reply<Vec<Food>> },
    GetFood { id: u64, respond_to: Reply<Food> },
    ListFoodsByRestaurant { restaurant_id: u64, respond_to: Reply<Vec<Food>> },
    ListFoodsByCategory { category: String, respond_to: Reply<Vec<Food>> },
    ListOrders { respond_to: Reply<Vec<Order>> },
    UpdateOrderStatus { order_id: u64, status: OrderStatus, respond_to: Reply<Order> },
    HealthCheck { respond_to: Reply<HealthStatus> },
}

#[derive(Debug, Clone)]
pub struct MockBackend {
    sender: mpsc::Sender<BackendCall>,
}

pub fn create_mock_backend(buffer_size: usize) -> (MockBackend, mpsc::Receiver<BackendCall>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MockBackend { sender }, receiver)
}

impl MockBackend {
    async fn call<T>(&self, make: impl FnOnce(Reply<T>) -> BackendCall) -> Result<T, RequestError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| RequestError::Network("Mock backend closed".to_string()))?;
        response
            .await
            .map_err(|_| RequestError::Network("Mock reply dropped".to_string()))?
    }
}

#[async_trait]
impl DeliveryBackend for MockBackend {
    async fn list_users(&self) -> Result<Vec<User>, RequestError> {
        self.call(|respond_to| BackendCall::ListUsers { respond_to }).await
    }

    async fn get_user(&self, id: u64) -> Result<User, RequestError> {
        self.call(|respond_to| BackendCall::GetUser { id, respond_to }).await
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, RequestError> {
        self.call(|respond_to| BackendCall::ListRestaurants { respond_to }).await
    }

    async fn get_restaurant(&self, id: u64) -> Result<Restaurant, RequestError> {
        self.call(|respond_to| BackendCall::GetRestaurant { id, respond_to }).await
    }

    async fn list_foods(&self) -> Result<Vec<Food>, RequestError> {
        self.call(|respond_to| BackendCall::ListFoods { respond_to }).await
    }

    async fn get_food(&self, id: u64) -> Result<Food, RequestError> {
        self.call(|respond_to| BackendCall::GetFood { id, respond_to }).await
    }

    async fn list_foods_by_restaurant(&self, restaurant_id: u64) -> Result<Vec<Food>, RequestError> {
        self.call(|respond_to| BackendCall::ListFoodsByRestaurant { restaurant_id, respond_to })
            .await
    }

    async fn list_foods_by_category(&self, category: &str) -> Result<Vec<Food>, RequestError> {
        let category = category.to_string();
        self.call(|respond_to| BackendCall::ListFoodsByCategory { category, respond_to })
            .await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RequestError> {
        self.call(|respond_to| BackendCall::ListOrders { respond_to }).await
    }

    async fn update_order_status(&self, order_id: u64, status: &OrderStatus) -> Result<Order, RequestError> {
        let status = status.clone();
        self.call(|respond_to| BackendCall::UpdateOrderStatus { order_id, status, respond_to })
            .await
    }

    async fn health_check(&self) -> Result<HealthStatus, RequestError> {
        self.call(|respond_to| BackendCall::HealthCheck { respond_to }).await
    }
}

/// Helper to verify that the next call is `GET /foods`
pub async fn expect_list_foods(receiver: &mut mpsc::Receiver<BackendCall>) -> Option<Reply<Vec<Food>>> {
    match receiver.recv().await {
        Some(BackendCall::ListFoods { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next call is `GET /foods/category/{category}`
pub async fn expect_foods_by_category(
    receiver: &mut mpsc::Receiver<BackendCall>,
) -> Option<(String, Reply<Vec<Food>>)> {
    match receiver.recv().await {
        Some(BackendCall::ListFoodsByCategory { category, respond_to }) => Some((category, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is `GET /restaurants`
pub async fn expect_list_restaurants(
    receiver: &mut mpsc::Receiver<BackendCall>,
) -> Option<Reply<Vec<Restaurant>>> {
    match receiver.recv().await {
        Some(BackendCall::ListRestaurants { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next call is `GET /orders`
pub async fn expect_list_orders(receiver: &mut mpsc::Receiver<BackendCall>) -> Option<Reply<Vec<Order>>> {
    match receiver.recv().await {
        Some(BackendCall::ListOrders { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next call is `PUT /orders/{id}/status`
pub async fn expect_update_status(
    receiver: &mut mpsc::Receiver<BackendCall>,
) -> Option<(u64, OrderStatus, Reply<Order>)> {
    match receiver.recv().await {
        Some(BackendCall::UpdateOrderStatus { order_id, status, respond_to }) => Some((order_id, status, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is `GET /health`
pub async fn expect_health_check(receiver: &mut mpsc::Receiver<BackendCall>) -> Option<Reply<HealthStatus>> {
    match receiver.recv().await {
        Some(BackendCall::HealthCheck { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let (backend, mut receiver) = create_mock_backend(10);

        let task = tokio::spawn(async move { backend.list_foods_by_category("pizza").await });

        let (category, responder) = expect_foods_by_category(&mut receiver)
            .await
            .expect("Expected category request");
        assert_eq!(category, "pizza");
        responder.send(Ok(vec![Food::new(1, "Margherita", 45.9)])).unwrap();

        let foods = task.await.unwrap().unwrap();
        assert_eq!(foods.len(), 1);
    }

    #[tokio::test]
    async fn test_dropped_reply_is_a_request_error() {
        let (backend, mut receiver) = create_mock_backend(10);

        let task = tokio::spawn(async move { backend.list_orders().await });
        drop(expect_list_orders(&mut receiver).await);

        assert!(matches!(task.await.unwrap(), Err(RequestError::Network(_))));
    }
}
