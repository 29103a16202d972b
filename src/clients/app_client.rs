use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::app_system::Page;
use crate::cart::{CartItem, CartSnapshot};
use crate::domain::OrderStatus;
use crate::error::AppError;
use crate::messages::AppRequest;
use crate::queries::SortKey;

/// Handle to the application actor, one method per UI event.
#[derive(Clone)]
pub struct AppClient {
    sender: mpsc::Sender<AppRequest>,
}

impl AppClient {
    pub fn new(sender: mpsc::Sender<AppRequest>) -> Self {
        Self { sender }
    }

    /// Feed the search box. Returns once the input is queued, not when the
    /// debounced search completes.
    #[instrument(skip(self))]
    pub async fn search_input(&self, text: String) -> Result<(), AppError> {
        debug!("Sending request");
        self.sender
            .send(AppRequest::SearchInput { text })
            .await
            .map_err(|_| AppError::ActorCommunicationError("Actor closed".to_string()))
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), AppError> {
        debug!("Sending request");
        self.sender
            .send(AppRequest::Shutdown)
            .await
            .map_err(|_| AppError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(AppClient => fn navigate(location: String) -> Page as AppRequest::Navigate);
client_method!(AppClient => fn select_category(category: String) -> usize as AppRequest::SelectCategory);
client_method!(AppClient => fn select_sort(key: SortKey) -> usize as AppRequest::SelectSort);
client_method!(AppClient => fn add_to_cart(food_id: u64, name: String, price: f64) -> CartItem as AppRequest::AddToCart);
client_method!(AppClient => fn update_order_status(order_id: u64, status: OrderStatus) -> usize as AppRequest::UpdateOrderStatus);
client_method!(AppClient => fn view_order(order_id: u64) -> () as AppRequest::ViewOrder);
client_method!(AppClient => fn get_cart() -> CartSnapshot as AppRequest::GetCart);
