use tokio::sync::oneshot;

use crate::app_system::Page;
use crate::cart::{CartItem, CartSnapshot};
use crate::domain::OrderStatus;
use crate::error::AppError;
use crate::queries::SortKey;

pub type Response<T> = oneshot::Sender<Result<T, AppError>>;

/// UI events delivered to the application actor. Request/response variants
/// carry a oneshot channel; fire-and-forget ones do not.
#[derive(Debug)]
pub enum AppRequest {
    /// Open a page location such as `/cardapio.html?category=pizza`.
    Navigate {
        location: String,
        respond_to: Response<Page>,
    },
    /// Text typed into the search box; debounced.
    SearchInput {
        text: String,
    },
    SelectCategory {
        category: String,
        respond_to: Response<usize>,
    },
    SelectSort {
        key: SortKey,
        respond_to: Response<usize>,
    },
    AddToCart {
        food_id: u64,
        name: String,
        price: f64,
        respond_to: Response<CartItem>,
    },
    UpdateOrderStatus {
        order_id: u64,
        status: OrderStatus,
        respond_to: Response<usize>,
    },
    ViewOrder {
        order_id: u64,
        respond_to: Response<()>,
    },
    GetCart {
        respond_to: Response<CartSnapshot>,
    },
    Shutdown,
}
