//! On-demand operations: fetch, shape in memory, render, commit.
//!
//! Every query dispatches a [`Ticket`] against its region first, so when two
//! queries for the same region overlap only the later one reaches the view.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::clients::DeliveryBackend;
use crate::domain::{Food, HealthStatus, OrderStatus};
use crate::error::RequestError;
use crate::view::text::collation_key;
use crate::view::{render, Region, Ticket, View, ViewMode};

/// Dishes shown when a blank search resets the home page.
pub const DEFAULT_DISH_LIMIT: usize = 6;
/// Dishes featured on the home page at load.
pub const HOME_DISH_LIMIT: usize = 3;

const TOP_FOODS_FAILED: &str = "Não foi possível carregar os pratos. Verifique se o servidor está rodando.";
const RESTAURANTS_FAILED: &str = "Não foi possível carregar os restaurantes. Verifique se o servidor está rodando.";
const MENU_FAILED: &str = "Erro ao carregar o cardápio";
const FILTER_FAILED: &str = "Erro ao filtrar produtos";
const SEARCH_FAILED: &str = "Erro ao buscar produtos";
const SORT_FAILED: &str = "Erro ao ordenar produtos";
const ORDERS_FAILED: &str = "Erro ao carregar pedidos. Verifique se o servidor está rodando.";
const STATUS_UPDATE_FAILED: &str = "Erro ao atualizar status do pedido. Verifique se o servidor está rodando.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    /// Keep the server's order.
    Unsorted,
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self {
        match value {
            "nome" => SortKey::Name,
            "preco" => SortKey::Price,
            _ => SortKey::Unsorted,
        }
    }
}

/// A failed home-page load that may be replaced by demonstration dishes.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackOffer {
    pub ticket: Ticket,
    pub error: RequestError,
}

pub fn demo_foods() -> Vec<Food> {
    vec![
        Food::new(1, "Pizza Margherita Suprema", 45.90)
            .with_description("Molho de tomate artesanal, mussarela premium, manjericão fresco")
            .with_image("https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400")
            .with_tags(["Mussarela", "Manjericão"]),
        Food::new(2, "Burger Classic Deluxe", 35.90)
            .with_description("Hambúrguer artesanal 180g, queijo cheddar, alface, tomate")
            .with_image("https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400")
            .with_tags(["Carne 180g", "Cheddar"]),
        Food::new(3, "Café Expresso Premium", 12.90)
            .with_description("Café expresso com grãos italianos, leite cremoso e canela")
            .with_image("https://images.unsplash.com/photo-1501339847302-ac426a4a7cbb?w=400")
            .with_tags(["Café", "Premium"]),
    ]
}

/// Foods whose name, description or a tag contains `query`, ignoring case.
pub fn filter_matching(foods: Vec<Food>, query: &str) -> Vec<Food> {
    let needle = query.to_lowercase();
    foods.into_iter().filter(|food| food.matches(&needle)).collect()
}

/// Stable in-place sort. Foods without a name sort after named ones; a
/// missing price counts as zero.
pub fn order_by(foods: &mut [Food], key: SortKey) {
    match key {
        SortKey::Name => foods.sort_by_cached_key(|food| match food.name.as_deref() {
            Some(name) => (false, collation_key(name), name.to_string()),
            None => (true, String::new(), String::new()),
        }),
        SortKey::Price => {
            foods.sort_by(|a, b| a.price.unwrap_or(0.0).total_cmp(&b.price.unwrap_or(0.0)))
        }
        SortKey::Unsorted => {}
    }
}

fn is_wildcard(category: &str) -> bool {
    category.eq_ignore_ascii_case("todos") || category.eq_ignore_ascii_case("all")
}

pub struct Queries<B> {
    backend: Arc<B>,
    view: View,
}

impl<B> Clone for Queries<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            view: self.view.clone(),
        }
    }
}

impl<B: DeliveryBackend> Queries<B> {
    pub fn new(backend: Arc<B>, view: View) -> Self {
        Self { backend, view }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Dispatch against `region` and show the loading indicator.
    fn begin(&self, region: Region) -> Ticket {
        let ticket = self.view.dispatch(region);
        self.view.commit(ticket, render::loading());
        ticket
    }

    fn show_foods(
        &self,
        ticket: Ticket,
        mode: ViewMode,
        result: Result<Vec<Food>, RequestError>,
        failure: &str,
    ) -> Result<usize, RequestError> {
        match result {
            Ok(foods) => {
                if !self.view.commit(ticket, render::food_cards(Some(foods.as_slice()), mode)) {
                    warn!(generation = ticket.generation(), "Discarding stale food results");
                }
                Ok(foods.len())
            }
            Err(e) => {
                error!(error = %e, "Query failed: {failure}");
                self.view.commit(ticket, render::error_block(failure));
                Err(e)
            }
        }
    }

    /// First `limit` foods as featured dishes.
    #[instrument(skip(self))]
    pub async fn load_top_foods(&self, limit: usize) -> Result<usize, FallbackOffer> {
        let ticket = self.begin(Region::DishesGrid);
        match self.backend.list_foods().await {
            Ok(foods) => {
                let total = foods.len();
                let top = foods.into_iter().take(limit).collect();
                let shown = self
                    .show_foods(ticket, ViewMode::Dish, Ok(top), TOP_FOODS_FAILED)
                    .map_err(|error| FallbackOffer { ticket, error })?;
                info!(total, "Foods loaded from API");
                Ok(shown)
            }
            Err(error) => {
                error!(error = %error, "Failed to load foods");
                self.view.commit(ticket, render::error_block(TOP_FOODS_FAILED));
                Err(FallbackOffer { ticket, error })
            }
        }
    }

    /// Show the demonstration dishes, unless a newer query took the region.
    pub fn apply_demo_foods(&self, offer: &FallbackOffer) -> bool {
        let applied = self
            .view
            .commit(offer.ticket, render::food_cards(Some(demo_foods().as_slice()), ViewMode::Dish));
        if applied {
            info!("Using demonstration data");
        }
        applied
    }

    #[instrument(skip(self))]
    pub async fn load_restaurants(&self) -> Result<usize, RequestError> {
        let ticket = self.begin(Region::RestaurantsGrid);
        match self.backend.list_restaurants().await {
            Ok(restaurants) => {
                self.view
                    .commit(ticket, render::restaurant_cards(Some(restaurants.as_slice())));
                info!(count = restaurants.len(), "Restaurants loaded from API");
                Ok(restaurants.len())
            }
            Err(e) => {
                error!(error = %e, "Failed to load restaurants");
                self.view.commit(ticket, render::error_block(RESTAURANTS_FAILED));
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn load_full_menu(&self) -> Result<usize, RequestError> {
        let ticket = self.begin(Region::CardGrid);
        let result = self.backend.list_foods().await;
        let shown = self.show_foods(ticket, ViewMode::Card, result, MENU_FAILED)?;
        info!(count = shown, "Full menu loaded");
        Ok(shown)
    }

    /// `todos` and `all` fetch everything; any other value goes through the
    /// category endpoint.
    #[instrument(skip(self))]
    pub async fn filter_by_category(&self, category: &str, mode: ViewMode) -> Result<usize, RequestError> {
        let ticket = self.begin(mode.food_region());
        let result = if is_wildcard(category) {
            self.backend.list_foods().await
        } else {
            self.backend.list_foods_by_category(category).await
        };

        let shown = self.show_foods(ticket, mode, result, FILTER_FAILED)?;
        if self.view.is_current(ticket) {
            self.view.set_active_category(category.to_lowercase());
        }
        info!(count = shown, "Category filter applied");
        Ok(shown)
    }

    /// Client-side search over the full food list. A blank query restores the
    /// default listing for `mode`.
    #[instrument(skip(self))]
    pub async fn search_foods(&self, query: &str, mode: ViewMode) -> Result<usize, RequestError> {
        let query = query.trim();
        if query.is_empty() {
            return match mode {
                ViewMode::Card => self.load_full_menu().await,
                ViewMode::Dish => self
                    .load_top_foods(DEFAULT_DISH_LIMIT)
                    .await
                    .map_err(|offer| offer.error),
            };
        }

        let ticket = self.begin(mode.food_region());
        let result = self
            .backend
            .list_foods()
            .await
            .map(|foods| filter_matching(foods, query));
        let shown = self.show_foods(ticket, mode, result, SEARCH_FAILED)?;
        info!(results = shown, "Search applied");
        Ok(shown)
    }

    #[instrument(skip(self))]
    pub async fn sort_foods(&self, key: SortKey, mode: ViewMode) -> Result<usize, RequestError> {
        let ticket = self.begin(mode.food_region());
        let result = self.backend.list_foods().await.map(|mut foods| {
            order_by(&mut foods, key);
            foods
        });
        let shown = self.show_foods(ticket, mode, result, SORT_FAILED)?;
        info!(?key, "Sort applied");
        Ok(shown)
    }

    #[instrument(skip(self))]
    pub async fn load_orders(&self) -> Result<usize, RequestError> {
        let ticket = self.view.dispatch(Region::Orders);
        match self.backend.list_orders().await {
            Ok(orders) => {
                self.view.commit(ticket, render::order_board(&orders));
                info!(count = orders.len(), "Orders loaded");
                Ok(orders.len())
            }
            Err(e) => {
                error!(error = %e, "Failed to load orders");
                self.view.commit(ticket, render::error_block(ORDERS_FAILED));
                Err(e)
            }
        }
    }

    /// Ask the backend to move an order, then reload the whole list. Nothing
    /// changes on screen before the backend accepts.
    #[instrument(skip(self, status), fields(status = %status))]
    pub async fn update_order_status(&self, order_id: u64, status: OrderStatus) -> Result<usize, RequestError> {
        info!("Updating order status");
        if let Err(e) = self.backend.update_order_status(order_id, &status).await {
            error!(error = %e, "Failed to update order status");
            self.view.replace(Region::Alert, render::alert(STATUS_UPDATE_FAILED));
            return Err(e);
        }

        self.view.replace(
            Region::Alert,
            render::alert(&format!("Status do pedido #{order_id} atualizado para: {status}")),
        );
        let count = self.load_orders().await?;
        info!("Order updated successfully");
        Ok(count)
    }

    pub fn view_order(&self, order_id: u64) {
        self.view.replace(
            Region::Alert,
            render::alert(&format!(
                "Visualizar pedido #{order_id}\n\nEsta funcionalidade pode ser expandida para mostrar detalhes completos do pedido."
            )),
        );
    }

    /// `None` when the API is unreachable.
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> Option<HealthStatus> {
        match self.backend.health_check().await {
            Ok(health) => {
                info!(status = ?health.status, "API status");
                Some(health)
            }
            Err(e) => {
                error!(error = %e, "API is not responding");
                None
            }
        }
    }
}
