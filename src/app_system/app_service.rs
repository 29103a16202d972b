use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn, Instrument};

use super::Page;
use crate::cart::{CartItem, CartStore};
use crate::clients::{AppClient, DeliveryBackend};
use crate::domain::OrderStatus;
use crate::error::AppError;
use crate::messages::{AppRequest, Response};
use crate::queries::{FallbackOffer, Queries, SortKey, HOME_DISH_LIMIT};
use crate::view::{render, Region, ViewMode};

/// Timing knobs for the event loop.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub search_debounce: Duration,
    /// Show demonstration dishes when the home page cannot load foods.
    pub demo_fallback: bool,
    pub demo_delay: Duration,
    pub notification_ttl: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(500),
            demo_fallback: false,
            demo_delay: Duration::from_millis(2000),
            notification_ttl: Duration::from_millis(3000),
        }
    }
}

/// Actor that turns UI events into queries and owns the cart.
///
/// Network work runs in spawned tasks that own the reply channel, so a slow
/// request never blocks later events.
pub struct AppService<B: DeliveryBackend> {
    receiver: mpsc::Receiver<AppRequest>,
    queries: Queries<B>,
    cart: CartStore,
    settings: AppSettings,
    mode: ViewMode,
    pending_search: Option<JoinHandle<()>>,
}

impl<B: DeliveryBackend> AppService<B> {
    pub fn new(buffer_size: usize, queries: Queries<B>, settings: AppSettings) -> (Self, AppClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            queries,
            cart: CartStore::new(),
            settings,
            mode: ViewMode::default(),
            pending_search: None,
        };
        (service, AppClient::new(sender))
    }

    #[instrument(name = "app_service", skip(self))]
    pub async fn run(mut self) {
        info!("AppService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                AppRequest::Navigate { location, respond_to } => {
                    self.handle_navigate(location, respond_to);
                }
                AppRequest::SearchInput { text } => {
                    self.handle_search_input(text);
                }
                AppRequest::SelectCategory { category, respond_to } => {
                    self.handle_select_category(category, respond_to);
                }
                AppRequest::SelectSort { key, respond_to } => {
                    self.handle_select_sort(key, respond_to);
                }
                AppRequest::AddToCart {
                    food_id,
                    name,
                    price,
                    respond_to,
                } => {
                    self.handle_add_to_cart(food_id, name, price, respond_to);
                }
                AppRequest::UpdateOrderStatus {
                    order_id,
                    status,
                    respond_to,
                } => {
                    self.handle_update_order_status(order_id, status, respond_to);
                }
                AppRequest::ViewOrder { order_id, respond_to } => {
                    self.queries.view_order(order_id);
                    let _ = respond_to.send(Ok(()));
                }
                AppRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.snapshot()));
                }
                AppRequest::Shutdown => {
                    info!("AppService shutting down");
                    break;
                }
            }
        }

        if let Some(pending) = self.pending_search.take() {
            pending.abort();
        }
        info!("AppService stopped");
    }

    /// Health check first, then whatever the page needs. Load failures are
    /// rendered into their regions; the reply only reports the resolved page.
    #[instrument(skip(self, respond_to))]
    fn handle_navigate(&mut self, location: String, respond_to: Response<Page>) {
        let page = Page::from_location(&location);
        self.mode = page.view_mode();
        info!(?page, "Opening page");

        let queries = self.queries.clone();
        let settings = self.settings.clone();
        tokio::spawn(
            async move {
                if queries.check_health().await.is_none() {
                    warn!("API unavailable, some features may not work");
                }
                load_page(&queries, &page, &settings).await;
                let _ = respond_to.send(Ok(page));
            }
            .in_current_span(),
        );
    }

    /// Restart the debounce timer. Only the timer is cancelled by newer input;
    /// a search that already started runs to completion and is filtered by
    /// its region ticket.
    #[instrument(skip(self))]
    fn handle_search_input(&mut self, text: String) {
        if let Some(pending) = self.pending_search.take() {
            pending.abort();
        }

        let queries = self.queries.clone();
        let mode = self.mode;
        let delay = self.settings.search_debounce;
        let timer = async move {
            tokio::time::sleep(delay).await;
            debug!("Debounce elapsed");
            tokio::spawn(
                async move {
                    let _ = queries.search_foods(&text, mode).await;
                }
                .in_current_span(),
            );
        };
        self.pending_search = Some(tokio::spawn(timer.in_current_span()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_select_category(&self, category: String, respond_to: Response<usize>) {
        let queries = self.queries.clone();
        let mode = self.mode;
        tokio::spawn(
            async move {
                let result = queries.filter_by_category(&category, mode).await;
                let _ = respond_to.send(result.map_err(AppError::from));
            }
            .in_current_span(),
        );
    }

    #[instrument(skip(self, respond_to))]
    fn handle_select_sort(&self, key: SortKey, respond_to: Response<usize>) {
        let queries = self.queries.clone();
        let mode = self.mode;
        tokio::spawn(
            async move {
                let result = queries.sort_foods(key, mode).await;
                let _ = respond_to.send(result.map_err(AppError::from));
            }
            .in_current_span(),
        );
    }

    #[instrument(skip(self, name, respond_to))]
    fn handle_add_to_cart(&mut self, food_id: u64, name: String, price: f64, respond_to: Response<CartItem>) {
        let item = self.cart.add(food_id, name.as_str(), price);
        let view = self.queries.view().clone();

        view.replace(Region::CartBadge, render::cart_badge(self.cart.count()));
        let ticket = view.dispatch(Region::Notification);
        view.commit(ticket, render::cart_notification(&name, price));

        let ttl = self.settings.notification_ttl;
        tokio::spawn(
            async move {
                tokio::time::sleep(ttl).await;
                if view.clear_if_current(ticket) {
                    debug!("Cart notification cleared");
                }
            }
            .in_current_span(),
        );

        info!(quantity = item.quantity, cart_count = self.cart.count(), "Item added to cart");
        let _ = respond_to.send(Ok(item));
    }

    #[instrument(skip(self, status, respond_to), fields(status = %status))]
    fn handle_update_order_status(&self, order_id: u64, status: OrderStatus, respond_to: Response<usize>) {
        let queries = self.queries.clone();
        tokio::spawn(
            async move {
                let result = queries.update_order_status(order_id, status).await;
                let _ = respond_to.send(result.map_err(AppError::from));
            }
            .in_current_span(),
        );
    }
}

async fn load_page<B: DeliveryBackend>(queries: &Queries<B>, page: &Page, settings: &AppSettings) {
    // Failures are already logged and rendered by the queries.
    match page {
        Page::Home => {
            if let Err(offer) = queries.load_top_foods(HOME_DISH_LIMIT).await {
                schedule_demo_fallback(queries.clone(), offer, settings);
            }
            let _ = queries.load_restaurants().await;
        }
        Page::Menu { category: Some(category) } => {
            let _ = queries.filter_by_category(category, ViewMode::Card).await;
        }
        Page::Menu { category: None } => {
            let _ = queries.load_full_menu().await;
        }
        Page::Orders => {
            let _ = queries.load_orders().await;
        }
        Page::Unknown => debug!("Nothing to load for this page"),
    }
}

fn schedule_demo_fallback<B: DeliveryBackend>(queries: Queries<B>, offer: FallbackOffer, settings: &AppSettings) {
    if !settings.demo_fallback {
        return;
    }
    let delay = settings.demo_delay;
    tokio::spawn(
        async move {
            tokio::time::sleep(delay).await;
            queries.apply_demo_foods(&offer);
        }
        .in_current_span(),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Food, HealthStatus, Order, Restaurant};
    use crate::error::RequestError;
    use crate::mock_framework::*;
    use crate::view::View;

    fn start(settings: AppSettings) -> (AppClient, View, mpsc::Receiver<BackendCall>) {
        let (backend, receiver) = create_mock_backend(10);
        let view = View::new();
        let queries = Queries::new(Arc::new(backend), view.clone());
        let (service, client) = AppService::new(10, queries, settings);
        tokio::spawn(service.run());
        (client, view, receiver)
    }

    fn menu() -> Vec<Food> {
        vec![
            Food::new(1, "Pizza Margherita", 45.90),
            Food::new(2, "Burger Classic", 35.90),
            Food::new(3, "Calzone de Pizza", 39.90),
            Food::new(4, "Salada", 22.00),
        ]
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_typing_runs_one_search() {
        let (client, view, mut rx) = start(AppSettings::default());

        for text in ["p", "pi", "piz", "pizza"] {
            client.search_input(text.to_string()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let responder = expect_list_foods(&mut rx).await.expect("Expected one search");
        responder.send(Ok(menu())).unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(rx.try_recv().is_err(), "Only the last keystroke should search");
        let html = view.content(Region::DishesGrid).unwrap();
        assert!(html.contains("Pizza Margherita"));
        assert!(html.contains("Calzone de Pizza"));
        assert!(!html.contains("Burger Classic"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_typing_runs_each_search() {
        let (client, _view, mut rx) = start(AppSettings::default());

        client.search_input("pizza".to_string()).await.unwrap();
        expect_list_foods(&mut rx).await.unwrap().send(Ok(menu())).unwrap();

        client.search_input("burger".to_string()).await.unwrap();
        expect_list_foods(&mut rx).await.unwrap().send(Ok(menu())).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_add_to_cart_updates_badge_and_notification() {
        let (client, view, _rx) = start(AppSettings::default());

        client.add_to_cart(1, "Pizza".to_string(), 45.9).await.unwrap();
        let line = client.add_to_cart(1, "Pizza".to_string(), 45.9).await.unwrap();
        assert_eq!(line.quantity, 2);

        assert!(view.content(Region::CartBadge).unwrap().contains('2'));
        assert!(view.content(Region::Notification).unwrap().contains("Pizza"));

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(view.content(Region::Notification), None);

        let cart = client.get_cart().await.unwrap();
        assert_eq!(cart.count, 2);
        assert_eq!(cart.items.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_notification_outlives_older_timer() {
        let (client, view, _rx) = start(AppSettings::default());

        client.add_to_cart(1, "Pizza".to_string(), 45.9).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2000)).await;
        client.add_to_cart(2, "Burger".to_string(), 35.9).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(view.content(Region::Notification).unwrap().contains("Burger"));
    }

    #[tokio::test]
    async fn test_home_page_loads_dishes_and_restaurants() {
        let (client, view, mut rx) = start(AppSettings::default());
        let nav = tokio::spawn({
            let client = client.clone();
            async move { client.navigate("/index.html".to_string()).await }
        });

        expect_health_check(&mut rx).await.unwrap().send(Ok(HealthStatus::default())).unwrap();
        expect_list_foods(&mut rx).await.unwrap().send(Ok(menu())).unwrap();
        expect_list_restaurants(&mut rx)
            .await
            .unwrap()
            .send(Ok(vec![Restaurant::new(1, "Cantina")]))
            .unwrap();

        assert_eq!(nav.await.unwrap(), Ok(Page::Home));
        let dishes = view.content(Region::DishesGrid).unwrap();
        assert_eq!(dishes.matches(r#"class="dish-card""#).count(), 3);
        assert!(view.content(Region::RestaurantsGrid).unwrap().contains("Cantina"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_fallback_after_delay() {
        let settings = AppSettings {
            demo_fallback: true,
            ..AppSettings::default()
        };
        let (client, view, mut rx) = start(settings);
        let nav = tokio::spawn({
            let client = client.clone();
            async move { client.navigate("/".to_string()).await }
        });

        expect_health_check(&mut rx)
            .await
            .unwrap()
            .send(Err(RequestError::Network("refused".into())))
            .unwrap();
        expect_list_foods(&mut rx)
            .await
            .unwrap()
            .send(Err(RequestError::Network("refused".into())))
            .unwrap();
        expect_list_restaurants(&mut rx)
            .await
            .unwrap()
            .send(Err(RequestError::Network("refused".into())))
            .unwrap();
        nav.await.unwrap().unwrap();

        assert!(!view.content(Region::DishesGrid).unwrap().contains("dish-card"));
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(
            view.content(Region::DishesGrid).unwrap().matches(r#"class="dish-card""#).count(),
            3
        );
    }

    #[tokio::test]
    async fn test_menu_page_with_category_filters() {
        let (client, view, mut rx) = start(AppSettings::default());
        let nav = tokio::spawn({
            let client = client.clone();
            async move { client.navigate("/cardapio.html?category=pizza".to_string()).await }
        });

        expect_health_check(&mut rx).await.unwrap().send(Ok(HealthStatus::default())).unwrap();
        let (category, responder) = expect_foods_by_category(&mut rx).await.unwrap();
        assert_eq!(category, "pizza");
        responder.send(Ok(menu())).unwrap();

        nav.await.unwrap().unwrap();
        assert_eq!(view.content(Region::CardGrid).unwrap().matches(r#"<div class="card">"#).count(), 4);
        assert_eq!(view.active_category(), Some("pizza".to_string()));
    }

    #[tokio::test]
    async fn test_status_update_reports_and_reloads() {
        let (client, view, mut rx) = start(AppSettings::default());
        let task = tokio::spawn({
            let client = client.clone();
            async move { client.update_order_status(7, OrderStatus::Delivered).await }
        });

        let (order_id, status, responder) = expect_update_status(&mut rx).await.unwrap();
        assert_eq!((order_id, &status), (7, &OrderStatus::Delivered));
        responder.send(Ok(Order::new(7, "Ana", 50.0, OrderStatus::Delivered))).unwrap();
        expect_list_orders(&mut rx)
            .await
            .unwrap()
            .send(Ok(vec![Order::new(7, "Ana", 50.0, OrderStatus::Delivered)]))
            .unwrap();

        assert_eq!(task.await.unwrap(), Ok(1));
        assert!(view.content(Region::Alert).unwrap().contains("#7"));
    }

    #[tokio::test]
    async fn test_view_order_and_shutdown() {
        let (client, view, _rx) = start(AppSettings::default());

        client.view_order(42).await.unwrap();
        assert!(view.content(Region::Alert).unwrap().contains("#42"));

        client.shutdown().await.unwrap();
        assert!(matches!(
            client.get_cart().await,
            Err(AppError::ActorCommunicationError(_))
        ));
    }
}
