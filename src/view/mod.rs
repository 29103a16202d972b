//! In-memory document the renderers draw into.
//!
//! Every region holds the markup last committed to it. Writes that come back
//! from the network go through a [`Ticket`]: a region only accepts the
//! response of its most recent dispatch, so a slow, older query can never
//! overwrite a newer one.

pub mod render;
pub mod text;

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Named containers of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Featured dishes on the home page.
    DishesGrid,
    /// Full menu grid.
    CardGrid,
    RestaurantsGrid,
    Orders,
    CartBadge,
    Notification,
    /// Blocking messages (`alert` in a browser).
    Alert,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::DishesGrid,
        Region::CardGrid,
        Region::RestaurantsGrid,
        Region::Orders,
        Region::CartBadge,
        Region::Notification,
        Region::Alert,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Region::DishesGrid => "dishesGrid",
            Region::CardGrid => "cardGrid",
            Region::RestaurantsGrid => "restaurantsGrid",
            Region::Orders => "container",
            Region::CartBadge => "cart-count",
            Region::Notification => "notification",
            Region::Alert => "alert",
        }
    }
}

/// Food card layout, picked by the caller for the page being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Featured dish cards on the home page.
    #[default]
    Dish,
    /// Compact cards on the menu page.
    Card,
}

impl ViewMode {
    pub fn food_region(self) -> Region {
        match self {
            ViewMode::Dish => Region::DishesGrid,
            ViewMode::Card => Region::CardGrid,
        }
    }
}

/// Proof of a dispatch against one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    region: Region,
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
struct Document {
    regions: HashMap<Region, String>,
    latest: HashMap<Region, u64>,
    next_generation: u64,
    active_category: Option<String>,
}

/// Shared handle to the document. Clones see the same regions.
#[derive(Debug, Clone, Default)]
pub struct View {
    inner: Arc<Mutex<Document>>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request against `region`, superseding any in flight.
    pub fn dispatch(&self, region: Region) -> Ticket {
        let mut doc = self.inner.lock();
        doc.next_generation += 1;
        let generation = doc.next_generation;
        doc.latest.insert(region, generation);
        Ticket { region, generation }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.inner.lock().latest.get(&ticket.region) == Some(&ticket.generation)
    }

    /// Replace the region's content if `ticket` is still the latest dispatch.
    pub fn commit(&self, ticket: Ticket, html: String) -> bool {
        let mut doc = self.inner.lock();
        if doc.latest.get(&ticket.region) != Some(&ticket.generation) {
            return false;
        }
        doc.regions.insert(ticket.region, html);
        true
    }

    /// Empty the region if `ticket` is still the latest dispatch.
    pub fn clear_if_current(&self, ticket: Ticket) -> bool {
        let mut doc = self.inner.lock();
        if doc.latest.get(&ticket.region) != Some(&ticket.generation) {
            return false;
        }
        doc.regions.remove(&ticket.region);
        true
    }

    /// Unconditional replace, for regions driven only by local state.
    pub fn replace(&self, region: Region, html: String) {
        self.inner.lock().regions.insert(region, html);
    }

    pub fn content(&self, region: Region) -> Option<String> {
        self.inner.lock().regions.get(&region).cloned()
    }

    pub fn set_active_category(&self, category: impl Into<String>) {
        self.inner.lock().active_category = Some(category.into());
    }

    pub fn active_category(&self) -> Option<String> {
        self.inner.lock().active_category.clone()
    }
}
