use serde::Serialize;

/// One line of the shopping cart. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
}

/// Point-in-time copy of the cart, handed out to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub count: u32,
}

/// Cart keyed by food id, owned by the application actor.
///
/// Additions only: there is no removal, quantity edit or checkout.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
    count: u32,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a food and return the updated line.
    ///
    /// The line keeps the name and price from its first addition.
    pub fn add(&mut self, food_id: u64, name: impl Into<String>, price: f64) -> CartItem {
        self.count += 1;

        if let Some(existing) = self.items.iter_mut().find(|item| item.id == food_id) {
            existing.quantity += 1;
            return existing.clone();
        }

        let item = CartItem {
            id: food_id,
            name: name.into(),
            price,
            quantity: 1,
        };
        self.items.push(item.clone());
        item
    }

    #[cfg(test)]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Total units added so far.
    pub fn count(&self) -> u32 {
        self.count
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            count: self.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_food_increments_quantity() {
        let mut cart = CartStore::new();
        cart.add(1, "Pizza", 45.9);
        let line = cart.add(1, "Pizza", 45.9);

        assert_eq!(line.quantity, 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_distinct_foods_keep_insertion_order() {
        let mut cart = CartStore::new();
        cart.add(2, "Burger", 35.9);
        cart.add(1, "Pizza", 45.9);
        cart.add(2, "Burger", 35.9);

        let snapshot = cart.snapshot();
        let ids: Vec<u64> = snapshot.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(snapshot.items[0].quantity, 2);
        assert_eq!(snapshot.count, 3);
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }
}
