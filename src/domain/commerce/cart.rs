use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::price::parse_price;
use crate::domain::model::Product;

/// A buyer's cart: full product snapshots in the order they were added.
///
/// The same product may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Removes every item named `name`. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|p| p.name != name);
        before - self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of the parsed item prices. Items whose price does not parse count as zero.
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|p| parse_price(&p.price).unwrap_or(0.0))
            .sum()
    }

    pub fn take_items(&mut self) -> Vec<Product> {
        std::mem::take(&mut self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ProductStatus;

    fn item(name: &str, price: &str) -> Product {
        Product {
            name: name.to_string(),
            description: String::new(),
            status: ProductStatus::Active,
            price: price.to_string(),
            stock: 5,
            date: String::new(),
            image: String::new(),
            ai_hint: String::new(),
        }
    }

    #[test]
    fn test_subtotal_of_known_catalogue() {
        let mut cart = Cart::new();
        cart.add(item("Hand-painted Madhubani Saree", "₹8,999"));
        cart.add(item("Terracotta Horse Statue", "₹3,499"));
        cart.add(item("Warli Art Coasters (Set of 4)", "₹999"));
        assert_eq!(cart.subtotal(), 13497.0);
    }

    #[test]
    fn test_unparseable_price_counts_as_zero() {
        let mut cart = Cart::new();
        cart.add(item("a", "₹100"));
        cart.add(item("b", "on request"));
        assert_eq!(cart.subtotal(), 100.0);
    }

    #[test]
    fn test_remove_drops_all_duplicates() {
        let mut cart = Cart::new();
        cart.add(item("a", "₹1"));
        cart.add(item("b", "₹2"));
        cart.add(item("a", "₹1"));
        assert_eq!(cart.remove("a"), 2);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.remove("missing"), 0);
    }
}
