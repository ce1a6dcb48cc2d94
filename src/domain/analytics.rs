//! Inventory figures for the artisan dashboard, derived from the stored products.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::commerce::parse_price;
use crate::domain::model::{Product, ProductStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_products: usize,
    pub active: usize,
    pub draft: usize,
    pub archived: usize,
    pub total_stock: u64,
    /// Sum of price x stock over Active products.
    pub active_inventory_value: f64,
    /// Active products that are out of stock.
    pub sold_out: Vec<String>,
}

impl InventorySummary {
    pub fn from_products(products: &[Product]) -> Self {
        let mut s = InventorySummary {
            total_products: products.len(),
            ..Default::default()
        };
        for p in products {
            s.total_stock += u64::from(p.stock);
            match p.status {
                ProductStatus::Active => {
                    s.active += 1;
                    s.active_inventory_value +=
                        parse_price(&p.price).unwrap_or(0.0) * f64::from(p.stock);
                    if p.stock == 0 {
                        s.sold_out.push(p.name.clone());
                    }
                }
                ProductStatus::Draft => s.draft += 1,
                ProductStatus::Archived => s.archived += 1,
            }
        }
        s
    }
}
