use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use super::{FieldChecks, FieldError, Validate};

/// Listing state of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ProductStatus {
    Active,
    Draft,
    Archived,
}

impl ProductStatus {
    pub const ALL: [ProductStatus; 3] = [
        ProductStatus::Active,
        ProductStatus::Draft,
        ProductStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "Active",
            ProductStatus::Draft => "Draft",
            ProductStatus::Archived => "Archived",
        }
    }

    /// Case-insensitive parse (`"active"`, `"Active"`, `"ACTIVE"`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "active" => Some(ProductStatus::Active),
            "draft" => Some(ProductStatus::Draft),
            "archived" => Some(ProductStatus::Archived),
            _ => None,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown product status '{}'", s))
    }
}

/// A product listing as stored in the JSON document.
///
/// `name` is the only identity a product has; nothing enforces uniqueness.
/// `price` is kept as the formatted string the artisan entered (e.g. `"₹8,999"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub description: String,
    pub status: ProductStatus,
    pub price: String,
    pub stock: u32,
    pub date: String,
    pub image: String,
    pub ai_hint: String,
}

/// Payload of the save-product action. The action assigns `status` and the store assigns `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock: u32,
    pub image: String,
    #[serde(default)]
    pub ai_hint: String,
}

impl NewProduct {
    pub fn into_product(self, status: ProductStatus, date: String) -> Product {
        Product {
            name: self.name,
            description: self.description,
            status,
            price: self.price,
            stock: self.stock,
            date,
            image: self.image,
            ai_hint: self.ai_hint,
        }
    }
}

impl Validate for NewProduct {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldChecks::new()
            .min_len("name", &self.name, 3, "Product name must be at least 3 characters.")
            .not_blank("price", &self.price, "Price is required.")
            .finish()
    }
}

/// Products with `status`, in stored order.
pub fn filter_by_status(products: &[Product], status: ProductStatus) -> Vec<Product> {
    products
        .iter()
        .filter(|p| p.status == status)
        .cloned()
        .collect()
}

/// Products grouped by status. Every input product lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct StatusPartition {
    pub active: Vec<Product>,
    pub draft: Vec<Product>,
    pub archived: Vec<Product>,
}

impl StatusPartition {
    pub fn len(&self) -> usize {
        self.active.len() + self.draft.len() + self.archived.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn partition_by_status(products: &[Product]) -> StatusPartition {
    let mut out = StatusPartition::default();
    for p in products {
        let bucket = match p.status {
            ProductStatus::Active => &mut out.active,
            ProductStatus::Draft => &mut out.draft,
            ProductStatus::Archived => &mut out.archived,
        };
        bucket.push(p.clone());
    }
    out
}
