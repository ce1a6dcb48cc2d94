//! Server actions.
//!
//! Each action validates its form, forwards the payload to the JSON store or to
//! one flow, and returns the result. Underlying failures are logged here and
//! replaced by a fixed user-facing message; nothing is retried.

use crate::app::session::{Role, SessionStore};
use crate::domain::analytics::InventorySummary;
use crate::domain::commerce::{format_amount, format_price, CheckoutForm, OrderConfirmation, DEFAULT_CURRENCY};
use crate::domain::model::{
    filter_by_status, partition_by_status, FieldChecks, FieldError, NewProduct, Product,
    ProductStatus, Profile, StatusPartition, Validate,
};
use crate::flows::{
    self, ChatbotInput, ChatbotOutput, MarketingContentInput, MarketingContentOutput,
    ProductDescriptionInput, ProductDescriptionOutput, VisualizeRoomInput, VisualizeRoomOutput,
};
use crate::infra::genai::media::check_uploaded_media;
use crate::infra::genai::GenerativeModel;
use crate::storage::{JsonStore, StoreError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info};
use utoipa::ToSchema;

pub const DESCRIPTION_FAILED: &str = "Failed to generate description. Please check the server logs.";
pub const MARKETING_FAILED: &str = "Failed to generate marketing content. Please check the server logs.";
pub const CHATBOT_FAILED: &str = "Sorry, I am having trouble connecting. Please try again later.";
pub const VISUALIZE_FAILED: &str = "Failed to visualize product. Please try again.";
pub const SAVE_PRODUCT_FAILED: &str = "Failed to save the product.";
pub const SAVE_PROFILE_FAILED: &str = "Failed to save profile.";
pub const LOAD_PRODUCTS_FAILED: &str = "Could not fetch products.";
pub const LOAD_PROFILE_FAILED: &str = "Could not fetch your profile data.";

/// Number of Active products shown on the buyer dashboard.
pub const FEATURED_COUNT: usize = 4;

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Rejected(String),
    /// A store failure, reported with a generic message.
    #[error("{0}")]
    Storage(&'static str),
    /// An AI provider failure, reported with a generic message.
    #[error("{0}")]
    Generation(&'static str),
}

fn validated<T: Validate>(form: &T) -> Result<(), ActionError> {
    form.validate().map_err(ActionError::Validation)
}

fn storage_failure(action: &'static str, message: &'static str) -> impl FnOnce(StoreError) -> ActionError {
    move |e| {
        error!(action, error = %e, "Store operation failed");
        ActionError::Storage(message)
    }
}

fn generation_failure(action: &'static str, message: &'static str) -> impl FnOnce(flows::FlowError) -> ActionError {
    move |e| {
        error!(action, error = %e, "Flow failed");
        ActionError::Generation(message)
    }
}

/// Save-product form. When `currency` is present, `price` is the bare amount
/// and the stored price becomes `currency + amount`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductRequest {
    #[serde(flatten)]
    pub product: NewProduct,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeRequest {
    /// Name of an Active product; its stored image is used.
    pub product_name: String,
    pub room_image_uri: String,
}

impl Validate for VisualizeRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldChecks::new()
            .min_len("productName", &self.product_name, 1, "Please select a product.")
            .check(
                "roomImageUri",
                check_uploaded_media(&self.room_image_uri).is_ok(),
                "A photo of your room is required.",
            )
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<Product>,
    pub count: usize,
    pub subtotal: f64,
    pub subtotal_display: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Artisan { summary: InventorySummary },
    Buyer { featured: Vec<Product> },
}

pub struct ActionService {
    store: Arc<Mutex<JsonStore>>,
    model: Arc<dyn GenerativeModel>,
    sessions: Arc<SessionStore>,
}

impl ActionService {
    pub fn new(store: JsonStore, model: Arc<dyn GenerativeModel>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            model,
            sessions: Arc::new(SessionStore::new()),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn store(&self) -> &Arc<Mutex<JsonStore>> {
        &self.store
    }

    // --- AI actions ---

    pub async fn generate_product_description_action(
        &self,
        input: ProductDescriptionInput,
    ) -> Result<ProductDescriptionOutput, ActionError> {
        validated(&input)?;
        flows::product_description::run(self.model.as_ref(), &input)
            .await
            .map_err(generation_failure("generateProductDescriptionAction", DESCRIPTION_FAILED))
    }

    pub async fn create_marketing_content_action(
        &self,
        input: MarketingContentInput,
    ) -> Result<MarketingContentOutput, ActionError> {
        validated(&input)?;
        flows::marketing_content::run(self.model.as_ref(), &input)
            .await
            .map_err(generation_failure("createMarketingContentAction", MARKETING_FAILED))
    }

    pub async fn get_chatbot_assistance_action(
        &self,
        input: ChatbotInput,
    ) -> Result<ChatbotOutput, ActionError> {
        validated(&input)?;
        flows::chatbot::run(self.model.as_ref(), &input)
            .await
            .map_err(generation_failure("getChatbotAssistanceAction", CHATBOT_FAILED))
    }

    pub async fn visualize_product_in_room_action(
        &self,
        request: VisualizeRequest,
    ) -> Result<VisualizeRoomOutput, ActionError> {
        validated(&request)?;
        let product = self
            .explore_products()
            .await?
            .into_iter()
            .find(|p| p.name == request.product_name)
            .ok_or_else(|| {
                ActionError::NotFound(format!("No active product named '{}'", request.product_name))
            })?;

        let input = VisualizeRoomInput {
            product_image_uri: product.image,
            room_image_uri: request.room_image_uri,
        };
        flows::visualize_room::run(self.model.as_ref(), &input)
            .await
            .map_err(generation_failure("visualizeProductInRoomAction", VISUALIZE_FAILED))
    }

    // --- Store actions ---

    /// Stores a new product as a Draft; the store stamps its creation date.
    pub async fn save_product_action(&self, request: SaveProductRequest) -> Result<Product, ActionError> {
        let SaveProductRequest { mut product, currency } = request;
        if let Some(currency) = currency.filter(|c| !c.trim().is_empty()) {
            product.price = format_price(currency.trim(), &product.price);
        }
        validated(&product)?;

        let store = self.store.lock().await;
        let saved = store
            .add_product(product.into_product(ProductStatus::Draft, String::new()))
            .await
            .map_err(storage_failure("saveProductAction", SAVE_PRODUCT_FAILED))?;
        info!(product = %saved.name, "Product saved as draft");
        Ok(saved)
    }

    pub async fn save_profile_action(&self, profile: Profile) -> Result<Profile, ActionError> {
        validated(&profile)?;
        let store = self.store.lock().await;
        let saved = store
            .save_profile(profile)
            .await
            .map_err(storage_failure("saveProfileAction", SAVE_PROFILE_FAILED))?;
        info!(artisan = %saved.name, "Profile saved");
        Ok(saved)
    }

    pub async fn get_products(&self) -> Result<Vec<Product>, ActionError> {
        let store = self.store.lock().await;
        store
            .get_products()
            .await
            .map_err(storage_failure("getProducts", LOAD_PRODUCTS_FAILED))
    }

    pub async fn get_products_by_status(&self, status: ProductStatus) -> Result<Vec<Product>, ActionError> {
        Ok(filter_by_status(&self.get_products().await?, status))
    }

    pub async fn partition_products(&self) -> Result<StatusPartition, ActionError> {
        Ok(partition_by_status(&self.get_products().await?))
    }

    /// Products buyers can browse.
    pub async fn explore_products(&self) -> Result<Vec<Product>, ActionError> {
        self.get_products_by_status(ProductStatus::Active).await
    }

    pub async fn featured_products(&self) -> Result<Vec<Product>, ActionError> {
        let mut active = self.explore_products().await?;
        active.truncate(FEATURED_COUNT);
        Ok(active)
    }

    pub async fn get_profile(&self) -> Result<Profile, ActionError> {
        let store = self.store.lock().await;
        store
            .get_profile()
            .await
            .map_err(storage_failure("getProfile", LOAD_PROFILE_FAILED))
    }

    pub async fn inventory_summary(&self) -> Result<InventorySummary, ActionError> {
        Ok(InventorySummary::from_products(&self.get_products().await?))
    }

    pub async fn dashboard(&self, token: &str) -> Result<Dashboard, ActionError> {
        let session = self.sessions.get(token).await.filter(|s| s.logged_in);
        match session.and_then(|s| s.role) {
            Some(Role::Artisan) => Ok(Dashboard::Artisan {
                summary: self.inventory_summary().await?,
            }),
            Some(Role::Buyer) => Ok(Dashboard::Buyer {
                featured: self.featured_products().await?,
            }),
            None => Err(ActionError::Unauthorized("Please log in to view the dashboard.".to_string())),
        }
    }

    // --- Cart and checkout ---

    pub async fn cart(&self, token: &str) -> Result<CartView, ActionError> {
        self.sessions
            .with_cart(token, |cart| CartView {
                items: cart.items().to_vec(),
                count: cart.len(),
                subtotal: cart.subtotal(),
                subtotal_display: format_amount(DEFAULT_CURRENCY, cart.subtotal()),
            })
            .await
            .ok_or_else(unknown_session)
    }

    /// Adds the Active product named `name` to the cart.
    pub async fn add_to_cart(&self, token: &str, name: &str) -> Result<CartView, ActionError> {
        if self.sessions.get(token).await.is_none() {
            return Err(unknown_session());
        }
        let product = self
            .explore_products()
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ActionError::NotFound(format!("No active product named '{}'", name)))?;

        self.sessions
            .with_cart(token, |cart| cart.add(product))
            .await
            .ok_or_else(unknown_session)?;
        self.cart(token).await
    }

    pub async fn remove_from_cart(&self, token: &str, name: &str) -> Result<CartView, ActionError> {
        let removed = self
            .sessions
            .with_cart(token, |cart| cart.remove(name))
            .await
            .ok_or_else(unknown_session)?;
        if removed == 0 {
            return Err(ActionError::NotFound(format!("'{}' is not in your cart", name)));
        }
        self.cart(token).await
    }

    /// Simulated payment: validates the form, empties the cart and confirms the order.
    pub async fn checkout(&self, token: &str, form: CheckoutForm) -> Result<OrderConfirmation, ActionError> {
        validated(&form)?;

        let items = self
            .sessions
            .with_cart(token, |cart| {
                if cart.is_empty() {
                    None
                } else {
                    let subtotal = cart.subtotal();
                    Some((cart.take_items(), subtotal))
                }
            })
            .await
            .ok_or_else(unknown_session)?;
        let (items, subtotal) =
            items.ok_or_else(|| ActionError::Rejected("Your cart is empty.".to_string()))?;

        let order_id = format!("KC-{}", hex::encode_upper(rand::random::<[u8; 4]>()));
        info!(order_id = %order_id, items = items.len(), subtotal, "Simulated payment accepted");

        Ok(OrderConfirmation {
            order_id,
            items,
            subtotal,
            subtotal_display: format_amount(DEFAULT_CURRENCY, subtotal),
            card_last4: form.card_last4(),
            placed_at: Utc::now(),
        })
    }
}

fn unknown_session() -> ActionError {
    ActionError::Unauthorized("Unknown or missing session.".to_string())
}
