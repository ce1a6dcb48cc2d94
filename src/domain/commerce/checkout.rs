//! Simulated checkout. No payment provider is contacted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{FieldChecks, FieldError, Product, Validate};

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub card_name: String,
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvc: String,
}

impl CheckoutForm {
    pub fn card_last4(&self) -> String {
        let chars: Vec<char> = self.card_number.chars().collect();
        let start = chars.len().saturating_sub(4);
        chars[start..].iter().collect()
    }
}

/// `MM/YY` with a month between 01 and 12.
fn is_valid_expiry(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 5 || b[2] != b'/' {
        return false;
    }
    if !b[..2].iter().chain(&b[3..]).all(u8::is_ascii_digit) {
        return false;
    }
    matches!((b[0], b[1]), (b'0', b'1'..=b'9') | (b'1', b'0'..=b'2'))
}

impl Validate for CheckoutForm {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        FieldChecks::new()
            .min_len("name", &self.name, 2, "Name is required")
            .min_len("address", &self.address, 5, "Address is required")
            .min_len("city", &self.city, 2, "City is required")
            .exact_len("pincode", &self.pincode, 6, "Pincode must be 6 digits")
            .min_len("cardName", &self.card_name, 2, "Name on card is required")
            .exact_len("cardNumber", &self.card_number, 16, "Card number must be 16 digits")
            .check(
                "cardExpiry",
                is_valid_expiry(&self.card_expiry),
                "Invalid expiry date (MM/YY)",
            )
            .exact_len("cardCvc", &self.card_cvc, 3, "CVC must be 3 digits")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub order_id: String,
    pub items: Vec<Product>,
    pub subtotal: f64,
    pub subtotal_display: String,
    pub card_last4: String,
    #[schema(value_type = String)]
    pub placed_at: DateTime<Utc>,
}
