//! Cart, price and simulated checkout logic.

pub mod cart;
pub mod checkout;
pub mod price;

pub use cart::Cart;
pub use checkout::{CheckoutForm, OrderConfirmation};
pub use price::{format_amount, format_price, parse_price, DEFAULT_CURRENCY};
