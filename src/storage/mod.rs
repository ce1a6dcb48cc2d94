pub mod json_store;
pub mod seed;

pub use json_store::{Document, JsonStore, StoreError};
