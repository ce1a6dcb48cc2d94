//! Domain records persisted in the JSON document and the form validation contract.

use serde::Serialize;
use utoipa::ToSchema;

pub mod product;
pub mod profile;

pub use product::{filter_by_status, partition_by_status, NewProduct, Product, ProductStatus, StatusPartition};
pub use profile::Profile;

/// A single failed form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Trait implemented by every form payload accepted by an action.
///
/// Implementations report every failing field at once so the caller can show
/// them together, the way the form layer does on the client.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// Collects field errors for a form.
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: Vec<FieldError>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires at least `min` characters (not bytes).
    pub fn min_len(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        if value.chars().count() < min {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn exact_len(&mut self, field: &str, value: &str, len: usize, message: &str) -> &mut Self {
        if value.chars().count() != len {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn not_blank(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn check(&mut self, field: &str, ok: bool, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}
