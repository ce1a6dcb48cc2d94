pub mod app;
pub mod domain;
pub mod flows;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{ActionError, ActionService, Role, SessionStore};
pub use domain::model::{NewProduct, Product, ProductStatus, Profile};
pub use infra::genai::{GeminiClient, GenerativeModel};
pub use storage::JsonStore;
