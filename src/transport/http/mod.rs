pub mod router;
pub mod types;
pub mod handlers {
    pub mod ai;
    pub mod cart;
    pub mod common;
    pub mod dashboard;
    pub mod health;
    pub mod products;
    pub mod profile;
    pub mod session;
}

pub use router::{create_router, ApiDoc};
pub use types::AppState;
