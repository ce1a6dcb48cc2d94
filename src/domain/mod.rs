pub mod analytics;
pub mod commerce;
pub mod model;
