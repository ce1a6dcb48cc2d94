pub mod actions;
pub mod session;

pub use actions::{ActionError, ActionService};
pub use session::{Role, Session, SessionStore};
