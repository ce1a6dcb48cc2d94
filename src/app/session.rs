//! In-memory session flags and carts.
//!
//! This is the server-side stand-in for browser local storage: a login flag, a
//! role and a cart per client token. Nothing here is durable or authenticated;
//! every session is lost when the process exits, and idle sessions expire.

use crate::domain::commerce::Cart;
use crate::infra::config;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    Artisan,
}

#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub logged_in: bool,
    pub role: Option<Role>,
    pub cart: Cart,
}

#[derive(Debug)]
struct Entry {
    session: Session,
    last_seen: Instant,
}

/// Sessions keyed by token.
///
/// A session idle for longer than `ttl` is dropped, and when `capacity`
/// sessions exist the least recently seen one is evicted to make room.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
    capacity: usize,
}

fn new_token() -> String {
    hex::encode(rand::random::<[u8; 16]>())
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// A store using `KALA_SESSION_TTL_SECS` and `KALA_MAX_SESSIONS`.
    pub fn new() -> Self {
        Self::with_limits(config::session_ttl(), config::max_sessions())
    }

    pub fn with_limits(ttl: Duration, capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
            capacity: capacity.max(1),
        }
    }

    fn prune(&self, sessions: &mut HashMap<String, Entry>) {
        let before = sessions.len();
        sessions.retain(|_, e| e.last_seen.elapsed() <= self.ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            debug!(expired, "Expired idle sessions");
        }
    }

    /// Creates a logged-in session for `role` and returns its token.
    ///
    /// Login and registration are the same operation: no credentials are checked.
    pub async fn login(&self, role: Role) -> String {
        let token = new_token();
        let session = Session {
            logged_in: true,
            role: Some(role),
            cart: Cart::new(),
        };

        let mut sessions = self.sessions.write().await;
        self.prune(&mut sessions);
        while sessions.len() >= self.capacity {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_seen)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    sessions.remove(&k);
                    warn!("Session capacity reached; evicted least recently seen session");
                }
                None => break,
            }
        }
        sessions.insert(
            token.clone(),
            Entry {
                session,
                last_seen: Instant::now(),
            },
        );
        token
    }

    /// Looks up a live session and marks it as seen.
    fn touch<'a>(&self, sessions: &'a mut HashMap<String, Entry>, token: &str) -> Option<&'a mut Session> {
        let expired = sessions
            .get(token)
            .is_some_and(|e| e.last_seen.elapsed() > self.ttl);
        if expired {
            sessions.remove(token);
            return None;
        }
        let entry = sessions.get_mut(token)?;
        entry.last_seen = Instant::now();
        Some(&mut entry.session)
    }

    /// Clears the login flag and role. The cart survives logout.
    pub async fn logout(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        let session = self.touch(&mut sessions, token)?;
        session.logged_in = false;
        session.role = None;
        Some(session.clone())
    }

    pub async fn get(&self, token: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        self.touch(&mut sessions, token).cloned()
    }

    /// Runs `f` on the session's cart. Returns `None` for an unknown token.
    pub async fn with_cart<R>(&self, token: &str, f: impl FnOnce(&mut Cart) -> R) -> Option<R> {
        let mut sessions = self.sessions.write().await;
        self.touch(&mut sessions, token).map(|s| f(&mut s.cart))
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        self.prune(&mut sessions);
        sessions.len()
    }
}
