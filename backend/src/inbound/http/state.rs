//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` so they depend only
//! on the store port and stay testable against mocks.

use std::sync::Arc;

use crate::domain::ports::UserStore;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use backend::inbound::http::state::HttpState;
/// use backend::outbound::memory::InMemoryUserStore;
///
/// let state = HttpState::new(Arc::new(InMemoryUserStore::new()));
/// let _users = state.users.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// User collection port.
    pub users: Arc<dyn UserStore>,
}

impl HttpState {
    /// Construct state around a user store.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}
