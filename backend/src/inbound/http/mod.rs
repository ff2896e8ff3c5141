//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod greeting;
pub mod health;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register the greeting and users routes.
///
/// The caller supplies [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use backend::inbound::http::{configure, state::HttpState};
/// use backend::outbound::memory::InMemoryUserStore;
///
/// let state = HttpState::new(Arc::new(InMemoryUserStore::new()));
/// let app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(greeting::index).service(
        web::scope("/api")
            .service(users::list_users)
            .service(users::get_user)
            .service(users::create_user)
            .service(users::update_user)
            .service(users::delete_user),
    );
}
