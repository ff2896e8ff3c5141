//! Backend entry-point: parses settings, initialises logging, seeds the user
//! store and runs the HTTP server until SIGINT or SIGTERM drains it.

mod server;

use std::sync::Arc;

use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::memory::InMemoryUserStore;
use server::{ServerSettings, create_server, drain_on_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::parse();
    let store = InMemoryUserStore::seeded()
        .map_err(|e| std::io::Error::other(format!("invalid seed users: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &settings, Arc::new(store))?;
    actix_web::rt::spawn(drain_on_signal(health_state, server.handle()));
    server.await
}
