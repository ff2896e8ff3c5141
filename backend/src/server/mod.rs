//! Server construction and middleware wiring.

mod config;

pub use config::ServerSettings;

use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use backend::Trace;
use backend::domain::ports::UserStore;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::configure;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    app
}

/// Bind the HTTP server around `store`.
///
/// Marks `health_state` ready once the listener is bound and logs the startup
/// message. The returned [`Server`] must be awaited to serve requests.
/// Actix's own signal handling is disabled; pair the server with
/// [`drain_on_signal`] so liveness fails before the workers stop.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
    store: Arc<dyn UserStore>,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(HttpState::new(store));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .disable_signals()
        .bind(settings.bind_addr())?
        .run();

    health_state.mark_ready();
    info!(addr = %settings.bind_addr(), "Server running on port {}...", settings.port);
    Ok(server)
}

/// Fail liveness probes, then stop the server gracefully.
pub async fn drain(health_state: &HealthState, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining connections");
    handle.stop(true).await;
}

/// Wait for SIGINT or SIGTERM, then [`drain`] the server.
pub async fn drain_on_signal(health_state: web::Data<HealthState>, handle: ServerHandle) {
    shutdown_signal().await;
    drain(&health_state, handle).await;
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(error) => {
            warn!(%error, "SIGTERM handler unavailable; waiting for Ctrl-C only");
            ctrl_c().await;
            return;
        }
    };
    tokio::select! {
        () = ctrl_c() => {}
        _ = terminate.recv() => info!("received SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl-C"),
        Err(error) => {
            warn!(%error, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use backend::outbound::memory::InMemoryUserStore;
    use rstest::{fixture, rstest};
    use std::net::{IpAddr, Ipv4Addr};

    #[fixture]
    fn health_state() -> web::Data<HealthState> {
        web::Data::new(HealthState::new())
    }

    #[fixture]
    fn store() -> Arc<dyn UserStore> {
        Arc::new(InMemoryUserStore::seeded().expect("seed users are valid"))
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_marks_ready(
        health_state: web::Data<HealthState>,
        store: Arc<dyn UserStore>,
    ) {
        assert!(!health_state.is_ready(), "state should start unready");
        let settings = ServerSettings {
            port: 0,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let _server =
            create_server(health_state.clone(), &settings, store).expect("server should bind");

        assert!(health_state.is_ready(), "server creation should mark readiness");
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_users_and_probes(
        health_state: web::Data<HealthState>,
        store: Arc<dyn UserStore>,
    ) {
        health_state.mark_ready();
        let http_state = web::Data::new(HttpState::new(store));
        let app = test::init_service(build_app(health_state, http_state)).await;

        for uri in ["/", "/api/users", "/api/users/1", "/health/ready", "/health/live"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let res = test::call_service(&app, req).await;
            assert_eq!(res.status(), StatusCode::OK, "GET {uri}");
            assert!(res.headers().contains_key("trace-id"), "GET {uri} trace header");
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn drain_fails_liveness_and_stops_server(
        health_state: web::Data<HealthState>,
        store: Arc<dyn UserStore>,
    ) {
        let settings = ServerSettings {
            port: 0,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let server =
            create_server(health_state.clone(), &settings, store).expect("server should bind");
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain(&health_state, handle).await;

        assert!(!health_state.is_alive(), "drain should fail liveness");
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
