use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use booking_server::config::ServerConfig;
use booking_server::schedule::standard_routes;
use booking_server::store::InMemoryBookings;
use booking_server::validate::Validator;
use booking_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("booking_server=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let schedules = match standard_routes(config.default_schedule) {
        Ok(schedules) => schedules,
        Err(e) => {
            error!(error = %e, "invalid route timetable");
            std::process::exit(1);
        }
    };
    info!(
        rules = schedules.len(),
        default = %config.default_schedule,
        phone_pattern = %config.phone_pattern,
        "loaded route schedules"
    );

    let state = AppState::new(
        InMemoryBookings::new(),
        schedules,
        Validator::new(config.phone_pattern),
    );
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!("listening on http://{}", config.bind_addr);
    info!("  GET   /health                 - health check");
    info!("  POST  /login                  - validate staff login");
    info!("  GET   /routes/schedule?route= - default times for a route");
    info!("  GET   /bookings               - list bookings (q, status)");
    info!("  GET   /bookings/summary       - dashboard totals");
    info!("  POST  /bookings               - create booking");
    info!("  GET   /bookings/:id           - fetch booking");
    info!("  PATCH /bookings/:id           - edit booking");
    info!("  POST  /bookings/:id/cancel    - cancel booking");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for shutdown signal");
        }
        info!("shutting down");
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!(error = %e, "server error");
        std::process::exit(1);
    }
}
