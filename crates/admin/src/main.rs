//! Back-office binary.
//!
//! Serves the internal administration panel on port 3001: dashboard,
//! product CRUD, order management, and customer administration. Access is
//! gated to users whose backend role is `admin`.
//!
//! This is the only binary that reaches the backend's management
//! endpoints. Deploy it on an internal network; it is not meant to be
//! publicly routable.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::routing::get;
use sentry::integrations::tracing as sentry_tracing;
use tower_http::services::ServeDir;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use miga_admin::config::AdminConfig;
use miga_admin::middleware;
use miga_admin::routes;
use miga_admin::state::AppState;

#[tokio::main]
async fn main() {
    let config = AdminConfig::from_env().expect("configuration");

    // Sentry before tracing, so the layer below has a hub to report into.
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: config.sentry_environment.clone().map(Into::into),
                attach_stacktrace: true,
                ..Default::default()
            },
        ))
    });

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,miga_admin=debug,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(events_to_sentry))
        .init();

    let state = AppState::new(config.clone());
    let app = build_app(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener");
    tracing::info!(%addr, "miga admin panel up");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");
}

fn build_app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/admin/static"))
        .layer(session_layer)
        .with_state(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Route WARN/ERROR tracing events to Sentry, keep INFO/DEBUG as breadcrumbs.
fn events_to_sentry(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    use sentry_tracing::EventFilter;

    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => EventFilter::Breadcrumb,
        _ => EventFilter::Ignore,
    }
}

/// Liveness probe: the process is running. Checks nothing else.
async fn health() -> &'static str {
    "ok"
}

/// Resolves on Ctrl+C or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    #[cfg(unix)]
    let sigterm = async {
        let mut signal =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("SIGTERM handler");
        signal.recv().await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        result = tokio::signal::ctrl_c() => result.expect("Ctrl+C handler"),
        () = sigterm => {}
    }

    tracing::info!("shutdown signal received, draining");
}
