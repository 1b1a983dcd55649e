//! Public storefront binary.
//!
//! Serves the customer-facing bakery site on port 3000: catalog, cart,
//! checkout, accounts, and the blog. All durable data lives behind the
//! bakery REST backend; the session carries the cart, the current user,
//! and the notification slot.
//!
//! The management surface of the backend is deliberately out of reach
//! here; only the admin binary talks to it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use sentry::integrations::tracing as sentry_tracing;
use tower_http::services::ServeDir;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use miga_storefront::config::StorefrontConfig;
use miga_storefront::middleware;
use miga_storefront::routes;
use miga_storefront::state::AppState;

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("configuration");

    // Sentry comes up first so the tracing layer below can feed it. The
    // guard flushes pending events on drop at the end of main.
    let _sentry = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                environment: config.sentry_environment.clone().map(Into::into),
                sample_rate: config.sentry_sample_rate,
                traces_sample_rate: config.sentry_traces_sample_rate,
                attach_stacktrace: true,
                ..Default::default()
            },
        ))
    });

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,miga_storefront=debug,tower_http=debug".into());
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
    tracing::info!(%addr, "miga storefront up");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");
}

/// Assemble the router: application routes, health probes, static assets,
/// and the middleware stack. The Sentry layers sit outermost so every
/// request is covered.
fn build_app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
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

/// Readiness probe: 503 until the bakery backend answers.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.backend().health().await {
        Ok(()) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
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
