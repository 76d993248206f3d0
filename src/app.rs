/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config → services → Router
 * - Middleware: auth context, request id, timeout, CORS, hardening headers
 * - axum::serve() until Ctrl+C
 */
use std::{panic, process};

use anyhow::Result;
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::handlers::health::health;
use crate::config::Config;
use crate::error::{endpoint_not_found, method_not_allowed};
use crate::middleware;
use crate::services::auth::build_auth_service;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly; production: keep serving
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(?config, "starting API in {:?} mode on {}", config.app_env, config.addr);

    let state = AppState::new(build_auth_service(&config)?);
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("received Ctrl+C, shutting down");
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let routes = Router::new()
        .route("/common/health", get(health))
        .nest("/api/v1", api::v1::routes())
        .fallback(endpoint_not_found)
        .method_not_allowed_fallback(method_not_allowed);

    // every request gets an AuthCtx, public routes included
    let router = middleware::auth::access::apply(routes, state.clone()).with_state(state);

    let router = middleware::http::apply(router, config.request_timeout);
    let router = middleware::cors::apply(router, config);
    middleware::security_headers::apply(router)
}
