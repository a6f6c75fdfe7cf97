//! seer HTTP Server
//!
//! Axum-based server for the numerology reading service: free readings from
//! a submitted form, a paid tier behind a hosted checkout redirect, and PDF
//! export of the premium reading.

mod config;
mod error;
mod handlers;
mod session;
mod state;
mod templates;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use sha2::{Digest, Sha512};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer, cookie::Key};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seer_core::CompletionProvider;
use seer_payments::{CheckoutProvider, StripeCheckout};
use seer_runtime::OpenAiProvider;

use crate::config::AppConfig;
use crate::handlers::{
    buy, download, free_result, health_check, index, premium_result, result_cancelled,
};
use crate::state::AppState;

/// Stretch the configured secret into a 64-byte cookie signing key
fn session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}

/// Build the application router with its session layer
fn router(state: AppState, signing_key: Key) -> Router {
    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_signed(signing_key);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        // GET /result is the checkout cancel target; it returns to the form
        .route("/result", post(free_result).get(result_cancelled))
        .route("/buy", post(buy))
        .route("/premium_result", get(premium_result))
        .route("/download", get(download))
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Initialize completion provider
    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiProvider::from_env()?);

    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Completion service reachable"),
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Completion service not reachable - readings will fail");
            tracing::warn!("  Check OPENAI_API_KEY and network access");
        }
    }

    // Initialize payments
    let checkout: Option<Arc<dyn CheckoutProvider>> = if config.stripe_price_id.is_some() {
        match StripeCheckout::from_env() {
            Ok(c) => Some(Arc::new(c)),
            Err(e) => {
                tracing::warn!("⚠ Stripe not configured - payments disabled: {}", e);
                None
            }
        }
    } else {
        tracing::warn!("⚠ STRIPE_PRICE_ID not set - payments disabled");
        None
    };

    if checkout.is_some() {
        tracing::info!("✓ Stripe configured");
    }

    let signing_key = session_key(&config.secret_key);
    let port = config.port;

    // Build application state
    let state = AppState {
        provider,
        checkout,
        config: Arc::new(config),
    };

    let app = router(state, signing_key);

    // Start server
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🔮 seer server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /                - Submission form");
    tracing::info!("  POST /result          - Free reading");
    tracing::info!("  POST /buy             - Stripe checkout redirect");
    tracing::info!("  GET  /premium_result  - Premium reading");
    tracing::info!("  GET  /download        - Premium reading as PDF");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
