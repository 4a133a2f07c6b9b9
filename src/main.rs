//! Email Draft Relay
//!
//! A single-endpoint HTTP service that turns a short note plus
//! tone/recipient parameters into a drafted email body by relaying a
//! synthesized prompt to an OpenRouter chat-completion endpoint.

mod api;
mod core;
mod models;

use crate::api::endpoints::{AppState, create_router};
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::core::relay::DraftRelay;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    if std::env::args().any(|arg| arg == "--help") {
        print_help();
        return;
    }

    // Pick up a local .env before reading the environment
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level);

    print_startup_banner(&config);

    // Deliberately not fatal: the upstream provider rejects the
    // unauthenticated call and the caller sees that rejection.
    if !config.api_key_configured() {
        warn!("OPENROUTER_API_KEY is not set; upstream calls will be unauthenticated");
    }

    let relay = Arc::new(DraftRelay::new(&config));

    let app_state = AppState { relay };

    let app = create_router(app_state, config.cors_allow_origin.clone());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!("🚀 Email Draft Relay v0.1.0");
    println!("✅ Configuration loaded successfully");
    println!("   Upstream: {}", config.openrouter_base_url);
    println!("   Model: {}", config.model);
    println!("   Request Timeout: {}s", config.request_timeout);
    println!(
        "   CORS Origin: {}",
        config.cors_allow_origin.to_str().unwrap_or("<non-ascii>")
    );
    println!("   Server: {}:{}", config.host, config.port);
    println!(
        "   API Key Configured: {}",
        if config.api_key_configured() {
            "Yes"
        } else {
            "No"
        }
    );
    println!();
}

/// Print help message
fn print_help() {
    println!("Email Draft Relay v0.1.0");
    println!();
    println!("Usage: email-draft-relay [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --help    Display this help message");
    println!();
    println!("Environment variables:");
    println!("  OPENROUTER_API_KEY - Bearer credential for the upstream provider");
    println!("  OPENROUTER_BASE_URL - Upstream API base URL (default: https://openrouter.ai/api/v1)");
    println!("  DRAFT_MODEL - Model identifier (default: deepseek/deepseek-chat-v3.1:free)");
    println!("  HOST - Server host (default: 0.0.0.0)");
    println!("  PORT - Server port (default: 8000)");
    println!("  LOG_LEVEL - Logging level (default: info)");
    println!("  REQUEST_TIMEOUT - Upstream timeout in seconds (default: 90)");
    println!("  CORS_ALLOW_ORIGIN - Allowed browser origin (default: http://localhost:5173)");
    println!();
    println!("Endpoints:");
    println!("  GET  /            - Liveness marker");
    println!("  POST /email-draft - {{note, tone, recipient}} -> drafted email body");
}
