use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wanderi_consultation_api::config::Config;
use wanderi_consultation_api::handlers;
use wanderi_consultation_api::mailer::MailerClient;

/// Main entry point for the application.
///
/// Initializes logging, loads configuration, builds the mail transport
/// client and the HTTP router, then serves. The server is started with
/// connect info so the per-IP rate limiter can key on the peer address.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wanderi_consultation_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize mail transport client
    let mailer = MailerClient::new(&config.resend_base_url, config.resend_api_key.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize mailer: {}", e))?;
    tracing::info!("✓ Mail transport client initialized: {}", config.resend_base_url);

    // Build application state and router
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
        mailer,
    });
    let app = handlers::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
