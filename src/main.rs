//! C1 Validator server binary.
//!
//! Bootstraps configuration, tracing, the database pool and the adapter
//! wiring, then serves the validation endpoint.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use c1_validator::adapters::ai::{GroqAnalyzer, GroqConfig};
use c1_validator::adapters::auth::StaticTokenAuthenticator;
use c1_validator::adapters::http::middleware::AuthState;
use c1_validator::adapters::http::{api_router, ValidationHandlers};
use c1_validator::adapters::postgres::PostgresAttemptStore;
use c1_validator::adapters::xml::{LibxmlFieldExtractor, LibxmlSchemaValidator};
use c1_validator::application::{ValidateC1Handler, ValidationPipeline};
use c1_validator::config::AppConfig;
use c1_validator::ports::FailureAnalyzer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    tracing::info!(environment = ?config.server.environment, "starting c1-validator");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    let pipeline = ValidationPipeline::new(
        Arc::new(LibxmlSchemaValidator::new(config.schema.xsd_path.clone())),
        Arc::new(LibxmlFieldExtractor::new()),
    );

    let analyzer: Option<Arc<dyn FailureAnalyzer>> = match &config.ai.groq_api_key {
        Some(key) if config.ai.has_api_key() => {
            let groq_config = GroqConfig::new(key.expose_secret().clone())
                .with_model(config.ai.model.clone())
                .with_base_url(config.ai.base_url.clone())
                .with_timeout(config.ai.timeout())
                .with_max_retries(config.ai.max_retries);
            Some(Arc::new(GroqAnalyzer::new(
                groq_config,
                Some(config.schema.xsd_path.clone()),
            )))
        }
        _ => {
            tracing::warn!("no Groq API key configured, failure analysis disabled");
            None
        }
    };

    let store = Arc::new(PostgresAttemptStore::new(pool));
    let handler = Arc::new(ValidateC1Handler::new(pipeline, store, analyzer));

    let authenticator: AuthState =
        Arc::new(StaticTokenAuthenticator::new(config.auth.api_token.clone()));

    let app = api_router(ValidationHandlers::new(handler), authenticator)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
