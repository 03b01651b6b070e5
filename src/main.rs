//! Appraisal Flow server binary.

use std::sync::Arc;

use axum::http::HeaderValue;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use appraisal_flow::adapters::auth::identity_provider_from;
use appraisal_flow::adapters::{
    api_router, AppState, InMemoryAppraisalRepository, InMemoryCycleRepository,
    PostgresAppraisalRepository, PostgresCycleRepository,
};
use appraisal_flow::application::AppraisalWorkflow;
use appraisal_flow::config::{AppConfig, ConfigError, DatabaseConfig, ServerConfig, ValidationError};
use appraisal_flow::ports::{AppraisalRepository, CycleRepository};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Database unavailable: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

type Repositories = (Arc<dyn AppraisalRepository>, Arc<dyn CycleRepository>);

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!(error = %e, "appraisal-flow failed to start");
        eprintln!("appraisal-flow: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let (appraisals, cycles) = match &config.database {
        Some(database) => postgres_repositories(database).await?,
        None => {
            tracing::warn!("no database configured, using in-memory storage");
            let cycles = Arc::new(InMemoryCycleRepository::new());
            (
                Arc::new(InMemoryAppraisalRepository::linked(Arc::clone(&cycles)))
                    as Arc<dyn AppraisalRepository>,
                cycles as Arc<dyn CycleRepository>,
            )
        }
    };

    let policy = config.workflow.policy();
    let workflow = Arc::new(AppraisalWorkflow::new(appraisals, cycles, policy));
    let identity = identity_provider_from(&config.auth)?;

    let app = api_router(AppState::new(workflow, identity))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        require_full_weight = policy.require_full_weight,
        "appraisal-flow listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("appraisal-flow stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn postgres_repositories(database: &DatabaseConfig) -> Result<Repositories, StartupError> {
    let pool = PgPoolOptions::new()
        .min_connections(database.min_connections)
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .idle_timeout(database.idle_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    tracing::info!(
        max_connections = database.max_connections,
        "connected to PostgreSQL"
    );
    Ok((
        Arc::new(PostgresAppraisalRepository::new(pool.clone())),
        Arc::new(PostgresCycleRepository::new(pool)),
    ))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
