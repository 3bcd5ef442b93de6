use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use api::{
    AppState, build_schema,
    config::AppConfig,
    routes, seed,
};
use common::{
    database::{DatabaseConfig, health_check, init_pool},
    error::DatabaseError,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = AppConfig::load()?;
    info!("Starting API service in {:?} environment", config.environment);

    let state = if config.uses_in_memory_store() {
        info!("Using in-memory store");
        AppState::in_memory()
    } else {
        let db_config = DatabaseConfig::from_env()?;
        let pool = init_pool(&db_config).await?;

        if health_check(&pool).await? {
            info!("Database connection successful");
        } else {
            anyhow::bail!("Failed to connect to database");
        }

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(DatabaseError::from)?;
        info!("Database migrations applied");

        AppState::postgres(pool)
    };

    if config.seeds_store() {
        seed::initialize(&state).await?;
    }

    let app = routes::create_router(build_schema(state), config.exposes_explorer());

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
