use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use web::{
    AppState,
    config::{DEFAULT_SESSION_SECRET, WebConfig},
    graphql_client::HttpGraphQlClient,
    routes,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting web service");

    let config = WebConfig::load()?;
    if config.session.secret == DEFAULT_SESSION_SECRET {
        warn!("Using the built-in session secret; set WEB__SESSION__SECRET outside development");
    }

    let client = HttpGraphQlClient::new(&config.graphql)?;
    info!("GraphQL API endpoint: {}", config.graphql.endpoint);

    let state = AppState::new(Arc::new(client), &config.session);
    let app = routes::create_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Web service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
