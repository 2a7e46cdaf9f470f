use barista_api::auth::{KeySet, TokenVerifier};
use barista_api::config::AppConfig;
use barista_api::database;
use barista_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting Barista API in {:?} mode", config.environment);

    let pool = database::manager::connect(&config.database).await?;
    let keys = KeySet::load(config.auth.jwks.clone()).await?;
    let verifier = TokenVerifier::new(&config.auth, keys);

    let bind_addr = format!("{}:{}", config.server.bind, config.server.port);
    let state = AppState::new(config, pool, verifier);
    let app = barista_api::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Barista API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
