//! # Drinkery
//!
//! Serves the drink catalog API over SQLite, verifying bearer tokens against
//! an Auth0 tenant's published signing keys.
//!
//! ```sh
//! AUTH0_DOMAIN=drinkery.eu.auth0.com API_AUDIENCE=drinks drinkery --reset-db
//! ```

use anyhow::Context;
use clap::Parser;
use drinkery_auth_jwks::{JwksAuthProvider, JwksConfig, RemoteKeySet};
use drinkery_server::prelude::*;
use drinkery_sqlite::SqliteDrinkStore;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "drinkery", version, about = "Drink catalog API server")]
struct Cli {
    /// SQLite connection string.
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://database.db?mode=rwc")]
    database_url: String,

    /// Auth0 tenant issuing the tokens, e.g. `drinkery.eu.auth0.com`.
    #[arg(long, env = "AUTH0_DOMAIN")]
    auth0_domain: String,

    /// API identifier expected in the `aud` claim.
    #[arg(long, env = "API_AUDIENCE")]
    api_audience: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// Seconds before the signing keys are fetched again.
    #[arg(long, env = "JWKS_CACHE_TTL", default_value_t = 600)]
    jwks_cache_ttl: u64,

    /// Drop all drinks and seed the catalog before serving.
    #[arg(long)]
    reset_db: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Store
    let store = SqliteDrinkStore::connect(&cli.database_url)
        .await
        .with_context(|| format!("Failed to open {}", cli.database_url))?;
    store.ensure_schema().await?;
    if cli.reset_db {
        store.reset().await?;
    }

    // Auth
    let config = JwksConfig::auth0(&cli.auth0_domain, cli.api_audience);
    let keys = RemoteKeySet::new(config.jwks_url.clone())
        .with_ttl(Duration::from_secs(cli.jwks_cache_ttl));
    info!(issuer = %config.issuer, audience = %config.audience, "Verifying tokens");
    let auth = JwksAuthProvider::new(config, keys);

    // Build
    let app = DrinkServer::default().build(CoreServices { store, auth });

    // Serve
    let addr = format!("0.0.0.0:{}", cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {err}");
            }
        })
        .await?;

    Ok(())
}
