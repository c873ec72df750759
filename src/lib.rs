//! # Drinkery
//!
//! A small drink catalog REST API. Anyone may browse the menu; baristas see
//! full recipes; managers edit the catalog. Who is who is decided by an
//! external identity provider issuing RS256 bearer tokens.
//!
//! This crate serves as an entry point, re-exporting the core types and
//! optionally including the server, storage and token verification
//! implementations via feature flags.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | **`server`** | Includes the Axum-based server implementation (`drinkery_server`). |
//! | **`sqlite`** | Drink store backed by SQLite (`drinkery_sqlite`). |
//! | **`jwks`** | Token verification against a published JSON Web Key Set (`drinkery_auth_jwks`). |
//!
//! ## Example: Custom Server
//!
//! ```toml
//! [dependencies]
//! drinkery = { version = "0.1", features = ["server", "sqlite", "jwks"] }
//! ```
//!
//! ```rust,ignore
//! use drinkery::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = SqliteDrinkStore::connect("sqlite://database.db?mode=rwc").await?;
//!     store.ensure_schema().await?;
//!
//!     let config = JwksConfig::auth0("drinkery.eu.auth0.com", "drinks");
//!     let auth = JwksAuthProvider::new(config.clone(), RemoteKeySet::new(config.jwks_url));
//!
//!     // Build
//!     let app = DrinkServer::default().build(CoreServices { store, auth });
//!
//!     // Serve
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub use drinkery_core::*;

#[cfg(feature = "server")]
pub mod server {
    pub use drinkery_server::*;
}

#[cfg(feature = "sqlite")]
pub mod sqlite {
    pub use drinkery_sqlite::*;
}

#[cfg(feature = "jwks")]
pub mod auth_jwks {
    pub use drinkery_auth_jwks::*;
}

pub mod prelude {
    pub use drinkery_core::prelude::*;

    #[cfg(feature = "server")]
    pub use drinkery_server::prelude::*;

    #[cfg(feature = "sqlite")]
    pub use drinkery_sqlite::SqliteDrinkStore;

    #[cfg(feature = "jwks")]
    pub use drinkery_auth_jwks::{JwksAuthProvider, JwksConfig, RemoteKeySet, StaticKeySet};
}
