//! # Drinkery Server
//!
//! An Axum-based implementation of the drink catalog API.
//!
//! Provides the [`DrinkServer`] builder, which ties together a drink store and an
//! authentication provider.
//!
//! ## Permissions
//!
//! `GET /drinks` is public. Every other route requires a bearer token whose
//! `permissions` claim grants:
//!
//! * **`get:drinks-detail`**: to list drinks with full recipes.
//! * **`post:drinks`**: to create drinks.
//! * **`patch:drinks`**: to edit drinks.
//! * **`delete:drinks`**: to delete drinks.
//!
//! ## Example
//!
//! ```no_run
//! use drinkery_server::prelude::*;
//! use drinkery_sqlite::SqliteDrinkStore;
//! use drinkery_auth_jwks::{JwksAuthProvider, JwksConfig, RemoteKeySet};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = SqliteDrinkStore::connect("sqlite://database.db?mode=rwc").await?;
//! let config = JwksConfig::auth0("drinkery.eu.auth0.com", "drinks");
//! let auth = JwksAuthProvider::new(config.clone(), RemoteKeySet::new(config.jwks_url));
//!
//! let app = DrinkServer::default().build(CoreServices { store, auth });
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod server;
pub mod services;
pub mod state;

pub mod prelude {
    pub use crate::api::ApiError;
    pub use crate::auth::*;
    pub use crate::server::*;
    pub use crate::services::*;
    pub use crate::state::*;
}
