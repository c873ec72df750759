//! # Drinkery JWKS Auth
//!
//! An [`AuthProvider`](drinkery_core::traits::AuthProvider) that verifies RSA-signed bearer
//! tokens issued by an external identity provider (e.g. Auth0).
//!
//! The public keys are resolved by key id through a [`KeySource`]:
//!
//! * **[`RemoteKeySet`]**: fetches the provider's `/.well-known/jwks.json` and caches it,
//!   refreshing when a token names an unknown key.
//! * **[`StaticKeySet`]**: a fixed key set, for tests and offline setups.
//!
//! ## Usage
//!
//! ```no_run
//! use drinkery_auth_jwks::{JwksAuthProvider, JwksConfig, RemoteKeySet};
//!
//! let config = JwksConfig::auth0("drinkery.eu.auth0.com", "drinks");
//! let keys = RemoteKeySet::new(config.jwks_url.clone());
//! let auth = JwksAuthProvider::new(config, keys);
//! ```

mod config;
mod key_source;
mod verifier;

pub use config::JwksConfig;
pub use key_source::{KeySource, RemoteKeySet, StaticKeySet};
pub use verifier::{JwksAuthProvider, RSA_ALGORITHMS};
