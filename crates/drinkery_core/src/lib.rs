//! # Drinkery Core
//!
//! Types and traits for the drinkery ecosystem.
//!
//! Defines the contract shared by the server, the storage backends and the
//! token verifiers.
//!
//! - **[`Drink`](drink::Drink)**: The catalog entity and its two response projections.
//! - **[`Claims`](claims::Claims)**: The payload of a verified bearer token.
//! - **[`DrinkStore`](traits::DrinkStore)**: Trait for implementing persistence layers.
//! - **[`AuthProvider`](traits::AuthProvider)**: Trait for implementing token verification strategies.

pub mod claims;
pub mod constants;
pub mod drink;
pub mod error;
pub mod traits;

pub mod prelude {
    pub use super::claims::*;
    pub use super::constants::*;
    pub use super::drink::*;
    pub use super::error::*;
    pub use super::traits::*;
}
