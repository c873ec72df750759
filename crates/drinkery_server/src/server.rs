use crate::{api, prelude::*};
use drinkery_core::prelude::{routes::*, *};
use axum::{
    Router,
    routing::{get, patch},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// The builder for the Drinkery Server.
#[derive(Clone, Debug, Default)]
pub struct DrinkServer {
    config: DrinkServerConfig,
}

impl DrinkServer {
    pub fn new(config: DrinkServerConfig) -> Self {
        Self { config }
    }
}

#[derive(Clone, Debug)]
pub struct DrinkServerConfig {
    /// Answer cross-origin requests from any origin.
    ///
    /// Defaults to `true`.
    pub permissive_cors: bool,
}

impl Default for DrinkServerConfig {
    fn default() -> Self {
        Self {
            permissive_cors: true,
        }
    }
}

impl DrinkServer {
    pub fn build<S: DrinkeryServices>(self, services: S) -> Router {
        let DrinkServerConfig { permissive_cors } = self.config;

        let router = Router::new()
            .route(HEALTH, get(|| async { "OK" }))
            .route(DRINKS, get(api::list_drinks).post(api::create_drink))
            .route(DRINKS_DETAIL, get(api::list_drinks_detail))
            .route(
                DRINKS_BY_ID,
                patch(api::update_drink).delete(api::delete_drink),
            )
            .fallback(api::fallback)
            .method_not_allowed_fallback(api::method_not_allowed)
            .layer(TraceLayer::new_for_http())
            .with_state(AppState { services });

        if permissive_cors {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }
}
