use crate::prelude::*;

use drinkery_core::prelude::*;
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error, info};

/// The single translation layer from failures to HTTP responses.
///
/// Every response carries `{"success": false, "error": <status>, "message": <string>}`.
/// Store and parsing failures collapse into `404` or `422`; the underlying
/// cause is logged, never sent to the client.
pub enum ApiError {
    /// Propagated with its own status and description.
    Auth(AuthError),
    /// **HTTP 404**, whatever the cause.
    NotFound(anyhow::Error),
    /// **HTTP 422**, whatever the cause.
    Unprocessable(anyhow::Error),
    /// **HTTP 405**, the path exists but not for this method.
    MethodNotAllowed(anyhow::Error),
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        if let Some(auth) = err.downcast_ref::<AuthError>() {
            return Self::Auth(auth.clone());
        }

        match err.downcast_ref::<StoreError>() {
            Some(StoreError::NotFound(_)) => Self::NotFound(err),
            _ => Self::Unprocessable(err),
        }
    }
}

impl ApiError {
    /// Reports any failure as `404`, e.g. for listings.
    pub fn not_found(err: impl Into<anyhow::Error>) -> Self {
        Self::NotFound(err.into())
    }
}

/// Backend faults are worth an `error!`; bad input and missing rows are not.
fn log_cause(status: StatusCode, err: &anyhow::Error) {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::Backend(_)) => error!("Storage failure answered with {status}: {err:#}"),
        _ => debug!("Request failed with {status}: {err:#}"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Auth(AuthError::System(reason)) => {
                error!("Internal Auth Provider Error: {reason}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::Auth(err) => (
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::UNAUTHORIZED),
                err.to_string(),
            ),
            ApiError::NotFound(err) => {
                log_cause(StatusCode::NOT_FOUND, &err);
                (StatusCode::NOT_FOUND, "resource not found".to_string())
            }
            ApiError::Unprocessable(err) => {
                log_cause(StatusCode::UNPROCESSABLE_ENTITY, &err);
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable".to_string())
            }
            ApiError::MethodNotAllowed(err) => {
                log_cause(StatusCode::METHOD_NOT_ALLOWED, &err);
                (
                    StatusCode::METHOD_NOT_ALLOWED,
                    "method not allowed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// GET /drinks
///
/// Public, exposes only [`Drink::short`].
pub async fn list_drinks<S: DrinkeryServices>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
    let drinks = state
        .store()
        .list_all()
        .await
        .map_err(ApiError::not_found)?;

    let drinks: Vec<ShortDrink> = drinks.iter().map(Drink::short).collect();
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// GET /drinks-detail
pub async fn list_drinks_detail<S: DrinkeryServices>(
    State(state): State<AppState<S>>,
    _: ScopedUser<GetDrinksDetail>,
) -> Result<impl IntoResponse, ApiError> {
    let drinks = state
        .store()
        .list_all()
        .await
        .map_err(ApiError::not_found)?;

    let drinks: Vec<LongDrink> = drinks.iter().map(Drink::long).collect();
    Ok(Json(json!({ "success": true, "drinks": drinks })))
}

/// POST /drinks
pub async fn create_drink<S: DrinkeryServices>(
    State(state): State<AppState<S>>,
    ScopedUser { claims, .. }: ScopedUser<PostDrinks>,
    payload: Result<Json<DrinkInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let drink = state.store().create(input).await?;

    info!(sub = %claims.sub, id = drink.id, "Drink created");
    Ok(Json(json!({ "success": true, "drinks": drink.long() })))
}

/// PATCH /drinks/{id}
///
/// A blank `title` is rejected with `422` rather than ignored.
pub async fn update_drink<S: DrinkeryServices>(
    State(state): State<AppState<S>>,
    ScopedUser { claims, .. }: ScopedUser<PatchDrinks>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DrinkInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(ApiError::not_found)?;

    if state.store().get(id).await?.is_none() {
        return Err(StoreError::NotFound(id).into());
    }

    let Json(input) = payload?;
    let drink = state.store().update(id, input).await?;

    info!(sub = %claims.sub, id, "Drink updated");
    Ok(Json(json!({ "success": true, "drinks": [drink.long()] })))
}

/// DELETE /drinks/{id}
pub async fn delete_drink<S: DrinkeryServices>(
    State(state): State<AppState<S>>,
    ScopedUser { claims, .. }: ScopedUser<DeleteDrinks>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = id.map_err(ApiError::not_found)?;
    let id = state.store().delete(id).await?;

    info!(sub = %claims.sub, id, "Drink deleted");
    Ok(Json(json!({ "success": true, "delete": id })))
}

/// Unknown routes answer with the same body as a missing resource.
pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::not_found(anyhow::anyhow!("No route for {uri}"))
}

/// Known paths hit with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(anyhow::anyhow!("No {method} handler for {uri}"))
}
