use crate::api::ApiError;
use crate::state::AppState;

use drinkery_core::prelude::{scopes::*, *};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use std::marker::PhantomData;
use tracing::debug;

/// A permission a route requires.
pub trait Scope: Send + Sync + 'static {
    const NAME: &'static str;
}

pub struct GetDrinksDetail;
pub struct PostDrinks;
pub struct PatchDrinks;
pub struct DeleteDrinks;

impl Scope for GetDrinksDetail {
    const NAME: &'static str = GET_DRINKS_DETAIL;
}

impl Scope for PostDrinks {
    const NAME: &'static str = POST_DRINKS;
}

impl Scope for PatchDrinks {
    const NAME: &'static str = PATCH_DRINKS;
}

impl Scope for DeleteDrinks {
    const NAME: &'static str = DELETE_DRINKS;
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingHeader("Authorization header is expected."))?
        .to_str()
        .map_err(|_| AuthError::MissingHeader("Authorization header must be bearer token."))?;

    let parts: Vec<&str> = value.split(' ').collect();
    if parts[0] != "Bearer" {
        return Err(AuthError::MissingHeader(
            "Authorization header must start with \"Bearer\".",
        ));
    }

    match parts.as_slice() {
        [_, token] if !token.is_empty() => Ok(*token),
        [_] | [_, _] => Err(AuthError::MissingHeader("Token not found.")),
        _ => Err(AuthError::MissingHeader(
            "Authorization header must be bearer token.",
        )),
    }
}

/// A request whose bearer token was verified and grants the scope `S`.
///
/// Verification failures and missing permissions reject the request before
/// the handler runs.
pub struct ScopedUser<S: Scope> {
    pub claims: Claims,
    _scope: PhantomData<S>,
}

impl<R, S> FromRequestParts<AppState<R>> for ScopedUser<S>
where
    R: DrinkeryServices,
    S: Scope,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R>,
    ) -> Result<Self, Self::Rejection> {
        let claims = match bearer_token(&parts.headers) {
            Ok(token) => state.auth().verify(token).await,
            Err(err) => Err(err),
        }
        .and_then(|claims| authorize(&claims, S::NAME).map(|_| claims))
        .inspect_err(|err| {
            debug!(
                scope = S::NAME,
                code = err.code(),
                "Rejected request: {err}"
            )
        })?;

        Ok(Self {
            claims,
            _scope: PhantomData,
        })
    }
}
