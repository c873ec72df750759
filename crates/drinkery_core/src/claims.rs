use crate::error::AuthError;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The claim set of a verified bearer token.
///
/// Only lives for the duration of a single request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject, e.g. `auth0|5f1d...` or `client-id@clients`.
    #[serde(default)]
    pub sub: String,
    /// Expiration time (seconds since epoch)
    #[serde(default)]
    pub exp: u64,
    /// Granted permissions.
    ///
    /// [`None`] when the identity provider does not include the claim, which
    /// happens when RBAC is not enabled for the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    /// Every other claim (`iss`, `aud`, `iat`, `scope`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.exp)
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    pub fn has_permission(&self, scope: &str) -> bool {
        self.permissions
            .as_deref()
            .is_some_and(|granted| granted.iter().any(|p| p == scope))
    }
}

/// Checks that `claims` grant `scope`.
pub fn authorize(claims: &Claims, scope: &str) -> Result<(), AuthError> {
    if claims.permissions.is_none() {
        return Err(AuthError::PermissionsMissing);
    }

    if !claims.has_permission(scope) {
        return Err(AuthError::Forbidden(scope.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> Claims {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn keeps_unknown_claims() {
        let c = claims(json!({
            "sub": "barista",
            "exp": 1_700_000_000,
            "iss": "https://drinkery.eu.auth0.com/",
            "permissions": ["get:drinks-detail"]
        }));
        assert_eq!(c.extra["iss"], "https://drinkery.eu.auth0.com/");
        assert_eq!(c.expires_at().unwrap().timestamp(), 1_700_000_000);
    }

    #[test]
    fn missing_permissions_is_a_bad_request() {
        let c = claims(json!({"sub": "barista", "exp": 1}));
        let err = authorize(&c, "get:drinks-detail").unwrap_err();
        assert_eq!(err, AuthError::PermissionsMissing);
        assert_eq!((err.code(), err.status()), ("invalid_claims", 400));
    }

    #[test]
    fn lacking_scope_is_forbidden() {
        let c = claims(json!({"sub": "barista", "exp": 1, "permissions": ["get:drinks-detail"]}));
        let err = authorize(&c, "delete:drinks").unwrap_err();
        assert_eq!((err.code(), err.status()), ("unauthorized", 403));
        assert!(authorize(&c, "get:drinks-detail").is_ok());
    }

    #[test]
    fn empty_permissions_grant_nothing() {
        let c = claims(json!({"exp": 1, "permissions": []}));
        assert!(matches!(
            authorize(&c, "post:drinks"),
            Err(AuthError::Forbidden(_))
        ));
    }
}
