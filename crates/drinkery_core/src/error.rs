use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// No drink with the given id exists.
    /// Maps to **HTTP 404 Not Found**.
    #[error("Drink {0} not found")]
    NotFound(i64),

    /// A drink with the same title already exists.
    /// Maps to **HTTP 422 Unprocessable Entity**.
    #[error("A drink titled '{0}' already exists")]
    Conflict(String),

    /// The input is missing a required field or carries an invalid value.
    /// Maps to **HTTP 422 Unprocessable Entity**.
    #[error("Invalid drink: {0}")]
    Validation(String),

    /// Generic database or driver failure.
    /// Maps to **HTTP 422 Unprocessable Entity** on mutations, **HTTP 404** on listings.
    #[error("Storage system failure: {0}")]
    Backend(String),
}

/// Failure to authenticate or authorize a request.
///
/// Every variant carries a machine readable [`code`](AuthError::code) and an
/// HTTP [`status`](AuthError::status); the `Display` output is the human
/// readable description sent to the client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The `Authorization` header is absent or not a `Bearer` credential.
    /// Maps to **HTTP 401**.
    #[error("{0}")]
    MissingHeader(&'static str),

    /// The token cannot be parsed, names no known key, or declares an unsupported algorithm.
    /// Maps to **HTTP 400 Bad Request**.
    #[error("{0}")]
    InvalidHeader(&'static str),

    /// The signature does not match the key named by the token.
    /// Maps to **HTTP 401**.
    #[error("Token signature could not be verified.")]
    InvalidSignature,

    /// The token is authentic but its `exp` lies in the past.
    /// Maps to **HTTP 401**.
    #[error("Token expired.")]
    TokenExpired,

    /// Audience, issuer or another required claim does not check out.
    /// Maps to **HTTP 401**.
    #[error("Incorrect claims. Please, check the audience and issuer.")]
    InvalidClaims,

    /// The token has no `permissions` claim at all.
    /// Maps to **HTTP 400 Bad Request**.
    #[error("Permissions not included in JWT.")]
    PermissionsMissing,

    /// The token is valid but lacks the required permission.
    /// Maps to **HTTP 403 Forbidden**.
    #[error("Permission not found.")]
    Forbidden(String),

    /// The key set could not be fetched or parsed.
    /// Maps to **HTTP 500 Internal Server Error**.
    #[error("Auth system failure: {0}")]
    System(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader(_) => "missing_header",
            AuthError::InvalidHeader(_) | AuthError::InvalidSignature => "invalid_header",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims | AuthError::PermissionsMissing => "invalid_claims",
            AuthError::Forbidden(_) => "unauthorized",
            AuthError::System(_) => "internal_error",
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            AuthError::InvalidHeader(_) | AuthError::PermissionsMissing => 400,
            AuthError::MissingHeader(_)
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::InvalidClaims => 401,
            AuthError::Forbidden(_) => 403,
            AuthError::System(_) => 500,
        }
    }
}
