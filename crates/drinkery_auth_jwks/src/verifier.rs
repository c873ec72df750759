use crate::{JwksConfig, KeySource};

use drinkery_core::prelude::*;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::AlgorithmParameters;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};

/// The only signature algorithms accepted. Anything else, `none` and HMAC
/// included, is rejected before a key is looked up.
pub const RSA_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
];

const UNPARSABLE: &str = "Unable to parse authentication token.";
const NO_MATCHING_KEY: &str = "Unable to find the appropriate key.";

/// Verifies bearer tokens against the keys published by the configured issuer.
#[derive(Clone)]
pub struct JwksAuthProvider<K: KeySource> {
    config: JwksConfig,
    keys: K,
}

impl<K: KeySource> JwksAuthProvider<K> {
    pub fn new(config: JwksConfig, keys: K) -> Self {
        Self { config, keys }
    }

    pub fn config(&self) -> &JwksConfig {
        &self.config
    }

    fn validation(&self, alg: Algorithm) -> Validation {
        let mut validation = Validation::new(alg);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);
        validation.leeway = self.config.leeway;
        validation
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAudience
        | ErrorKind::InvalidIssuer
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
        _ => AuthError::InvalidHeader(UNPARSABLE),
    }
}

impl<K: KeySource> AuthProvider for JwksAuthProvider<K> {
    async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        if token.split('.').count() != 3 {
            return Err(AuthError::InvalidHeader(UNPARSABLE));
        }

        let header = decode_header(token).map_err(|_| AuthError::InvalidHeader(UNPARSABLE))?;
        let kid = header
            .kid
            .as_deref()
            .ok_or(AuthError::InvalidHeader("Authorization malformed."))?;

        if !RSA_ALGORITHMS.contains(&header.alg) {
            return Err(AuthError::InvalidHeader("Unsupported signing algorithm."));
        }

        let jwk = self
            .keys
            .key(kid)
            .await?
            .ok_or(AuthError::InvalidHeader(NO_MATCHING_KEY))?;

        if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
            return Err(AuthError::InvalidHeader(NO_MATCHING_KEY));
        }

        let key = DecodingKey::from_jwk(&jwk).map_err(|_| AuthError::InvalidHeader(NO_MATCHING_KEY))?;

        decode::<Claims>(token, &key, &self.validation(header.alg))
            .map(|data| data.claims)
            .map_err(classify)
    }
}
