//! Keys, claim sets and token minting helpers for drinkery's tests.
//!
//! The RSA keys under `src/keys` were generated once for testing only.
//! `jwks.json` publishes the public half of `signing_key.pem` under
//! [`KEY_ID`]; `rogue_key.pem` is deliberately absent from it.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde_json::{Value, json};

pub const ISSUER: &str = "https://drinkery.test/";
pub const AUDIENCE: &str = "drinks";
pub const KEY_ID: &str = "drinkery-test-key";
pub const SUBJECT: &str = "auth0|barista-001";

pub const SIGNING_KEY_PEM: &str = include_str!("keys/signing_key.pem");
pub const PUBLIC_KEY_PEM: &str = include_str!("keys/signing_key.pub.pem");
pub const ROGUE_KEY_PEM: &str = include_str!("keys/rogue_key.pem");
pub const JWKS_JSON: &str = include_str!("keys/jwks.json");

pub const BARISTA: &[&str] = &["get:drinks-detail"];
pub const MANAGER: &[&str] = &[
    "get:drinks-detail",
    "post:drinks",
    "patch:drinks",
    "delete:drinks",
];

pub fn key_set() -> JwkSet {
    serde_json::from_str(JWKS_JSON).expect("fixture JWKS is valid")
}

pub fn now() -> i64 {
    Utc::now().timestamp()
}

/// A valid claim set expiring in one hour.
pub fn claims(permissions: &[&str]) -> Value {
    json!({
        "iss": ISSUER,
        "sub": SUBJECT,
        "aud": [AUDIENCE, "https://drinkery.test/userinfo"],
        "iat": now(),
        "exp": now() + 3600,
        "scope": "openid profile email",
        "permissions": permissions,
    })
}

/// Signs `claims` with the published test key.
pub fn mint(claims: &Value) -> String {
    mint_with(Algorithm::RS256, Some(KEY_ID), SIGNING_KEY_PEM, claims)
}

pub fn mint_with(alg: Algorithm, kid: Option<&str>, pem: &str, claims: &Value) -> String {
    let mut header = Header::new(alg);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("fixture key is valid PEM");
    encode(&header, claims, &key).expect("token encodes")
}

/// The classic algorithm confusion token: HS256 keyed with the RSA public key.
pub fn hs256_with_public_key(claims: &Value) -> String {
    let mut header = Header::new(Algorithm::HS256);
    header.kid = Some(KEY_ID.to_string());
    let key = EncodingKey::from_secret(PUBLIC_KEY_PEM.as_bytes());
    encode(&header, claims, &key).expect("token encodes")
}

/// A token declaring `"alg": "none"` with an empty signature segment.
pub fn unsigned(claims: &Value) -> String {
    let header = json!({"alg": "none", "typ": "JWT", "kid": KEY_ID});
    format!(
        "{}.{}.",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

/// Replaces the payload of a signed token while keeping its signature.
pub fn tamper(token: &str, claims: &Value) -> String {
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let mut parts: Vec<&str> = token.split('.').collect();
    parts[1] = &payload;
    parts.join(".")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
