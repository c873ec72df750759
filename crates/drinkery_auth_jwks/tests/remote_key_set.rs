//! Tests for [`RemoteKeySet`] against a local JWKS endpoint.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use drinkery_auth_jwks::{JwksAuthProvider, JwksConfig, KeySource, RemoteKeySet};
use drinkery_core::prelude::*;
use drinkery_test_fixtures::{self as fixtures, AUDIENCE, ISSUER, KEY_ID};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// The document served by the mock issuer, and how often it was fetched.
#[derive(Clone)]
struct Issuer {
    document: Arc<Mutex<Value>>,
    hits: Arc<AtomicUsize>,
}

impl Issuer {
    fn new(document: Value) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn publish(&self, document: Value) {
        *self.document.lock().unwrap() = document;
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn jwks_handler(State(issuer): State<Issuer>) -> Json<Value> {
    issuer.hits.fetch_add(1, Ordering::SeqCst);
    // Widen the window in which concurrent lookups pile up on the refresh lock.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Json(issuer.document.lock().unwrap().clone())
}

/// Starts the mock issuer on a random port and returns its base URL.
async fn start_issuer(issuer: Issuer) -> String {
    let app = Router::new()
        .route("/.well-known/jwks.json", get(jwks_handler))
        .route(
            "/broken/jwks.json",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .with_state(issuer);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn fixture_document() -> Value {
    serde_json::from_str(fixtures::JWKS_JSON).unwrap()
}

#[tokio::test]
async fn caches_the_key_set() {
    let issuer = Issuer::new(fixture_document());
    let base = start_issuer(issuer.clone()).await;
    let keys = RemoteKeySet::new(format!("{base}/.well-known/jwks.json"));

    assert!(keys.key(KEY_ID).await.unwrap().is_some());
    assert!(keys.key(KEY_ID).await.unwrap().is_some());
    assert_eq!(issuer.hits(), 1);
}

#[tokio::test]
async fn unknown_kid_triggers_refresh() {
    let issuer = Issuer::new(json!({"keys": []}));
    let base = start_issuer(issuer.clone()).await;
    let keys = RemoteKeySet::new(format!("{base}/.well-known/jwks.json"));

    assert!(keys.key(KEY_ID).await.unwrap().is_none());

    // The issuer rotates its keys.
    issuer.publish(fixture_document());

    assert!(keys.key(KEY_ID).await.unwrap().is_some());
    assert_eq!(issuer.hits(), 2);
}

#[tokio::test]
async fn expired_cache_is_refetched() {
    let issuer = Issuer::new(fixture_document());
    let base = start_issuer(issuer.clone()).await;
    let keys =
        RemoteKeySet::new(format!("{base}/.well-known/jwks.json")).with_ttl(Duration::ZERO);

    keys.key(KEY_ID).await.unwrap();
    keys.key(KEY_ID).await.unwrap();
    assert_eq!(issuer.hits(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_misses_share_one_fetch() {
    let issuer = Issuer::new(fixture_document());
    let base = start_issuer(issuer.clone()).await;
    let keys = RemoteKeySet::new(format!("{base}/.well-known/jwks.json"));

    let lookups: Vec<_> = (0..16)
        .map(|_| {
            let keys = keys.clone();
            tokio::spawn(async move { keys.key("not-published").await })
        })
        .collect();

    for lookup in lookups {
        assert!(lookup.await.unwrap().unwrap().is_none());
    }
    assert_eq!(issuer.hits(), 1);
}

#[tokio::test]
async fn failing_endpoint_is_a_system_error() {
    let issuer = Issuer::new(fixture_document());
    let base = start_issuer(issuer).await;
    let keys = RemoteKeySet::new(format!("{base}/broken/jwks.json"));

    let err = keys.key(KEY_ID).await.unwrap_err();
    assert!(matches!(err, AuthError::System(_)));
}

#[tokio::test]
async fn verifies_tokens_with_fetched_keys() {
    let issuer = Issuer::new(fixture_document());
    let base = start_issuer(issuer.clone()).await;
    let config = JwksConfig::new(ISSUER, AUDIENCE, format!("{base}/.well-known/jwks.json"));
    let auth = JwksAuthProvider::new(config.clone(), RemoteKeySet::new(config.jwks_url));

    let token = fixtures::mint(&fixtures::claims(fixtures::BARISTA));
    let claims = auth.verify(&token).await.unwrap();
    assert!(claims.has_permission("get:drinks-detail"));
    assert_eq!(issuer.hits(), 1);
}
