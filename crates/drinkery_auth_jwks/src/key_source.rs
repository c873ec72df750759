use drinkery_core::error::AuthError;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

/// Resolves public keys by key id (`kid`).
pub trait KeySource: Send + Sync + 'static + Clone {
    /// Returns the key named `kid`, or [`None`] if the issuer does not publish it.
    fn key(&self, kid: &str) -> impl Future<Output = Result<Option<Jwk>, AuthError>> + Send;
}

/// A fixed key set.
#[derive(Clone, Debug)]
pub struct StaticKeySet {
    keys: Arc<JwkSet>,
}

impl StaticKeySet {
    pub fn new(keys: JwkSet) -> Self {
        Self {
            keys: Arc::new(keys),
        }
    }
}

impl KeySource for StaticKeySet {
    async fn key(&self, kid: &str) -> Result<Option<Jwk>, AuthError> {
        Ok(self.keys.find(kid).cloned())
    }
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
    /// Bumped on every fetch; lets waiters tell whether a refresh ran while they queued.
    generation: u64,
}

struct Inner {
    url: String,
    client: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
    refresh: Mutex<()>,
}

/// A key set fetched over HTTP and cached in process.
///
/// The cached set is refetched once its TTL elapses, or when a token names a
/// key id the cached set does not contain (key rotation). Concurrent
/// refreshes are collapsed into a single request.
#[derive(Clone)]
pub struct RemoteKeySet {
    inner: Arc<Inner>,
    ttl: Duration,
}

impl RemoteKeySet {
    /// Defaults to a TTL of 10 minutes.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(Inner {
                url: url.into(),
                client,
                cache: RwLock::new(None),
                refresh: Mutex::new(()),
            }),
            ttl: Duration::from_secs(600),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    async fn fetch(&self) -> Result<JwkSet, AuthError> {
        let url = &self.inner.url;
        let keys = self
            .inner
            .client
            .get(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| AuthError::System(format!("Failed to fetch JWKS from {url}: {e}")))?
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::System(format!("Invalid JWKS document at {url}: {e}")))?;

        info!("Fetched {} signing keys from {url}", keys.keys.len());
        Ok(keys)
    }
}

impl KeySource for RemoteKeySet {
    async fn key(&self, kid: &str) -> Result<Option<Jwk>, AuthError> {
        let seen = {
            let cache = self.inner.cache.read().await;
            match cache.as_ref() {
                Some(cached) => {
                    if cached.fetched_at.elapsed() < self.ttl {
                        if let Some(jwk) = cached.keys.find(kid) {
                            return Ok(Some(jwk.clone()));
                        }
                        warn!(kid, "Unknown key id, refreshing JWKS");
                    }
                    cached.generation
                }
                None => 0,
            }
        };

        let _refresh = self.inner.refresh.lock().await;

        {
            let cache = self.inner.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.generation != seen {
                    return Ok(cached.keys.find(kid).cloned());
                }
            }
        }

        let keys = self.fetch().await?;
        let found = keys.find(kid).cloned();

        *self.inner.cache.write().await = Some(CachedKeys {
            keys,
            fetched_at: Instant::now(),
            generation: seen + 1,
        });

        Ok(found)
    }
}
