#[derive(Clone, Debug)]
pub struct JwksConfig {
    /// Expected `iss` claim, e.g. `https://drinkery.eu.auth0.com/`.
    pub issuer: String,
    /// Expected `aud` claim, the API identifier.
    pub audience: String,
    /// Where the provider publishes its signing keys.
    pub jwks_url: String,
    /// Clock skew tolerated on `exp`, in seconds.
    ///
    /// Defaults to `0`.
    pub leeway: u64,
}

impl JwksConfig {
    pub fn new(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        jwks_url: impl Into<String>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            jwks_url: jwks_url.into(),
            leeway: 0,
        }
    }

    /// Issuer and key set URL following Auth0's conventions for `domain`.
    pub fn auth0(domain: &str, audience: impl Into<String>) -> Self {
        let domain = domain.trim_end_matches('/');
        Self::new(
            format!("https://{domain}/"),
            audience,
            format!("https://{domain}/.well-known/jwks.json"),
        )
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    pub fn with_jwks_url(mut self, jwks_url: impl Into<String>) -> Self {
        self.jwks_url = jwks_url.into();
        self
    }

    pub fn with_leeway(mut self, leeway: u64) -> Self {
        self.leeway = leeway;
        self
    }
}
