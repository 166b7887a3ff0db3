//! Token issuer configuration

use confique::Config;
use jsonwebtoken::Algorithm;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Configuration for validating bearer tokens issued by the identity provider
#[derive(Debug, Config, Clone)]
pub struct AuthConfig {
    /// Issuer domain, e.g. `my-tenant.us.auth0.com`.
    /// A value with an explicit `http://` or `https://` scheme is used verbatim.
    #[config(env = "DRINKS_AUTH_DOMAIN")]
    pub domain: String,

    /// API audience identifier the tokens must be issued for
    #[config(env = "DRINKS_AUTH_AUDIENCE")]
    pub audience: String,

    /// Comma-separated list of accepted signing algorithms (default: RS256)
    #[config(env = "DRINKS_AUTH_ALGORITHMS", default = "RS256")]
    pub algorithms: String,

    /// Clock skew leeway applied to `exp` in seconds (default: 0)
    #[config(env = "DRINKS_AUTH_LEEWAY", default = 0)]
    pub leeway: u64,

    /// Timeout for fetching the JSON Web Key Set in seconds (default: 5)
    #[config(env = "DRINKS_AUTH_JWKS_TIMEOUT", default = 5)]
    pub jwks_timeout: u64,

    /// How long a fetched key set is reused in seconds, 0 disables caching (default: 600)
    #[config(env = "DRINKS_AUTH_JWKS_CACHE_TTL", default = 600)]
    pub jwks_cache_ttl: u64,
}

impl AuthConfig {
    /// Base URL of the issuer, without trailing slash
    pub fn base_url(&self) -> String {
        let domain = self.domain.trim().trim_end_matches('/');
        if domain.starts_with("http://") || domain.starts_with("https://") {
            domain.to_string()
        } else {
            format!("https://{domain}")
        }
    }

    /// The exact `iss` claim value expected in tokens
    pub fn issuer(&self) -> String {
        format!("{}/", self.base_url())
    }

    /// Location of the issuer's JSON Web Key Set
    pub fn jwks_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.issuer())?.join(".well-known/jwks.json")
    }

    /// Accepted signing algorithms; unknown names are skipped
    pub fn get_algorithms(&self) -> Vec<Algorithm> {
        self.algorithms
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match Algorithm::from_str(s) {
                Ok(alg) => Some(alg),
                Err(_) => {
                    log::warn!("ignoring unknown signing algorithm '{s}'");
                    None
                }
            })
            .collect()
    }

    pub fn jwks_timeout(&self) -> Duration {
        Duration::from_secs(self.jwks_timeout)
    }

    /// Key set cache lifetime, `None` when caching is disabled
    pub fn jwks_cache_ttl(&self) -> Option<Duration> {
        (self.jwks_cache_ttl > 0).then(|| Duration::from_secs(self.jwks_cache_ttl))
    }
}
