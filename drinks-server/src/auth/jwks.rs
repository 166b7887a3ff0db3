//! Signing key lookup against the issuer's JSON Web Key Set

use super::AuthError;
use crate::config::AuthConfig;
use http::StatusCode;
use jsonwebtoken::{decode_header, Algorithm, DecodingKey};
use log::{debug, error, warn};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const JWKS_CACHE_KEY: &str = "jwks";

/// JSON Web Key Set as published by the issuer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// Find the key with the given key identifier
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|key| key.kid == kid)
    }
}

/// A single public key of the key set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// RSA modulus, base64url encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA public exponent, base64url encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

/// The key a token must be verified with
#[derive(Clone)]
pub struct ResolvedKey {
    pub kid: String,
    pub algorithm: Algorithm,
    pub decoding_key: DecodingKey,
}

impl fmt::Debug for ResolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedKey")
            .field("kid", &self.kid)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

/// Errors that can occur while setting up the key resolver
#[derive(Debug, Error)]
pub enum KeyResolverError {
    #[error("Invalid JWKS URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Failed to create JWKS client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Resolves the verification key of a token from the issuer's key set.
///
/// With a cache TTL configured the fetched key set is shared between requests
/// until it expires. Concurrent misses wait on a single fetch and a refresh
/// replaces the whole set, so readers never see a partially updated set.
/// Unknown key ids are rejected against the cached set without refetching.
#[derive(Clone)]
pub struct KeyResolver {
    client: reqwest::Client,
    jwks_url: Url,
    cache: Option<Cache<String, Arc<Jwks>>>,
}

impl KeyResolver {
    pub fn new(config: &AuthConfig) -> Result<Self, KeyResolverError> {
        let client = reqwest::Client::builder()
            .timeout(config.jwks_timeout())
            .connect_timeout(Duration::from_secs(2))
            .pool_max_idle_per_host(2)
            .build()?;

        let cache = config.jwks_cache_ttl().map(|ttl| {
            Cache::builder()
                .time_to_live(ttl)
                .max_capacity(1) // Only one entry: the issuer's key set
                .build()
        });

        Ok(Self {
            client,
            jwks_url: config.jwks_url()?,
            cache,
        })
    }

    /// Find the key matching the `kid` in the token's unverified header
    pub async fn resolve(&self, token: &str) -> Result<ResolvedKey, AuthError> {
        let header = decode_header(token).map_err(|e| {
            debug!("Failed to decode token header: {e}");
            AuthError::invalid_header(StatusCode::UNAUTHORIZED, "Authorization malformed.")
        })?;
        let kid = header.kid.ok_or_else(|| {
            debug!("Token header has no key id");
            AuthError::invalid_header(StatusCode::UNAUTHORIZED, "Authorization malformed.")
        })?;

        let jwks = self.key_set().await?;
        let no_matching_key = || {
            AuthError::invalid_header(
                StatusCode::UNAUTHORIZED,
                "Unable to find the appropriate key.",
            )
        };

        let Some(jwk) = jwks.find(&kid) else {
            warn!("No key with id '{kid}' in the issuer's key set");
            return Err(no_matching_key());
        };
        let (Some(n), Some(e)) = (jwk.n.as_deref(), jwk.e.as_deref()) else {
            warn!("Key '{kid}' has no RSA components");
            return Err(no_matching_key());
        };

        let algorithm = match jwk.alg.as_deref() {
            Some(alg) => Algorithm::from_str(alg).map_err(|_| {
                warn!("Key '{kid}' declares unsupported algorithm '{alg}'");
                no_matching_key()
            })?,
            None => header.alg,
        };
        let decoding_key = DecodingKey::from_rsa_components(n, e).map_err(|err| {
            warn!("Key '{kid}' has invalid RSA components: {err}");
            no_matching_key()
        })?;

        Ok(ResolvedKey {
            kid,
            algorithm,
            decoding_key,
        })
    }

    /// The current key set, from cache when enabled
    async fn key_set(&self) -> Result<Arc<Jwks>, AuthError> {
        match &self.cache {
            Some(cache) => cache
                .try_get_with(JWKS_CACHE_KEY.to_string(), self.fetch_jwks())
                .await
                .map_err(|err: Arc<AuthError>| (*err).clone()),
            None => self.fetch_jwks().await,
        }
    }

    async fn fetch_jwks(&self) -> Result<Arc<Jwks>, AuthError> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .client
            .get(self.jwks_url.clone())
            .send()
            .await
            .map_err(|e| {
                error!("Failed to fetch JWKS from {}: {}", self.jwks_url, e);
                AuthError::key_fetch_failed()
            })?;

        if !response.status().is_success() {
            error!(
                "JWKS request to {} failed with status: {}",
                self.jwks_url,
                response.status()
            );
            return Err(AuthError::key_fetch_failed());
        }

        let jwks: Jwks = response.json().await.map_err(|e| {
            error!("Failed to parse JWKS from {}: {}", self.jwks_url, e);
            AuthError::key_fetch_failed()
        })?;
        debug!("Fetched {} signing key(s)", jwks.keys.len());

        Ok(Arc::new(jwks))
    }
}
