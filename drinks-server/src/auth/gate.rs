use super::header::get_token_auth_header;
use super::jwks::{KeyResolver, KeyResolverError};
use super::permissions::check_permissions;
use super::validator::{Claims, TokenValidator};
use super::AuthError;
use crate::config::AuthConfig;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use http::request::Parts;
use http::HeaderMap;
use log::{debug, warn};
use std::marker::PhantomData;

/// A permission a route requires, declared as a marker type
pub trait Permission: Send + Sync + 'static {
    /// The exact permission string expected in the `permissions` claim
    const NAME: &'static str;
}

/// Authorizes requests against the issuer's keys
#[derive(Clone)]
pub struct AuthGate {
    keys: KeyResolver,
    validator: TokenValidator,
}

impl AuthGate {
    pub fn new(config: &AuthConfig) -> Result<Self, KeyResolverError> {
        Ok(Self {
            keys: KeyResolver::new(config)?,
            validator: TokenValidator::new(config),
        })
    }

    /// Authorize a request carrying `headers` for `permission`.
    ///
    /// Runs header extraction, key lookup, token validation and the permission
    /// check in order and returns the first failure unchanged.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        permission: &str,
    ) -> Result<Claims, AuthError> {
        let result = self.verify(headers, permission).await;
        match &result {
            Ok(claims) => debug!(
                "Granted '{}' to {} until {:?}",
                permission,
                claims.subject(),
                claims.expires_at()
            ),
            Err(e) => warn!(
                "Denied '{}' ({}): {}",
                permission, e.code, e.description
            ),
        }
        result
    }

    async fn verify(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let token = get_token_auth_header(headers)?;
        let key = self.keys.resolve(token).await?;
        let claims = self.validator.validate(token, &key)?;
        check_permissions(&claims, permission)?;
        Ok(claims)
    }
}

/// Extractor guarding a handler with the permission `P`.
///
/// The request is rejected with an [`AuthError`] before the handler runs
/// unless it carries a valid token granting `P`. On success the verified
/// claims are handed to the handler.
#[derive(Debug, Clone)]
pub struct Authorized<P> {
    pub claims: Claims,
    _permission: PhantomData<P>,
}

impl<P: Permission> Authorized<P> {
    pub fn new(claims: Claims) -> Self {
        Self {
            claims,
            _permission: PhantomData,
        }
    }
}

impl<P: Permission> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = state.auth.authorize(&parts.headers, P::NAME).await?;
        Ok(Self::new(claims))
    }
}
