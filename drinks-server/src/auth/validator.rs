use super::jwks::ResolvedKey;
use super::AuthError;
use crate::config::AuthConfig;
use chrono::{DateTime, Utc};
use http::StatusCode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, Validation};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The `aud` claim, which issuers send either as a string or as a list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

/// Claims of a verified access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Issuer
    pub iss: String,
    /// Subject (user id at the issuer)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Audience
    pub aud: Audience,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Authorized party (client id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azp: Option<String>,
    /// Space separated OAuth scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Permissions granted through the issuer's role based access control
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<BTreeSet<String>>,
}

impl Claims {
    /// The subject, or a placeholder for logging when the issuer sent none
    pub fn subject(&self) -> &str {
        self.sub.as_deref().unwrap_or("<unknown>")
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Verifies token signatures and the standard claims
#[derive(Debug, Clone)]
pub struct TokenValidator {
    audience: String,
    issuer: String,
    algorithms: Vec<Algorithm>,
    leeway: u64,
}

impl TokenValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            audience: config.audience.clone(),
            issuer: config.issuer(),
            algorithms: config.get_algorithms(),
            leeway: config.leeway,
        }
    }

    /// Verify `token` with `key` and return its claims
    pub fn validate(&self, token: &str, key: &ResolvedKey) -> Result<Claims, AuthError> {
        if !self.algorithms.contains(&key.algorithm) {
            debug!(
                "Key '{}' uses algorithm {:?} which is not accepted",
                key.kid, key.algorithm
            );
            return Err(unparsable_token());
        }

        let mut validation = Validation::new(key.algorithm);
        validation.set_audience(&[&self.audience]);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = self.leeway;

        let token_data = decode::<Claims>(token, &key.decoding_key, &validation).map_err(|e| {
            debug!("Token validation failed: {e}");
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::token_expired(),
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => incorrect_claims(),
                ErrorKind::MissingRequiredClaim(claim) if claim == "aud" || claim == "iss" => {
                    incorrect_claims()
                }
                _ => unparsable_token(),
            }
        })?;

        Ok(token_data.claims)
    }
}

fn incorrect_claims() -> AuthError {
    AuthError::invalid_claims(
        StatusCode::UNAUTHORIZED,
        "Incorrect claims. Please, check the audience and issuer.",
    )
}

fn unparsable_token() -> AuthError {
    AuthError::invalid_header(
        StatusCode::BAD_REQUEST,
        "Unable to parse authentication token.",
    )
}
