//! Bearer token authorization.
//!
//! A request passes through four steps before a protected handler runs:
//! the token is taken from the `Authorization` header ([`header`]), the
//! issuer's signing key is looked up by the token's `kid` ([`jwks`]), the
//! signature and standard claims are verified ([`validator`]) and finally the
//! route's permission is checked against the `permissions` claim
//! ([`permissions`]). [`gate`] composes the steps and binds them to handlers.

pub mod gate;
pub mod header;
pub mod jwks;
pub mod permissions;
pub mod validator;

pub use gate::{AuthGate, Authorized, Permission};
pub use validator::Claims;

use crate::errors::ErrorEnvelope;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Machine readable reason of an authorization failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    InvalidHeader,
    InvalidClaims,
    TokenExpired,
    Unauthorized,
    KeyFetchFailed,
}

impl AuthErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidHeader => "invalid_header",
            Self::InvalidClaims => "invalid_claims",
            Self::TokenExpired => "token_expired",
            Self::Unauthorized => "unauthorized",
            Self::KeyFetchFailed => "key_fetch_failed",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authorization failure, carrying the status code it is reported with
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub status_code: StatusCode,
    pub code: AuthErrorCode,
    pub description: String,
}

impl AuthError {
    pub fn new<S: ToString>(status_code: StatusCode, code: AuthErrorCode, description: S) -> Self {
        Self {
            status_code,
            code,
            description: description.to_string(),
        }
    }

    pub fn invalid_header<S: ToString>(status_code: StatusCode, description: S) -> Self {
        Self::new(status_code, AuthErrorCode::InvalidHeader, description)
    }

    pub fn invalid_claims<S: ToString>(status_code: StatusCode, description: S) -> Self {
        Self::new(status_code, AuthErrorCode::InvalidClaims, description)
    }

    pub fn token_expired() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            AuthErrorCode::TokenExpired,
            "Token expired.",
        )
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            AuthErrorCode::Unauthorized,
            "Permission not found.",
        )
    }

    pub fn key_fetch_failed() -> Self {
        Self::new(
            StatusCode::BAD_GATEWAY,
            AuthErrorCode::KeyFetchFailed,
            "Unable to fetch signing keys.",
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ErrorEnvelope::new(self.status_code, self.description).into_response_with(self.status_code)
    }
}
