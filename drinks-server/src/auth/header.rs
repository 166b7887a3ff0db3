use super::AuthError;
use http::header::AUTHORIZATION;
use http::{HeaderMap, StatusCode};

const BEARER_SCHEME: &str = "Bearer";

/// Extract the raw token from an `Authorization: Bearer <token>` header.
///
/// The scheme is case-sensitive and the header must split on single spaces
/// into exactly two parts.
pub fn get_token_auth_header(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            AuthError::invalid_header(
                StatusCode::UNAUTHORIZED,
                "Authorization header is expected.",
            )
        })?;

    let parts: Vec<&str> = auth.split(' ').collect();
    if parts[0] != BEARER_SCHEME {
        return Err(AuthError::invalid_header(
            StatusCode::UNAUTHORIZED,
            "Authorization header must start with \"Bearer\".",
        ));
    }

    match parts.as_slice() {
        [_, token] => Ok(*token),
        [_] => Err(AuthError::invalid_header(
            StatusCode::UNAUTHORIZED,
            "Token not found.",
        )),
        _ => Err(AuthError::invalid_header(
            StatusCode::UNAUTHORIZED,
            "Authorization header must be bearer token.",
        )),
    }
}
