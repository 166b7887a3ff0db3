use super::validator::Claims;
use super::AuthError;
use http::StatusCode;

/// Check that `claims` grant `permission`
pub fn check_permissions(claims: &Claims, permission: &str) -> Result<(), AuthError> {
    let permissions = claims.permissions.as_ref().ok_or_else(|| {
        AuthError::invalid_claims(StatusCode::BAD_REQUEST, "Permissions not included in JWT.")
    })?;

    if !permissions.contains(permission) {
        return Err(AuthError::unauthorized());
    }
    Ok(())
}
