use super::{DeleteDrinks, DeleteResponse};
use crate::api::extract::DrinkId;
use crate::auth::Authorized;
use crate::errors::{ApiError, ErrorEnvelope};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use axum::extract::{Json, State};
use log::info;

#[utoipa::path(
    delete,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    params(("id" = i64, Path, description = "Drink id")),
    security(("bearer_auth" = ["delete:drinks"])),
    responses(
        (status = 200, description = "Id of the deleted drink", body = DeleteResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Token lacks delete:drinks", body = ErrorEnvelope),
        (status = 404, description = "No drink with this id", body = ErrorEnvelope)
    )
)]
pub(crate) async fn delete_drink_handler(
    auth: Authorized<DeleteDrinks>,
    State(state): State<AppState>,
    DrinkId(id): DrinkId,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !state.store.delete(id).await? {
        return Err(ApiError::not_found(format!("No drink of id {id}")));
    }
    info!("{} deleted drink {}", auth.claims.subject(), id);

    Ok(Json(DeleteResponse {
        success: true,
        delete: id,
    }))
}
