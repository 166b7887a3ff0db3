use super::{DrinksResponse, PatchDrinks};
use crate::api::extract::{ApiJson, DrinkId};
use crate::auth::Authorized;
use crate::errors::{ApiError, ErrorEnvelope};
use crate::models::{validate_title, Ingredient};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use crate::store::DrinkUpdate;
use axum::extract::{Json, State};
use log::info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `PATCH /drinks/{id}`, absent fields keep their stored value
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Default)]
pub struct UpdateDrinkRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<Vec<Ingredient>>,
}

#[utoipa::path(
    patch,
    path = "/drinks/{id}",
    tag = DRINKS_TAG,
    request_body = UpdateDrinkRequest,
    params(("id" = i64, Path, description = "Drink id")),
    security(("bearer_auth" = ["patch:drinks"])),
    responses(
        (status = 200, description = "The updated drink", body = DrinksResponse),
        (status = 400, description = "Blank title or empty recipe", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Token lacks patch:drinks", body = ErrorEnvelope),
        (status = 404, description = "No drink with this id", body = ErrorEnvelope),
        (status = 422, description = "Another drink already has this title", body = ErrorEnvelope)
    )
)]
pub(crate) async fn update_drink_handler(
    auth: Authorized<PatchDrinks>,
    State(state): State<AppState>,
    DrinkId(id): DrinkId,
    ApiJson(request): ApiJson<UpdateDrinkRequest>,
) -> Result<Json<DrinksResponse>, ApiError> {
    if let Some(title) = &request.title {
        validate_title(title).map_err(ApiError::bad_request)?;
    }
    if request.recipe.as_ref().is_some_and(|recipe| recipe.is_empty()) {
        return Err(ApiError::bad_request("No recipe was given"));
    }

    let update = DrinkUpdate {
        title: request.title,
        recipe: request.recipe,
    };
    let drink = state
        .store
        .update(id, update)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No drink of id {id}")))?;
    info!("{} updated drink {}", auth.claims.subject(), drink.id);

    Ok(Json(DrinksResponse {
        success: true,
        drinks: vec![drink],
    }))
}
