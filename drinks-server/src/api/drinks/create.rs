use super::{DrinkResponse, PostDrinks};
use crate::api::extract::ApiJson;
use crate::auth::Authorized;
use crate::errors::{ApiError, ErrorEnvelope};
use crate::models::{validate_title, Ingredient};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use crate::store::NewDrink;
use axum::extract::{Json, State};
use log::info;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `POST /drinks`
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct CreateDrinkRequest {
    /// Unique title of the new drink
    #[serde(default)]
    pub title: Option<String>,
    /// At least one ingredient
    #[serde(default)]
    pub recipe: Option<Vec<Ingredient>>,
}

#[utoipa::path(
    post,
    path = "/drinks",
    tag = DRINKS_TAG,
    request_body = CreateDrinkRequest,
    security(("bearer_auth" = ["post:drinks"])),
    responses(
        (status = 200, description = "Drink created", body = DrinkResponse),
        (status = 400, description = "Missing title or empty recipe", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Token lacks post:drinks", body = ErrorEnvelope),
        (status = 422, description = "A drink with this title already exists", body = ErrorEnvelope)
    )
)]
pub(crate) async fn create_drink_handler(
    auth: Authorized<PostDrinks>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDrinkRequest>,
) -> Result<Json<DrinkResponse>, ApiError> {
    let title = request
        .title
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("No title was given to new drink"))?;
    validate_title(&title).map_err(ApiError::bad_request)?;

    let recipe = request
        .recipe
        .filter(|recipe| !recipe.is_empty())
        .ok_or_else(|| ApiError::bad_request("No recipe was given"))?;

    let drink = state.store.insert(NewDrink { title, recipe }).await?;
    info!(
        "{} added drink {} '{}'",
        auth.claims.subject(),
        drink.id,
        drink.title
    );

    Ok(Json(DrinkResponse {
        success: true,
        drink,
    }))
}
