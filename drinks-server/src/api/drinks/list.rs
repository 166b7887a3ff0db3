use super::{DrinksResponse, GetDrinks, GetDrinksDetail, MenuResponse};
use crate::auth::Authorized;
use crate::errors::{ApiError, ErrorEnvelope};
use crate::openapi::DRINKS_TAG;
use crate::state::AppState;
use axum::extract::{Json, State};
use log::info;

const NO_DRINKS: &str = "No drinks found in database";

#[utoipa::path(
    get,
    path = "/drinks",
    tag = DRINKS_TAG,
    security(("bearer_auth" = ["get:drinks"])),
    responses(
        (status = 200, description = "The menu, ingredient names hidden", body = MenuResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Token lacks get:drinks", body = ErrorEnvelope),
        (status = 404, description = "No drinks stored", body = ErrorEnvelope)
    )
)]
pub(crate) async fn menu_handler(
    auth: Authorized<GetDrinks>,
    State(state): State<AppState>,
) -> Result<Json<MenuResponse>, ApiError> {
    info!("Menu requested by {}", auth.claims.subject());
    menu(&state).await
}

/// `GET /drinks` when the menu is public
pub(crate) async fn public_menu_handler(
    State(state): State<AppState>,
) -> Result<Json<MenuResponse>, ApiError> {
    menu(&state).await
}

async fn menu(state: &AppState) -> Result<Json<MenuResponse>, ApiError> {
    let drinks = state.store.list().await?;
    if drinks.is_empty() {
        return Err(ApiError::not_found(NO_DRINKS));
    }

    Ok(Json(MenuResponse {
        success: true,
        drinks: drinks.iter().map(|drink| drink.short()).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/drinks-detail",
    tag = DRINKS_TAG,
    security(("bearer_auth" = ["get:drinks-detail"])),
    responses(
        (status = 200, description = "All drinks with full recipes", body = DrinksResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Token lacks get:drinks-detail", body = ErrorEnvelope),
        (status = 404, description = "No drinks stored", body = ErrorEnvelope)
    )
)]
pub(crate) async fn drinks_detail_handler(
    auth: Authorized<GetDrinksDetail>,
    State(state): State<AppState>,
) -> Result<Json<DrinksResponse>, ApiError> {
    info!("Drink details requested by {}", auth.claims.subject());

    let drinks = state.store.list().await?;
    if drinks.is_empty() {
        return Err(ApiError::not_found(NO_DRINKS));
    }

    Ok(Json(DrinksResponse {
        success: true,
        drinks,
    }))
}
