use crate::api::drinks::create::CreateDrinkRequest;
use crate::api::drinks::update::UpdateDrinkRequest;
use crate::api::drinks::{DeleteResponse, DrinkResponse, DrinksResponse, MenuResponse};
use crate::api::health::Health;
use crate::errors::ErrorEnvelope;
use crate::models::{Drink, Ingredient, ShortDrink, ShortIngredient};
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const DRINKS_TAG: &str = "Drinks API";

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::health::health_check,
        crate::api::health::ready_check,
        crate::api::drinks::list::menu_handler,
        crate::api::drinks::list::drinks_detail_handler,
        crate::api::drinks::create::create_drink_handler,
        crate::api::drinks::update::update_drink_handler,
        crate::api::drinks::delete::delete_drink_handler,
    ),
    components(schemas(
        Health,
        ErrorEnvelope,
        Ingredient,
        Drink,
        ShortIngredient,
        ShortDrink,
        MenuResponse,
        DrinksResponse,
        DrinkResponse,
        DeleteResponse,
        CreateDrinkRequest,
        UpdateDrinkRequest,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = DRINKS_TAG, description = "Drink menu endpoints"),
    ),
    info(
        title = "Drinks API",
        description = "Drink menu service guarded by bearer tokens",
        version = "1.0.0"
    )
)]
pub(crate) struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by the protected routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Creates a router serving the OpenAPI document
pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/openapi.json",
        get(|| async { Json(ApiDoc::openapi()) }),
    )
}
