pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use crate::auth::Permission;
use crate::models::{Drink, ShortDrink};
use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Read the public menu
pub struct GetDrinks;
impl Permission for GetDrinks {
    const NAME: &'static str = "get:drinks";
}

/// Read drinks including ingredient names
pub struct GetDrinksDetail;
impl Permission for GetDrinksDetail {
    const NAME: &'static str = "get:drinks-detail";
}

pub struct PostDrinks;
impl Permission for PostDrinks {
    const NAME: &'static str = "post:drinks";
}

pub struct PatchDrinks;
impl Permission for PatchDrinks {
    const NAME: &'static str = "patch:drinks";
}

pub struct DeleteDrinks;
impl Permission for DeleteDrinks {
    const NAME: &'static str = "delete:drinks";
}

/// The menu in its short representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuResponse {
    pub success: bool,
    pub drinks: Vec<ShortDrink>,
}

/// Drinks in their long representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinksResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

/// A single drink in its long representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DrinkResponse {
    pub success: bool,
    pub drink: Drink,
}

/// Id of a deleted drink
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
    pub delete: i64,
}

/// Drink routes; with `public_menu` the short menu is served without a token
pub(super) fn router(public_menu: bool) -> Router<AppState> {
    let menu = if public_menu {
        get(list::public_menu_handler)
    } else {
        get(list::menu_handler)
    };

    Router::new()
        .route("/drinks", menu.post(create::create_drink_handler))
        .route("/drinks-detail", get(list::drinks_detail_handler))
        .route(
            "/drinks/{id}",
            axum::routing::patch(update::update_drink_handler)
                .delete(delete::delete_drink_handler),
        )
}
