pub(crate) mod drinks;
mod extract;
pub(crate) mod health;

use crate::state::AppState;
use axum::Router;
use log::info;

/// Combines all API routes into a single router
pub(super) fn router(state: &AppState) -> Router<AppState> {
    if state.settings.public_menu {
        info!("GET /drinks is served without authorization");
    }

    Router::new()
        .merge(health::router())
        .merge(drinks::router(state.settings.public_menu))
}
