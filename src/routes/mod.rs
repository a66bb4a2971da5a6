use axum::Router;

use crate::state::AppState;

pub mod appointments;
pub mod auth;
pub mod doc;
pub mod health;
pub mod params;
pub mod services;
pub mod stylists;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/appointments", appointments::router())
        .nest("/services", services::router())
        .nest("/stylists", stylists::router())
        .nest("/auth", auth::router())
}
