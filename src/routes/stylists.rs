use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::catalog::{CreateStylistRequest, StylistList, UpdateStylistRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Stylist,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stylists).post(create_stylist))
        .route(
            "/{id}",
            get(get_stylist).put(update_stylist).delete(delete_stylist),
        )
}

#[utoipa::path(
    get,
    path = "/api/stylists",
    responses(
        (status = 200, description = "All stylists in store order", body = ApiResponse<StylistList>),
    ),
    tag = "Stylists"
)]
pub async fn list_stylists(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<StylistList>>> {
    let resp = catalog_service::list_stylists(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/stylists/{id}",
    params(("id" = String, Path, description = "Stylist ID")),
    responses(
        (status = 200, description = "Stylist", body = ApiResponse<Stylist>),
        (status = 400, description = "Invalid id format"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Stylists"
)]
pub async fn get_stylist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Stylist>>> {
    let resp = catalog_service::get_stylist(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/stylists",
    request_body = CreateStylistRequest,
    responses(
        (status = 201, description = "Stylist created", body = ApiResponse<Stylist>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stylists"
)]
pub async fn create_stylist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateStylistRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Stylist>>)> {
    let resp = catalog_service::create_stylist(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/stylists/{id}",
    params(("id" = String, Path, description = "Stylist ID")),
    request_body = UpdateStylistRequest,
    responses(
        (status = 200, description = "Stylist updated", body = ApiResponse<Stylist>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stylists"
)]
pub async fn update_stylist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStylistRequest>,
) -> AppResult<Json<ApiResponse<Stylist>>> {
    let resp = catalog_service::update_stylist(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/stylists/{id}",
    params(("id" = String, Path, description = "Stylist ID")),
    responses(
        (status = 200, description = "Stylist deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Stylists"
)]
pub async fn delete_stylist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_stylist(&state, &user, &id).await?;
    Ok(Json(resp))
}
