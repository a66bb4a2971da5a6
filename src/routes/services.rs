use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::catalog::{CreateServiceRequest, ServiceList, UpdateServiceRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Service,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route(
            "/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
}

#[utoipa::path(
    get,
    path = "/api/services",
    responses(
        (status = 200, description = "All services in store order", body = ApiResponse<ServiceList>),
    ),
    tag = "Services"
)]
pub async fn list_services(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ServiceList>>> {
    let resp = catalog_service::list_services(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/services/{id}",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service", body = ApiResponse<Service>),
        (status = 400, description = "Invalid id format"),
        (status = 404, description = "Not Found"),
    ),
    tag = "Services"
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Service>>> {
    let resp = catalog_service::get_service(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ApiResponse<Service>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
pub async fn create_service(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Service>>)> {
    let resp = catalog_service::create_service(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/services/{id}",
    params(("id" = String, Path, description = "Service ID")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service updated", body = ApiResponse<Service>),
        (status = 400, description = "Validation failed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
pub async fn update_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateServiceRequest>,
) -> AppResult<Json<ApiResponse<Service>>> {
    let resp = catalog_service::update_service(&state, &user, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Services"
)]
pub async fn delete_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = catalog_service::delete_service(&state, &user, &id).await?;
    Ok(Json(resp))
}
