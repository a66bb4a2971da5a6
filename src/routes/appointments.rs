use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use uuid::Uuid;

use crate::{
    dto::appointments::{
        AppointmentList, CreateAppointmentRequest, SlotList, UpdateAppointmentStatusRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Appointment,
    response::ApiResponse,
    routes::params::{AppointmentListQuery, AvailabilityQuery},
    services::appointment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_appointments).post(create_appointment))
        .route("/availability", get(list_availability))
        .route("/{id}", get(get_appointment).delete(cancel_appointment))
        .route("/{id}/status", put(update_status))
}

#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 201, description = "Appointment booked", body = ApiResponse<Appointment>),
        (status = 400, description = "Missing fields or invalid id/date/time format"),
        (status = 403, description = "Client booking on another client's behalf"),
        (status = 404, description = "Service not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Appointment>>)> {
    let resp = appointment_service::create_from_request(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/appointments",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("client_id" = Option<Uuid>, Query, description = "Filter by client"),
        ("stylist_id" = Option<Uuid>, Query, description = "Filter by stylist"),
        ("status" = Option<String>, Query, description = "Filter by status"),
    ),
    responses(
        (status = 200, description = "Appointments sorted by date then time", body = ApiResponse<AppointmentList>),
        (status = 400, description = "Invalid status filter"),
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AppointmentListQuery>,
) -> AppResult<Json<ApiResponse<AppointmentList>>> {
    let resp = appointment_service::list_appointments(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/appointments/availability",
    params(
        ("stylist_id" = Uuid, Query, description = "Stylist to check"),
        ("date" = String, Query, description = "Calendar date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Bookable slots for the stylist and date", body = ApiResponse<SlotList>),
    ),
    tag = "Appointments"
)]
pub async fn list_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<ApiResponse<SlotList>>> {
    let resp =
        appointment_service::list_available_slots(&state, query.stylist_id, query.date).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment", body = ApiResponse<Appointment>),
        (status = 403, description = "Not the caller's appointment"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::get_appointment(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/appointments/{id}/status",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    request_body = UpdateAppointmentStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<Appointment>),
        (status = 400, description = "Invalid status or transition"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> AppResult<Json<ApiResponse<Appointment>>> {
    let resp = appointment_service::update_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(("id" = Uuid, Path, description = "Appointment ID")),
    responses(
        (status = 200, description = "Appointment cancelled (soft, status write only)"),
        (status = 400, description = "Already cancelled or completed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Appointments"
)]
pub async fn cancel_appointment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = appointment_service::cancel_appointment(&state, &user, id).await?;
    Ok(Json(resp))
}
