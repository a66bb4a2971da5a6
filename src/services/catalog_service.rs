use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    dto::catalog::{
        CreateServiceRequest, CreateStylistRequest, ServiceList, StylistList,
        UpdateServiceRequest, UpdateStylistRequest,
    },
    entity::{
        services::{ActiveModel as ServiceActive, Column as ServiceCol, Entity as Services, Model as ServiceModel},
        stylists::{ActiveModel as StylistActive, Column as StylistCol, Entity as Stylists, Model as StylistModel},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_employee},
    models::{Service, Stylist},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Catalog identifiers are opaque strings at the API edge; the store keys by
/// UUID. A malformed id is a caller error, not a lookup miss.
pub fn parse_catalog_id(id: &str, kind: &str) -> AppResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::Validation(format!("invalid {kind} id format")))
}

pub async fn list_services(state: &AppState) -> AppResult<ApiResponse<ServiceList>> {
    let items = Services::find()
        .order_by_asc(ServiceCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(service_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Services",
        ServiceList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_service(state: &AppState, id: &str) -> AppResult<ApiResponse<Service>> {
    let id = parse_catalog_id(id, "service")?;
    let service = Services::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Service",
        service_from_entity(service),
        None,
    ))
}

pub async fn create_service(
    state: &AppState,
    user: &AuthUser,
    payload: CreateServiceRequest,
) -> AppResult<ApiResponse<Service>> {
    ensure_employee(user)?;
    validate_service_fields(&payload.name, payload.price, payload.duration)?;

    let service = ServiceActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        price: Set(payload.price),
        duration: Set(payload.duration),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.user_id),
        "service_create",
        Some("services"),
        Some(serde_json::json!({ "service_id": service.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Service created",
        service_from_entity(service),
        Some(Meta::empty()),
    ))
}

pub async fn update_service(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateServiceRequest,
) -> AppResult<ApiResponse<Service>> {
    ensure_employee(user)?;
    let id = parse_catalog_id(id, "service")?;
    let existing = Services::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let name = payload.name.as_deref().unwrap_or(&existing.name);
    let price = payload.price.unwrap_or(existing.price);
    let duration = payload.duration.unwrap_or(existing.duration);
    validate_service_fields(name, price, duration)?;

    let mut active: ServiceActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(duration) = payload.duration {
        active.duration = Set(duration);
    }
    active.updated_at = Set(Utc::now().into());

    let service = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.user_id),
        "service_update",
        Some("services"),
        Some(serde_json::json!({ "service_id": service.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Service updated",
        service_from_entity(service),
        Some(Meta::empty()),
    ))
}

pub async fn delete_service(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_employee(user)?;
    let id = parse_catalog_id(id, "service")?;
    let result = Services::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.user_id),
        "service_delete",
        Some("services"),
        Some(serde_json::json!({ "service_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Service deleted"))
}

pub async fn list_stylists(state: &AppState) -> AppResult<ApiResponse<StylistList>> {
    let items = Stylists::find()
        .order_by_asc(StylistCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(stylist_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Stylists",
        StylistList { items },
        Some(Meta::empty()),
    ))
}

pub async fn get_stylist(state: &AppState, id: &str) -> AppResult<ApiResponse<Stylist>> {
    let id = parse_catalog_id(id, "stylist")?;
    let stylist = Stylists::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(ApiResponse::success(
        "Stylist",
        stylist_from_entity(stylist),
        None,
    ))
}

pub async fn create_stylist(
    state: &AppState,
    user: &AuthUser,
    payload: CreateStylistRequest,
) -> AppResult<ApiResponse<Stylist>> {
    ensure_employee(user)?;
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("stylist name must not be empty".into()));
    }

    let stylist = StylistActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        role: Set(payload.role),
        image: Set(payload.image.unwrap_or_default()),
        bio: Set(payload.bio),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.user_id),
        "stylist_create",
        Some("stylists"),
        Some(serde_json::json!({ "stylist_id": stylist.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Stylist created",
        stylist_from_entity(stylist),
        Some(Meta::empty()),
    ))
}

pub async fn update_stylist(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateStylistRequest,
) -> AppResult<ApiResponse<Stylist>> {
    ensure_employee(user)?;
    let id = parse_catalog_id(id, "stylist")?;
    let existing = Stylists::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if payload.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("stylist name must not be empty".into()));
    }

    let mut active: StylistActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(role) = payload.role {
        active.role = Set(role);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(bio) = payload.bio {
        active.bio = Set(bio);
    }
    active.updated_at = Set(Utc::now().into());

    let stylist = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.user_id),
        "stylist_update",
        Some("stylists"),
        Some(serde_json::json!({ "stylist_id": stylist.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Stylist updated",
        stylist_from_entity(stylist),
        Some(Meta::empty()),
    ))
}

pub async fn delete_stylist(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_employee(user)?;
    let id = parse_catalog_id(id, "stylist")?;
    let result = Stylists::delete_by_id(id).exec(&state.orm).await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.user_id),
        "stylist_delete",
        Some("stylists"),
        Some(serde_json::json!({ "stylist_id": id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::message_only("Stylist deleted"))
}

fn validate_service_fields(name: &str, price: i64, duration: i32) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("service name must not be empty".into()));
    }
    if price < 0 {
        return Err(AppError::Validation("price must be non-negative".into()));
    }
    if duration < 5 {
        return Err(AppError::Validation(
            "duration must be at least 5 minutes".into(),
        ));
    }
    Ok(())
}

pub(crate) fn service_from_entity(model: ServiceModel) -> Service {
    Service {
        id: model.id.to_string(),
        name: model.name,
        description: model.description,
        price: model.price,
        duration: model.duration,
    }
}

pub(crate) fn stylist_from_entity(model: StylistModel) -> Stylist {
    Stylist {
        id: model.id.to_string(),
        name: model.name,
        role: model.role,
        image: model.image,
        bio: model.bio,
    }
}
