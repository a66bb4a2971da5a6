use std::collections::HashSet;

use anyhow::anyhow;
use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::{
    audit::log_audit,
    booking::availability::{AvailabilityPolicy, BUSINESS_DAY_SLOTS, DayPatternPolicy},
    booking::submission::parse_slot_label,
    dto::appointments::{
        AppointmentList, CreateAppointmentRequest, SlotList, UpdateAppointmentStatusRequest,
    },
    entity::{
        appointments::{ActiveModel as AppointmentActive, Column as ApptCol, Entity as Appointments, Model as AppointmentModel},
        services::Entity as Services,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Appointment, AppointmentStatus},
    response::{ApiResponse, Meta},
    routes::params::AppointmentListQuery,
    services::catalog_service::parse_catalog_id,
    state::AppState,
};

/// Fully validated create payload. Both the REST endpoint and the in-process
/// booking gateway funnel through this.
#[derive(Debug, Clone)]
pub struct NewAppointmentRecord {
    pub client_id: Uuid,
    pub stylist_id: Uuid,
    pub service_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub notes: String,
}

pub async fn create_appointment(
    state: &AppState,
    record: NewAppointmentRecord,
) -> AppResult<Appointment> {
    // The referenced service must exist before anything is written.
    if Services::find_by_id(record.service_id)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    let appointment = AppointmentActive {
        id: Set(Uuid::new_v4()),
        client_id: Set(record.client_id),
        stylist_id: Set(record.stylist_id),
        service_id: Set(record.service_id),
        date: Set(record.date),
        time: Set(record.time),
        notes: Set(record.notes),
        status: Set(AppointmentStatus::Pending.as_str().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(record.client_id),
        "appointment_create",
        Some("appointments"),
        Some(serde_json::json!({ "appointment_id": appointment.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    appointment_from_entity(appointment)
}

pub async fn create_from_request(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAppointmentRequest,
) -> AppResult<ApiResponse<Appointment>> {
    let (client_id, stylist_id, service_id, date, time) = match (
        payload.client_id.as_deref(),
        payload.stylist_id.as_deref(),
        payload.service_id.as_deref(),
        payload.date.as_deref(),
        payload.time.as_deref(),
    ) {
        (Some(client), Some(stylist), Some(service), Some(date), Some(time)) => {
            (client, stylist, service, date, time)
        }
        _ => {
            return Err(AppError::Validation(
                "missing required appointment information".into(),
            ));
        }
    };

    let client_id = Uuid::parse_str(client_id)
        .map_err(|_| AppError::Validation("invalid client id format".into()))?;
    let stylist_id = parse_catalog_id(stylist_id, "stylist")?;
    let service_id = parse_catalog_id(service_id, "service")?;

    // Clients can only book for themselves; staff may book on a client's behalf.
    if !user.is_staff() && client_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("date must be a plain YYYY-MM-DD date".into()))?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .map_err(|_| AppError::Validation("time must be a 24-hour HH:MM:SS time".into()))?;

    let appointment = create_appointment(
        state,
        NewAppointmentRecord {
            client_id,
            stylist_id,
            service_id,
            date,
            time,
            notes: payload.notes.unwrap_or_default(),
        },
    )
    .await?;

    Ok(ApiResponse::success(
        "Appointment booked",
        appointment,
        Some(Meta::empty()),
    ))
}

pub async fn list_appointments(
    state: &AppState,
    user: &AuthUser,
    query: AppointmentListQuery,
) -> AppResult<ApiResponse<AppointmentList>> {
    let (page, limit, offset) = query.pagination.normalize();

    let mut condition = Condition::all();
    if let Some(client_id) = query.client_id {
        if !user.is_staff() && client_id != user.user_id {
            return Err(AppError::Forbidden);
        }
        condition = condition.add(ApptCol::ClientId.eq(client_id));
    } else if !user.is_staff() {
        condition = condition.add(ApptCol::ClientId.eq(user.user_id));
    }
    if let Some(stylist_id) = query.stylist_id {
        condition = condition.add(ApptCol::StylistId.eq(stylist_id));
    }
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        let status = AppointmentStatus::parse(status)
            .ok_or_else(|| AppError::Validation(format!("invalid status `{status}`")))?;
        condition = condition.add(ApptCol::Status.eq(status.as_str()));
    }

    let finder = Appointments::find()
        .filter(condition)
        .order_by_asc(ApptCol::Date)
        .order_by_asc(ApptCol::Time);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(appointment_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Appointments",
        AppointmentList { items },
        Some(Meta::new(page, limit, total)),
    ))
}

pub async fn get_appointment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Appointment>> {
    let appointment = Appointments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if !user.is_staff() && appointment.client_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    Ok(ApiResponse::success(
        "Appointment",
        appointment_from_entity(appointment)?,
        None,
    ))
}

pub async fn update_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAppointmentStatusRequest,
) -> AppResult<ApiResponse<Appointment>> {
    let next = AppointmentStatus::parse(&payload.status)
        .ok_or_else(|| AppError::Validation(format!("invalid status `{}`", payload.status)))?;

    let appointment = Appointments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    // Staff drive the normal lifecycle; a client may only cancel their own.
    if !user.is_staff() {
        if appointment.client_id != user.user_id {
            return Err(AppError::Forbidden);
        }
        if next != AppointmentStatus::Cancelled {
            return Err(AppError::Forbidden);
        }
    }

    let appointment = transition(state, user, appointment, next).await?;

    Ok(ApiResponse::success(
        "Status updated",
        appointment,
        Some(Meta::empty()),
    ))
}

/// Soft cancel: a status write, never a row removal.
pub async fn cancel_appointment(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let appointment = Appointments::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if !user.is_staff() && appointment.client_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    transition(state, user, appointment, AppointmentStatus::Cancelled).await?;

    Ok(ApiResponse::success(
        "Appointment cancelled",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    ))
}

/// Open slots for a stylist on a date: the synthetic day pattern thinned by
/// appointments already on the books (cancelled ones do not block a slot).
pub async fn list_available_slots(
    state: &AppState,
    stylist_id: Uuid,
    date: NaiveDate,
) -> AppResult<ApiResponse<SlotList>> {
    let candidates = DayPatternPolicy.available_slots(date, &BUSINESS_DAY_SLOTS);

    let booked: HashSet<NaiveTime> = Appointments::find()
        .filter(
            Condition::all()
                .add(ApptCol::StylistId.eq(stylist_id))
                .add(ApptCol::Date.eq(date))
                .add(ApptCol::Status.ne(AppointmentStatus::Cancelled.as_str())),
        )
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|appointment| appointment.time)
        .collect();

    let slots: Vec<String> = candidates
        .into_iter()
        .filter(|label| {
            parse_slot_label(label)
                .map(|time| !booked.contains(&time))
                .unwrap_or(false)
        })
        .map(str::to_string)
        .collect();

    Ok(ApiResponse::success(
        "Available slots",
        SlotList { slots },
        Some(Meta::empty()),
    ))
}

async fn transition(
    state: &AppState,
    user: &AuthUser,
    appointment: AppointmentModel,
    next: AppointmentStatus,
) -> AppResult<Appointment> {
    let current = status_of(&appointment)?;
    if !current.can_transition_to(next) {
        return Err(AppError::Validation(format!(
            "cannot change status from `{current}` to `{next}`"
        )));
    }

    let id = appointment.id;
    let mut active: AppointmentActive = appointment.into();
    active.status = Set(next.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.orm,
        Some(user.user_id),
        "appointment_status",
        Some("appointments"),
        Some(serde_json::json!({ "appointment_id": id, "status": next.as_str() })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    appointment_from_entity(updated)
}

fn status_of(model: &AppointmentModel) -> AppResult<AppointmentStatus> {
    AppointmentStatus::parse(&model.status)
        .ok_or_else(|| AppError::Internal(anyhow!("unknown status `{}` in store", model.status)))
}

fn appointment_from_entity(model: AppointmentModel) -> AppResult<Appointment> {
    let status = status_of(&model)?;
    Ok(Appointment {
        id: model.id,
        client_id: model.client_id,
        stylist_id: model.stylist_id,
        service_id: model.service_id,
        date: model.date,
        time: model.time,
        notes: model.notes,
        status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
