use chrono::NaiveDate;
use salon_booking_api::{
    booking::{CatalogProvider, SubmissionGateway},
    db::{create_orm_conn, run_migrations},
    dto::appointments::{CreateAppointmentRequest, UpdateAppointmentStatusRequest},
    dto::catalog::{CreateServiceRequest, CreateStylistRequest},
    entity::users::ActiveModel as UserActive,
    error::AppError,
    middleware::auth::AuthUser,
    models::AppointmentStatus,
    routes::params::AppointmentListQuery,
    services::{appointment_service, catalog_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Set, Statement};
use uuid::Uuid;

// Integration flow: employee publishes the catalog, a client books through
// the REST service layer and through the in-process booking core, staff walk
// the status lifecycle, and availability reflects what is on the books.
#[tokio::test]
async fn booking_and_lifecycle_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let client_id = create_user(&state, "client", "client@example.com").await?;
    let employee_id = create_user(&state, "employee", "employee@example.com").await?;

    let auth_client = AuthUser {
        user_id: client_id,
        role: "client".into(),
    };
    let auth_employee = AuthUser {
        user_id: employee_id,
        role: "employee".into(),
    };

    // Employee publishes the catalog.
    let service = catalog_service::create_service(
        &state,
        &auth_employee,
        CreateServiceRequest {
            name: "Haircut & Style".into(),
            description: "Precision cut and styling".into(),
            price: 85,
            duration: 60,
        },
    )
    .await?
    .data
    .unwrap();

    let stylist = catalog_service::create_stylist(
        &state,
        &auth_employee,
        CreateStylistRequest {
            name: "Alex Morgan".into(),
            role: "Master Stylist".into(),
            image: None,
            bio: "Ten years of precision cuts".into(),
        },
    )
    .await?
    .data
    .unwrap();

    // Catalog validation failures are 400-class, not 500.
    let invalid = catalog_service::create_service(
        &state,
        &auth_employee,
        CreateServiceRequest {
            name: "Express Trim".into(),
            description: String::new(),
            price: 30,
            duration: 2,
        },
    )
    .await;
    assert!(matches!(invalid, Err(AppError::Validation(_))));

    // A request with a missing field is rejected before any write.
    let incomplete = appointment_service::create_from_request(
        &state,
        &auth_client,
        CreateAppointmentRequest {
            client_id: Some(client_id.to_string()),
            service_id: Some(service.id.clone()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(incomplete, Err(AppError::Validation(_))));

    // Client books two appointments, later date first.
    let later = appointment_service::create_from_request(
        &state,
        &auth_client,
        CreateAppointmentRequest {
            client_id: Some(client_id.to_string()),
            stylist_id: Some(stylist.id.clone()),
            service_id: Some(service.id.clone()),
            date: Some("2024-06-17".into()),
            time: Some("10:30:00".into()),
            notes: None,
        },
    )
    .await?
    .data
    .unwrap();

    let earlier = appointment_service::create_from_request(
        &state,
        &auth_client,
        CreateAppointmentRequest {
            client_id: Some(client_id.to_string()),
            stylist_id: Some(stylist.id.clone()),
            service_id: Some(service.id.clone()),
            date: Some("2024-06-15".into()),
            time: Some("14:00:00".into()),
            notes: Some("first visit".into()),
        },
    )
    .await?
    .data
    .unwrap();

    assert_eq!(earlier.status, AppointmentStatus::Pending);
    assert_eq!(earlier.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    assert_eq!(earlier.time.to_string(), "14:00:00");

    // Listing is sorted by date then time ascending.
    let listed = appointment_service::list_appointments(
        &state,
        &auth_client,
        AppointmentListQuery::default(),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(listed.items.len(), 2);
    assert_eq!(listed.items[0].id, earlier.id);
    assert_eq!(listed.items[1].id, later.id);

    // The booked Saturday slot disappears from availability.
    let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let stylist_uuid = Uuid::parse_str(&stylist.id)?;
    let open = appointment_service::list_available_slots(&state, stylist_uuid, saturday)
        .await?
        .data
        .unwrap();
    assert!(!open.slots.contains(&"2:00 PM".to_string()));
    assert!(open.slots.contains(&"2:30 PM".to_string()));

    // Staff walk the lifecycle: pending -> confirmed -> completed.
    let confirmed = appointment_service::update_status(
        &state,
        &auth_employee,
        earlier.id,
        UpdateAppointmentStatusRequest {
            status: "confirmed".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    // Skipping ahead is not a legal transition.
    let illegal = appointment_service::update_status(
        &state,
        &auth_employee,
        later.id,
        UpdateAppointmentStatusRequest {
            status: "completed".into(),
        },
    )
    .await;
    assert!(matches!(illegal, Err(AppError::Validation(_))));

    let completed = appointment_service::update_status(
        &state,
        &auth_employee,
        earlier.id,
        UpdateAppointmentStatusRequest {
            status: "completed".into(),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    // Client self-cancels the pending appointment; the row survives.
    appointment_service::cancel_appointment(&state, &auth_client, later.id).await?;
    let cancelled = appointment_service::get_appointment(&state, &auth_client, later.id)
        .await?
        .data
        .unwrap();
    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);

    // Cancellation is absorbing.
    let out_of_cancelled = appointment_service::update_status(
        &state,
        &auth_employee,
        later.id,
        UpdateAppointmentStatusRequest {
            status: "confirmed".into(),
        },
    )
    .await;
    assert!(matches!(out_of_cancelled, Err(AppError::Validation(_))));

    // The in-process booking core runs against the same store.
    let provider = CatalogProvider::new(state.clone());
    let services = provider.services().await;
    assert!(!services.is_fallback());
    let stylists = provider.stylists().await;
    assert!(!stylists.is_fallback());

    let mut session = salon_booking_api::booking::BookingSession::new();
    session.replace_catalog(services.into_inner(), stylists.into_inner());
    let chosen_service = session.services()[0].clone();
    let chosen_stylist = session.stylists()[0].clone();
    session.set_service(chosen_service);
    session.set_stylist(chosen_stylist);
    session.set_date(NaiveDate::from_ymd_opt(2024, 6, 22).unwrap());
    session.set_time("2:30 PM");

    let gateway = SubmissionGateway::new(state.clone());
    let identity = auth_client.identity();
    let created_id = session.submit(&gateway, Some(&identity)).await?;
    let created_id = Uuid::parse_str(&created_id)?;

    let persisted = appointment_service::get_appointment(&state, &auth_client, created_id)
        .await?
        .data
        .unwrap();
    assert_eq!(persisted.status, AppointmentStatus::Pending);
    assert_eq!(persisted.time.to_string(), "14:30:00");

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE appointments, audit_logs, services, stylists, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { orm })
}

async fn create_user(state: &AppState, role: &str, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        first_name: Set(String::new()),
        last_name: Set(String::new()),
        role: Set(role.into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(user.id)
}
