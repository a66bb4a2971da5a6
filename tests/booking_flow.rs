use std::sync::Mutex;

use chrono::NaiveDate;
use salon_booking_api::booking::{
    AppointmentStore, AvailabilityPolicy, BUSINESS_DAY_SLOTS, BookingSession, BookingStep,
    CatalogProvider, CatalogSource, ClientInfoUpdate, DayPatternPolicy, Identity, NewAppointment,
    StoreError, SubmissionError, SubmissionGateway,
};
use salon_booking_api::models::{Service, Stylist};

/// In-memory record store standing in for the backend.
#[derive(Default)]
struct MemoryStore {
    appointments: Mutex<Vec<NewAppointment>>,
    fail_writes: bool,
}

impl AppointmentStore for &MemoryStore {
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<String, StoreError> {
        if self.fail_writes {
            return Err(StoreError("record store unavailable".into()));
        }
        let mut appointments = self.appointments.lock().unwrap();
        appointments.push(appointment);
        Ok(format!("appt-{}", appointments.len()))
    }
}

/// Catalog source that always fails, forcing the provider onto its defaults.
struct UnreachableCatalog;

impl CatalogSource for UnreachableCatalog {
    async fn load_services(&self) -> Result<Vec<Service>, StoreError> {
        Err(StoreError("record store unavailable".into()))
    }

    async fn load_stylists(&self) -> Result<Vec<Stylist>, StoreError> {
        Err(StoreError("record store unavailable".into()))
    }
}

fn identity() -> Identity {
    Identity {
        user_id: "5d9f3c61-5c7f-4f6a-9a8a-07cf9a5a01c2".into(),
        role: "client".into(),
    }
}

// Full walk through the five steps against an in-memory store, ending with
// the canonical Saturday scenario: 2024-06-15 at "2:00 PM" persists as
// date=2024-06-15, time=14:00:00, status=pending.
#[tokio::test]
async fn complete_booking_flow_end_to_end() {
    let provider = CatalogProvider::new(UnreachableCatalog);
    let services = provider.services().await;
    let stylists = provider.stylists().await;
    assert!(services.is_fallback());
    assert!(stylists.is_fallback());

    let mut session = BookingSession::new();
    session.replace_catalog(services.into_inner(), stylists.into_inner());

    // Step 1: service
    assert_eq!(session.current_step(), BookingStep::SelectService);
    let service = session.services()[0].clone();
    session.set_service(service);
    session.next_step();

    // Step 2: stylist
    assert_eq!(session.current_step(), BookingStep::SelectStylist);
    let stylist = session.stylists()[0].clone();
    session.set_stylist(stylist);
    session.next_step();

    // Step 3: date and time, slot taken from the availability calculator
    assert_eq!(session.current_step(), BookingStep::SelectDateTime);
    let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let open = DayPatternPolicy.available_slots(saturday, &BUSINESS_DAY_SLOTS);
    assert!(open.contains(&"2:00 PM"));
    session.set_date(saturday);
    session.set_time("2:00 PM");
    session.next_step();

    // Step 4: client info
    assert_eq!(session.current_step(), BookingStep::EnterClientInfo);
    session.set_client_info(ClientInfoUpdate {
        name: Some("Ada Lovelace".into()),
        email: Some("ada@example.com".into()),
        phone: Some("555-0100".into()),
        notes: Some("window seat please".into()),
    });
    session.next_step();

    // Step 5: confirm
    assert_eq!(session.current_step(), BookingStep::Confirm);
    assert!(session.draft().is_complete());

    let store = MemoryStore::default();
    let gateway = SubmissionGateway::new(&store);
    let id = session.submit(&gateway, Some(&identity())).await.unwrap();
    assert_eq!(id, "appt-1");

    let records = store.appointments.lock().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.date, "2024-06-15");
    assert_eq!(record.time, "14:00:00");
    assert_eq!(record.status, "pending");
    assert_eq!(record.notes, "window seat please");
    drop(records);

    // Successful submission resets to a fresh session.
    assert_eq!(session.current_step(), BookingStep::SelectService);
    assert!(!session.draft().is_complete());
}

// Jumping straight to Confirm with a half-filled draft must be caught by the
// Confirm-step re-check, not persisted.
#[tokio::test]
async fn confirm_step_blocks_incomplete_draft_after_forward_jump() {
    let mut session = BookingSession::new();
    let service = session.services()[0].clone();
    session.set_service(service);
    session.go_to_step(5);
    assert_eq!(session.current_step(), BookingStep::Confirm);

    let store = MemoryStore::default();
    let gateway = SubmissionGateway::new(&store);
    let result = session.submit(&gateway, Some(&identity())).await;

    assert_eq!(result, Err(SubmissionError::IncompleteDraft));
    assert!(store.appointments.lock().unwrap().is_empty());
}

// A failed submission keeps draft and cursor intact so the user can retry
// without re-entering anything.
#[tokio::test]
async fn failed_submission_preserves_draft_for_retry() {
    let mut session = BookingSession::new();
    let service = session.services()[1].clone();
    let stylist = session.stylists()[1].clone();
    session.set_service(service.clone());
    session.set_stylist(stylist);
    session.set_date(NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
    session.set_time("9:30 AM");
    session.go_to_step(5);

    let failing = MemoryStore {
        fail_writes: true,
        ..Default::default()
    };
    let gateway = SubmissionGateway::new(&failing);
    let result = session.submit(&gateway, Some(&identity())).await;
    assert_eq!(
        result,
        Err(SubmissionError::Storage("record store unavailable".into()))
    );

    assert_eq!(session.current_step(), BookingStep::Confirm);
    assert_eq!(session.draft().service.as_ref(), Some(&service));
    assert!(session.draft().is_complete());
    assert!(!session.is_submitting());

    // Retry against a healthy store succeeds with the same draft.
    let store = MemoryStore::default();
    let gateway = SubmissionGateway::new(&store);
    session.submit(&gateway, Some(&identity())).await.unwrap();
    assert_eq!(store.appointments.lock().unwrap().len(), 1);
}

// An unauthenticated confirm keeps the draft so the user can resume after
// signing in.
#[tokio::test]
async fn unauthenticated_submission_preserves_draft() {
    let mut session = BookingSession::new();
    let service = session.services()[0].clone();
    let stylist = session.stylists()[0].clone();
    session.set_service(service);
    session.set_stylist(stylist);
    session.set_date(NaiveDate::from_ymd_opt(2024, 6, 17).unwrap());
    session.set_time("9:30 AM");

    let store = MemoryStore::default();
    let gateway = SubmissionGateway::new(&store);
    let result = session.submit(&gateway, None).await;

    assert_eq!(result, Err(SubmissionError::Unauthenticated));
    assert!(session.draft().is_complete());
    assert!(store.appointments.lock().unwrap().is_empty());
}
