use chrono::NaiveTime;
use serde::Serialize;
use thiserror::Error;

use crate::booking::draft::AppointmentDraft;

/// Opaque failure reported by a record store implementation.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

/// A resolved, authenticated user as handed over by the identity provider.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub role: String,
}

/// The payload handed to the record store: plain `YYYY-MM-DD` date, 24-hour
/// `HH:MM:SS` time, status always `pending`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub client_id: String,
    pub stylist_id: String,
    pub service_id: String,
    pub date: String,
    pub time: String,
    pub notes: String,
    pub status: String,
}

/// Create-side of the record store. Returns the identifier the store assigned.
pub trait AppointmentStore {
    fn create_appointment(
        &self,
        appointment: NewAppointment,
    ) -> impl Future<Output = Result<String, StoreError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("appointment details are incomplete")]
    IncompleteDraft,
    #[error("sign in is required to book an appointment")]
    Unauthenticated,
    #[error("unrecognized time slot `{0}`")]
    MalformedTime(String),
    #[error("failed to save the appointment: {0}")]
    Storage(String),
}

/// Parse a 12-hour slot label such as `"2:00 PM"` into a wall-clock time.
/// Labels that do not match the `H:MM AM/PM` shape are rejected rather than
/// silently defaulted to midnight.
pub fn parse_slot_label(label: &str) -> Result<NaiveTime, SubmissionError> {
    let malformed = || SubmissionError::MalformedTime(label.to_string());

    let (clock, meridiem) = label.trim().split_once(' ').ok_or_else(malformed)?;
    let (hour, minute) = clock.split_once(':').ok_or_else(malformed)?;
    let hour: u32 = hour.parse().map_err(|_| malformed())?;
    let minute: u32 = minute.parse().map_err(|_| malformed())?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return Err(malformed());
    }

    let hour = match meridiem.trim().to_ascii_uppercase().as_str() {
        "AM" if hour == 12 => 0,
        "AM" => hour,
        "PM" if hour == 12 => 12,
        "PM" => hour + 12,
        _ => return Err(malformed()),
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(malformed)
}

/// Normalize a slot label to the zero-padded 24-hour `HH:MM:00` form the
/// record store expects.
pub fn normalize_slot_label(label: &str) -> Result<String, SubmissionError> {
    Ok(parse_slot_label(label)?.format("%H:%M:%S").to_string())
}

/// Validates a completed draft, resolves identity and persists the
/// appointment through the record store. Exactly one record is created per
/// successful call; nothing is retried automatically.
pub struct SubmissionGateway<S> {
    store: S,
}

impl<S: AppointmentStore> SubmissionGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn submit(
        &self,
        draft: &AppointmentDraft,
        identity: Option<&Identity>,
    ) -> Result<String, SubmissionError> {
        let (service, stylist, date, time) = match (
            draft.service.as_ref(),
            draft.stylist.as_ref(),
            draft.date,
            draft.time.as_deref(),
        ) {
            (Some(service), Some(stylist), Some(date), Some(time)) => {
                (service, stylist, date, time)
            }
            _ => return Err(SubmissionError::IncompleteDraft),
        };

        let identity = identity.ok_or(SubmissionError::Unauthenticated)?;
        let time = normalize_slot_label(time)?;

        let appointment = NewAppointment {
            client_id: identity.user_id.clone(),
            stylist_id: stylist.id.clone(),
            service_id: service.id.clone(),
            // The draft date is a calendar date, not an instant; serializing
            // it without a time zone avoids off-by-one-day drift.
            date: date.format("%Y-%m-%d").to_string(),
            time,
            notes: draft.client.notes.clone(),
            status: "pending".to_string(),
        };

        self.store
            .create_appointment(appointment)
            .await
            .map_err(|err| SubmissionError::Storage(err.0))
    }
}
