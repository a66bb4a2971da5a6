use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Appointment;

/// Every field optional so that missing fields surface as a 400 with a
/// helpful message instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateAppointmentRequest {
    pub client_id: Option<String>,
    pub stylist_id: Option<String>,
    pub service_id: Option<String>,
    /// Plain calendar date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// 24-hour wall-clock time, `HH:MM:SS`.
    pub time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAppointmentStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentList {
    pub items: Vec<Appointment>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SlotList {
    pub slots: Vec<String>,
}
