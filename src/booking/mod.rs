//! The booking core: a multi-step appointment draft state machine, a
//! pluggable availability calculator, a catalog provider with built-in
//! fallbacks, and a submission gateway. Everything here is store-agnostic;
//! the record store and identity provider are traits implemented elsewhere.

pub mod availability;
pub mod catalog;
pub mod draft;
pub mod machine;
pub mod submission;

pub use availability::{AvailabilityPolicy, BUSINESS_DAY_SLOTS, DayPatternPolicy};
pub use catalog::{CatalogLoad, CatalogProvider, CatalogSource, default_services, default_stylists};
pub use draft::{AppointmentDraft, ClientInfo, ClientInfoUpdate};
pub use machine::{BookingSession, BookingStep};
pub use submission::{
    AppointmentStore, Identity, NewAppointment, StoreError, SubmissionError, SubmissionGateway,
};
