use chrono::NaiveDate;

use crate::booking::catalog::{default_services, default_stylists};
use crate::booking::draft::{AppointmentDraft, ClientInfoUpdate};
use crate::booking::submission::{
    AppointmentStore, Identity, SubmissionError, SubmissionGateway,
};
use crate::models::{Service, Stylist};

/// The five ordered steps of the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BookingStep {
    SelectService = 1,
    SelectStylist = 2,
    SelectDateTime = 3,
    EnterClientInfo = 4,
    Confirm = 5,
}

impl BookingStep {
    pub const FIRST: Self = Self::SelectService;

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Out-of-range indexes clamp to the nearest valid step.
    pub fn from_index(index: i32) -> Self {
        match index.clamp(1, 5) {
            1 => Self::SelectService,
            2 => Self::SelectStylist,
            3 => Self::SelectDateTime,
            4 => Self::EnterClientInfo,
            _ => Self::Confirm,
        }
    }
}

/// One booking session: the draft under construction, the catalog it renders
/// from, and the step cursor. Draft and cursor mutations are pure and never
/// fail; the machine is deliberately permissive about step order, so callers
/// gate forward navigation on per-step completeness and the Confirm step
/// re-checks the whole draft before submitting.
#[derive(Debug)]
pub struct BookingSession {
    draft: AppointmentDraft,
    services: Vec<Service>,
    stylists: Vec<Stylist>,
    step: BookingStep,
    submitting: bool,
}

impl BookingSession {
    /// Starts at `SelectService` with the built-in default catalog; callers
    /// replace it once a store-backed load resolves.
    pub fn new() -> Self {
        Self {
            draft: AppointmentDraft::default(),
            services: default_services(),
            stylists: default_stylists(),
            step: BookingStep::FIRST,
            submitting: false,
        }
    }

    pub fn draft(&self) -> &AppointmentDraft {
        &self.draft
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn stylists(&self) -> &[Stylist] {
        &self.stylists
    }

    pub fn current_step(&self) -> BookingStep {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Swap in a freshly loaded catalog. A load resolving after the user has
    /// begun interacting must not clobber selections, so this touches the
    /// lists only, never the draft.
    pub fn replace_catalog(&mut self, services: Vec<Service>, stylists: Vec<Stylist>) {
        self.services = services;
        self.stylists = stylists;
    }

    pub fn set_service(&mut self, service: Service) {
        self.draft.service = Some(service);
    }

    pub fn set_stylist(&mut self, stylist: Stylist) {
        self.draft.stylist = Some(stylist);
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.date = Some(date);
    }

    pub fn set_time(&mut self, slot: impl Into<String>) {
        self.draft.time = Some(slot.into());
    }

    pub fn set_client_info(&mut self, update: ClientInfoUpdate) {
        self.draft.merge_client_info(update);
    }

    pub fn next_step(&mut self) {
        self.step = BookingStep::from_index(self.step.index() as i32 + 1);
    }

    pub fn prev_step(&mut self) {
        self.step = BookingStep::from_index(self.step.index() as i32 - 1);
    }

    pub fn go_to_step(&mut self, index: i32) {
        self.step = BookingStep::from_index(index);
    }

    /// Clears the draft and returns the cursor to the first step.
    pub fn reset(&mut self) {
        self.draft = AppointmentDraft::default();
        self.step = BookingStep::FIRST;
    }

    /// Confirm-step submission. Completeness is re-checked here regardless of
    /// how the cursor arrived, then the gateway takes over. On success the
    /// session resets to a fresh draft; on failure draft and cursor are left
    /// untouched so the user can retry without re-entering anything.
    pub async fn submit<S: AppointmentStore>(
        &mut self,
        gateway: &SubmissionGateway<S>,
        identity: Option<&Identity>,
    ) -> Result<String, SubmissionError> {
        if !self.draft.is_complete() {
            return Err(SubmissionError::IncompleteDraft);
        }

        self.submitting = true;
        let result = gateway.submit(&self.draft, identity).await;
        self.submitting = false;

        if result.is_ok() {
            self.reset();
        }
        result
    }
}

impl Default for BookingSession {
    fn default() -> Self {
        Self::new()
    }
}
