use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Service, Stylist};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// Sparse update for [`ClientInfo`]. A field that is `None` was not supplied
/// and leaves the current value untouched; supplying an empty string clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientInfoUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// The in-progress appointment being assembled by the user. It has no
/// identity until the submission gateway persists it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDraft {
    pub service: Option<Service>,
    pub stylist: Option<Stylist>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub client: ClientInfo,
}

impl AppointmentDraft {
    /// Completeness gates the final submission step: service, stylist, date
    /// and time must all be chosen. Client info is not part of the invariant.
    pub fn is_complete(&self) -> bool {
        self.service.is_some() && self.stylist.is_some() && self.date.is_some() && self.time.is_some()
    }

    pub fn merge_client_info(&mut self, update: ClientInfoUpdate) {
        if let Some(name) = update.name {
            self.client.name = name;
        }
        if let Some(email) = update.email {
            self.client.email = email;
        }
        if let Some(phone) = update.phone {
            self.client.phone = phone;
        }
        if let Some(notes) = update.notes {
            self.client.notes = notes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::catalog::{default_services, default_stylists};

    fn complete_draft() -> AppointmentDraft {
        AppointmentDraft {
            service: default_services().into_iter().next(),
            stylist: default_stylists().into_iter().next(),
            date: NaiveDate::from_ymd_opt(2024, 6, 15),
            time: Some("2:00 PM".to_string()),
            client: ClientInfo::default(),
        }
    }

    #[test]
    fn completeness_requires_all_four_core_fields() {
        let draft = complete_draft();
        assert!(draft.is_complete());

        for clear in 0..4 {
            let mut partial = complete_draft();
            match clear {
                0 => partial.service = None,
                1 => partial.stylist = None,
                2 => partial.date = None,
                _ => partial.time = None,
            }
            assert!(!partial.is_complete());
        }
    }

    #[test]
    fn empty_draft_is_incomplete() {
        assert!(!AppointmentDraft::default().is_complete());
    }

    #[test]
    fn client_info_merge_preserves_absent_fields() {
        let mut draft = AppointmentDraft::default();
        draft.merge_client_info(ClientInfoUpdate {
            name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            ..Default::default()
        });
        draft.merge_client_info(ClientInfoUpdate {
            phone: Some("555-0100".into()),
            ..Default::default()
        });

        assert_eq!(draft.client.name, "Ada Lovelace");
        assert_eq!(draft.client.email, "ada@example.com");
        assert_eq!(draft.client.phone, "555-0100");
        assert_eq!(draft.client.notes, "");
    }

    #[test]
    fn client_info_merge_can_clear_with_empty_string() {
        let mut draft = AppointmentDraft::default();
        draft.merge_client_info(ClientInfoUpdate {
            notes: Some("allergic to lavender".into()),
            ..Default::default()
        });
        draft.merge_client_info(ClientInfoUpdate {
            notes: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(draft.client.notes, "");
    }
}
