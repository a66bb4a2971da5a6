//! Store-backed implementations of the booking core's record-store traits,
//! so an in-process booking session runs against the same tables as the REST
//! surface.

use chrono::{NaiveDate, NaiveTime};
use sea_orm::{EntityTrait, QueryOrder};
use uuid::Uuid;

use crate::{
    booking::catalog::CatalogSource,
    booking::submission::{AppointmentStore, NewAppointment, StoreError},
    entity::{
        services::{Column as ServiceCol, Entity as Services},
        stylists::{Column as StylistCol, Entity as Stylists},
    },
    models::{Service, Stylist},
    services::appointment_service::{self, NewAppointmentRecord},
    services::catalog_service::{service_from_entity, stylist_from_entity},
    state::AppState,
};

impl CatalogSource for AppState {
    async fn load_services(&self) -> Result<Vec<Service>, StoreError> {
        Services::find()
            .order_by_asc(ServiceCol::CreatedAt)
            .all(&self.orm)
            .await
            .map(|models| models.into_iter().map(service_from_entity).collect())
            .map_err(|err| StoreError(err.to_string()))
    }

    async fn load_stylists(&self) -> Result<Vec<Stylist>, StoreError> {
        Stylists::find()
            .order_by_asc(StylistCol::CreatedAt)
            .all(&self.orm)
            .await
            .map(|models| models.into_iter().map(stylist_from_entity).collect())
            .map_err(|err| StoreError(err.to_string()))
    }
}

impl AppointmentStore for AppState {
    async fn create_appointment(&self, appointment: NewAppointment) -> Result<String, StoreError> {
        let record = NewAppointmentRecord {
            client_id: parse_id(&appointment.client_id, "client")?,
            stylist_id: parse_id(&appointment.stylist_id, "stylist")?,
            service_id: parse_id(&appointment.service_id, "service")?,
            date: NaiveDate::parse_from_str(&appointment.date, "%Y-%m-%d")
                .map_err(|_| StoreError(format!("invalid date `{}`", appointment.date)))?,
            time: NaiveTime::parse_from_str(&appointment.time, "%H:%M:%S")
                .map_err(|_| StoreError(format!("invalid time `{}`", appointment.time)))?,
            notes: appointment.notes,
        };

        appointment_service::create_appointment(self, record)
            .await
            .map(|created| created.id.to_string())
            .map_err(|err| StoreError(err.to_string()))
    }
}

fn parse_id(id: &str, kind: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(id).map_err(|_| StoreError(format!("invalid {kind} id `{id}`")))
}
