use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        appointments::{
            AppointmentList, CreateAppointmentRequest, SlotList, UpdateAppointmentStatusRequest,
        },
        auth::{LoginRequest, LoginResponse, RegisterRequest},
        catalog::{
            CreateServiceRequest, CreateStylistRequest, ServiceList, StylistList,
            UpdateServiceRequest, UpdateStylistRequest,
        },
    },
    models::{Appointment, AppointmentStatus, Service, Stylist, User},
    response::{ApiResponse, Meta},
    routes::{appointments, auth, health, health::HealthData, params, services, stylists},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        appointments::create_appointment,
        appointments::list_appointments,
        appointments::list_availability,
        appointments::get_appointment,
        appointments::update_status,
        appointments::cancel_appointment,
        services::list_services,
        services::get_service,
        services::create_service,
        services::update_service,
        services::delete_service,
        stylists::list_stylists,
        stylists::get_stylist,
        stylists::create_stylist,
        stylists::update_stylist,
        stylists::delete_stylist,
    ),
    components(
        schemas(
            User,
            Service,
            Stylist,
            Appointment,
            AppointmentStatus,
            AppointmentList,
            SlotList,
            CreateAppointmentRequest,
            UpdateAppointmentStatusRequest,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateServiceRequest,
            UpdateServiceRequest,
            CreateStylistRequest,
            UpdateStylistRequest,
            ServiceList,
            StylistList,
            params::Pagination,
            params::AppointmentListQuery,
            Meta,
            HealthData,
            ApiResponse<HealthData>,
            ApiResponse<Appointment>,
            ApiResponse<AppointmentList>,
            ApiResponse<SlotList>,
            ApiResponse<Service>,
            ApiResponse<ServiceList>,
            ApiResponse<Stylist>,
            ApiResponse<StylistList>,
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Appointments", description = "Booking and appointment lifecycle endpoints"),
        (name = "Services", description = "Service catalog endpoints"),
        (name = "Stylists", description = "Stylist catalog endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
