pub mod appointment_service;
pub mod auth_service;
pub mod booking_store;
pub mod catalog_service;
