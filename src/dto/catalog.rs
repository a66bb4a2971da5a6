use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Service, Stylist};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub duration: i32,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub duration: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStylistRequest {
    pub name: String,
    pub role: String,
    pub image: Option<String>,
    pub bio: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateStylistRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub image: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceList {
    pub items: Vec<Service>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StylistList {
    pub items: Vec<Stylist>,
}
