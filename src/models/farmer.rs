use crate::entities::farmer_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFarmerRequest {
    pub name: String,
    pub gender: String,
    pub location: String,
    pub crop: String,
    pub contact: String,
    pub profile_picture: Option<String>,
}

/// Absent fields are left unchanged. `profile_picture: ""` clears the picture.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateFarmerRequest {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub location: Option<String>,
    pub crop: Option<String>,
    pub contact: Option<String>,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct FarmerQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub crop: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FarmerResponse {
    pub id: i32,
    pub name: String,
    pub gender: String,
    pub location: String,
    pub crop: String,
    pub contact: String,
    pub profile_picture: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<farmer_entity::Model> for FarmerResponse {
    fn from(m: farmer_entity::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            gender: m.gender,
            location: m.location,
            crop: m.crop,
            contact: m.contact,
            profile_picture: m.profile_picture,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
