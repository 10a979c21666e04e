//! Hospital entity, DTOs and the admin dashboard view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::doctors::Doctor;
use crate::ids::{HospitalId, UserId};
use crate::patients::PatientWithDoctor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    pub license_number: String,
    pub established_year: i32,
    pub bed_capacity: i32,
    pub emergency_contact: String,
    pub description: Option<String>,
    /// Super admin who registered the hospital. Cleared if that account is removed.
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hospital {
    pub fn summary(&self) -> HospitalSummary {
        HospitalSummary {
            id: self.id,
            name: self.name.clone(),
            address: self.address.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHospitalDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1, max = 50))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 500))]
    pub website: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub license_number: String,
    #[validate(range(min = 1000, max = 9999))]
    pub established_year: i32,
    #[validate(range(min = 0))]
    pub bed_capacity: i32,
    #[validate(length(min = 1, max = 50))]
    pub emergency_contact: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHospitalDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 500))]
    pub website: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub license_number: Option<String>,
    #[validate(range(min = 1000, max = 9999))]
    pub established_year: Option<i32>,
    #[validate(range(min = 0))]
    pub bed_capacity: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub emergency_contact: Option<String>,
    pub description: Option<String>,
}

impl Hospital {
    /// Applies a partial update in place.
    pub fn apply(&mut self, changes: &UpdateHospitalDto) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(address) = &changes.address {
            self.address = address.clone();
        }
        if let Some(phone) = &changes.phone {
            self.phone = phone.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if changes.website.is_some() {
            self.website = changes.website.clone();
        }
        if let Some(license_number) = &changes.license_number {
            self.license_number = license_number.clone();
        }
        if let Some(year) = changes.established_year {
            self.established_year = year;
        }
        if let Some(beds) = changes.bed_capacity {
            self.bed_capacity = beds;
        }
        if let Some(contact) = &changes.emergency_contact {
            self.emergency_contact = contact.clone();
        }
        if changes.description.is_some() {
            self.description = changes.description.clone();
        }
    }
}

/// `{id, name, address}` projection embedded in other responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HospitalSummary {
    pub id: HospitalId,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct HospitalStatistics {
    pub doctors: i64,
    pub patients: i64,
    pub prescriptions: i64,
}

/// Response of `GET /hospital-admins/my-hospital`.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HospitalDashboard {
    pub hospital: Hospital,
    pub statistics: HospitalStatistics,
    pub recent_doctors: Vec<Doctor>,
    pub recent_patients: Vec<PatientWithDoctor>,
}
