//! Accounts and hospital-admin DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;
use wardline_core::Role;

use crate::hospitals::HospitalSummary;
use crate::ids::{HospitalId, UserId};
use crate::value_types::Email;

/// Public view of an account. Carries no credential material.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: Role,
    pub hospital_id: Option<HospitalId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An account together with its bcrypt hash. Never serialized.
#[derive(FromRow, Clone)]
pub struct UserWithPassword {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

impl fmt::Debug for UserWithPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserWithPassword")
            .field("user", &self.user)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
    pub hospital_id: Option<HospitalId>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("hospital_id", &self.hospital_id)
            .finish_non_exhaustive()
    }
}

/// Partial account update; `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub hospital_id: Option<HospitalId>,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithHospital {
    #[serde(flatten)]
    pub user: User,
    pub hospital: Option<HospitalSummary>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHospitalAdminDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub email: Email,
    #[validate(length(min = 6))]
    pub password: String,
    pub hospital_id: HospitalId,
}

#[derive(Deserialize, Debug, Clone, Default, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHospitalAdminDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub email: Option<Email>,
    pub hospital_id: Option<HospitalId>,
}

impl From<UpdateHospitalAdminDto> for UserChanges {
    fn from(dto: UpdateHospitalAdminDto) -> Self {
        Self {
            name: dto.name,
            email: dto.email,
            hospital_id: dto.hospital_id,
        }
    }
}
