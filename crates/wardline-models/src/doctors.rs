use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use wardline_core::serde::deserialize_optional_id;

use crate::filters::RecordFilter;
use crate::hospitals::HospitalSummary;
use crate::ids::{DoctorId, HospitalId, UserId};
use crate::value_types::Email;

/// Doctor profile. Backed one-to-one by a `DOCTOR` account (`user_id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub email: Email,
    pub specialization: String,
    pub hospital_id: HospitalId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    pub fn summary(&self) -> DoctorSummary {
        DoctorSummary {
            id: self.id,
            name: self.name.clone(),
            specialization: self.specialization.clone(),
        }
    }

    pub fn apply(&mut self, changes: &UpdateDoctorDto) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(specialization) = &changes.specialization {
            self.specialization = specialization.clone();
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewDoctor {
    pub name: String,
    pub email: Email,
    pub specialization: String,
    pub hospital_id: HospitalId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub email: Email,
    #[validate(length(min = 1, max = 200))]
    pub specialization: String,
    pub hospital_id: Option<HospitalId>,
    /// Credential for the doctor's login account.
    #[validate(length(min = 6))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DoctorSummary {
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DoctorWithHospital {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub hospital: Option<HospitalSummary>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DoctorFilterParams {
    /// Honored for super admins only; other roles are pinned to their hospital.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub hospital_id: Option<HospitalId>,
}

impl From<&DoctorFilterParams> for RecordFilter {
    fn from(params: &DoctorFilterParams) -> Self {
        RecordFilter {
            hospital_id: params.hospital_id,
            ..RecordFilter::default()
        }
    }
}
