use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use wardline_core::serde::deserialize_optional_id;

use crate::doctors::DoctorSummary;
use crate::filters::RecordFilter;
use crate::ids::{DoctorId, HospitalId, PatientId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "gender")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// A patient admitted under one doctor at that doctor's hospital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientEnrollment {
    pub id: PatientId,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub doctor_id: DoctorId,
    pub hospital_id: HospitalId,
    pub date_of_admission: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PatientEnrollment {
    pub fn apply(&mut self, changes: &UpdatePatientDto) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(age) = changes.age {
            self.age = age;
        }
        if let Some(gender) = changes.gender {
            self.gender = gender;
        }
        if let Some(admitted) = changes.date_of_admission {
            self.date_of_admission = admitted;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
    pub doctor_id: DoctorId,
    pub hospital_id: HospitalId,
    pub date_of_admission: DateTime<Utc>,
}

/// `doctorId`/`hospitalId` are ignored for doctors, who always enroll
/// patients under their own profile.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientDto {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0, max = 150))]
    pub age: i32,
    pub gender: Gender,
    pub doctor_id: Option<DoctorId>,
    pub hospital_id: Option<HospitalId>,
    pub date_of_admission: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientDto {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150))]
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub date_of_admission: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PatientWithDoctor {
    #[serde(flatten)]
    pub patient: PatientEnrollment,
    pub doctor: Option<DoctorSummary>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PatientFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub hospital_id: Option<HospitalId>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub doctor_id: Option<DoctorId>,
}

impl From<&PatientFilterParams> for RecordFilter {
    fn from(params: &PatientFilterParams) -> Self {
        RecordFilter {
            hospital_id: params.hospital_id,
            doctor_id: params.doctor_id,
            patient_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gender_uses_capitalized_names() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), r#""Female""#);
        assert!(serde_json::from_str::<Gender>(r#""female""#).is_err());
    }

    #[test]
    fn create_dto_defaults_are_optional() {
        let dto: CreatePatientDto = serde_json::from_value(json!({
            "name": "Jane Roe",
            "age": 42,
            "gender": "Other"
        }))
        .unwrap();
        assert!(dto.doctor_id.is_none());
        assert!(dto.date_of_admission.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn age_out_of_range_fails_validation() {
        let dto: CreatePatientDto = serde_json::from_value(json!({
            "name": "Jane Roe",
            "age": 200,
            "gender": "Female"
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn filter_params_map_to_record_filter() {
        let doctor_id = DoctorId::new();
        let params: PatientFilterParams =
            serde_json::from_value(json!({ "doctorId": doctor_id.to_string() })).unwrap();
        let filter = RecordFilter::from(&params);
        assert_eq!(filter.doctor_id, Some(doctor_id));
        assert!(filter.hospital_id.is_none());
    }
}
