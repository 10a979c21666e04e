use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;
use wardline_core::serde::deserialize_optional_id;

use crate::filters::RecordFilter;
use crate::ids::{DoctorId, HospitalId, PatientId, PrescriptionId};

/// `hospital_id` is always the patient's hospital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: PrescriptionId,
    pub patient_enrollment_id: PatientId,
    pub medication: String,
    pub dosage: String,
    pub instructions: String,
    pub doctor_id: DoctorId,
    pub hospital_id: HospitalId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Prescription {
    pub fn apply(&mut self, changes: &UpdatePrescriptionDto) {
        if let Some(medication) = &changes.medication {
            self.medication = medication.clone();
        }
        if let Some(dosage) = &changes.dosage {
            self.dosage = dosage.clone();
        }
        if let Some(instructions) = &changes.instructions {
            self.instructions = instructions.clone();
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPrescription {
    pub patient_enrollment_id: PatientId,
    pub medication: String,
    pub dosage: String,
    pub instructions: String,
    pub doctor_id: DoctorId,
    pub hospital_id: HospitalId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrescriptionDto {
    pub patient_enrollment_id: PatientId,
    #[validate(length(min = 1, max = 200))]
    pub medication: String,
    #[validate(length(min = 1, max = 200))]
    pub dosage: String,
    #[validate(length(min = 1))]
    pub instructions: String,
    /// Required unless the caller is a doctor.
    pub doctor_id: Option<DoctorId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrescriptionDto {
    #[validate(length(min = 1, max = 200))]
    pub medication: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub dosage: Option<String>,
    #[validate(length(min = 1))]
    pub instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PrescriptionFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub hospital_id: Option<HospitalId>,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub doctor_id: Option<DoctorId>,
    /// Narrows any caller's results to one patient.
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub patient_id: Option<PatientId>,
}

impl From<&PrescriptionFilterParams> for RecordFilter {
    fn from(params: &PrescriptionFilterParams) -> Self {
        RecordFilter {
            hospital_id: params.hospital_id,
            doctor_id: params.doctor_id,
            patient_id: params.patient_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_dto_requires_patient() {
        let result = serde_json::from_value::<CreatePrescriptionDto>(json!({
            "medication": "Amoxicillin",
            "dosage": "500mg",
            "instructions": "Twice daily"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn blank_medication_fails_validation() {
        let dto: CreatePrescriptionDto = serde_json::from_value(json!({
            "patientEnrollmentId": PatientId::new(),
            "medication": "",
            "dosage": "500mg",
            "instructions": "Twice daily"
        }))
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn filter_params_carry_patient() {
        let patient_id = PatientId::new();
        let params: PrescriptionFilterParams =
            serde_json::from_value(json!({ "patientId": patient_id.to_string() })).unwrap();
        assert_eq!(RecordFilter::from(&params).patient_id, Some(patient_id));
    }
}
