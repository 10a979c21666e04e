use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument};
use wardline_core::AppError;
use wardline_db::Store;
use wardline_models::{
    RecordFilter,
    ids::PatientId,
    patients::{
        CreatePatientDto, NewPatient, PatientEnrollment, PatientWithDoctor, UpdatePatientDto,
    },
};
use wardline_observability::track_entity_created;
use wardline_policy::{Action, Actor, Ownership, ResourceKind, can_access, list_scope};

fn not_found() -> AppError {
    AppError::not_found("Patient not found")
}

pub struct PatientService;

impl PatientService {
    async fn find_owned(
        store: &dyn Store,
        actor: &Actor,
        action: Action,
        id: PatientId,
    ) -> Result<PatientEnrollment, AppError> {
        let patient = store.find_patient(id).await?.ok_or_else(not_found)?;
        can_access(
            actor,
            action,
            ResourceKind::Patient,
            Some(&Ownership::from(&patient)),
        )
        .enforce()?;
        Ok(patient)
    }

    /// Doctors enroll patients under themselves. Everyone else names the
    /// doctor, and the stored hospital is always the doctor's.
    #[instrument(skip(store, actor, dto), fields(db.operation = "INSERT", db.table = "patient_enrollments"))]
    pub async fn create(
        store: &dyn Store,
        actor: &Actor,
        dto: CreatePatientDto,
    ) -> Result<PatientEnrollment, AppError> {
        let doctor = if actor.is_doctor() {
            can_access(actor, Action::Create, ResourceKind::Patient, None).enforce()?;
            let doctor_id = actor
                .doctor_id
                .ok_or_else(|| AppError::not_found("Doctor profile not found"))?;
            store
                .find_doctor(doctor_id)
                .await?
                .ok_or_else(|| AppError::not_found("Doctor profile not found"))?
        } else {
            let doctor_id = dto
                .doctor_id
                .ok_or_else(|| AppError::bad_request("Doctor ID is required"))?;
            let doctor = store
                .find_doctor(doctor_id)
                .await?
                .ok_or_else(|| AppError::not_found("Doctor not found"))?;

            can_access(
                actor,
                Action::Create,
                ResourceKind::Patient,
                Some(&Ownership::from(&doctor)),
            )
            .enforce()?;

            if let Some(requested) = dto.hospital_id
                && requested != doctor.hospital_id
            {
                return Err(if actor.is_super_admin() {
                    AppError::bad_request("Doctor does not belong to the given hospital")
                } else {
                    AppError::forbidden("You can only add patients to your hospital")
                });
            }
            doctor
        };

        let patient = store
            .insert_patient(NewPatient {
                name: dto.name,
                age: dto.age,
                gender: dto.gender,
                doctor_id: doctor.id,
                hospital_id: doctor.hospital_id,
                date_of_admission: dto.date_of_admission.unwrap_or_else(Utc::now),
            })
            .await?;

        track_entity_created("patient");
        info!(patient.id = %patient.id, doctor.id = %doctor.id, "Patient enrolled");
        Ok(patient)
    }

    #[instrument(skip(store, actor), fields(db.operation = "SELECT", db.table = "patient_enrollments"))]
    pub async fn list(
        store: &dyn Store,
        actor: &Actor,
        requested: &RecordFilter,
    ) -> Result<Vec<PatientWithDoctor>, AppError> {
        let scope = list_scope(actor, ResourceKind::Patient, requested)?;
        let patients = store.list_patients(&scope, None).await?;

        let mut doctor_ids: Vec<_> = patients.iter().map(|p| p.doctor_id).collect();
        doctor_ids.sort_unstable_by_key(|id| id.into_inner());
        doctor_ids.dedup();
        let doctors: HashMap<_, _> = store
            .find_doctors(&doctor_ids)
            .await?
            .into_iter()
            .map(|d| (d.id, d.summary()))
            .collect();

        Ok(patients
            .into_iter()
            .map(|patient| {
                let doctor = doctors.get(&patient.doctor_id).cloned();
                PatientWithDoctor { patient, doctor }
            })
            .collect())
    }

    #[instrument(skip(store, actor), fields(db.operation = "SELECT", db.table = "patient_enrollments"))]
    pub async fn get(
        store: &dyn Store,
        actor: &Actor,
        id: PatientId,
    ) -> Result<PatientWithDoctor, AppError> {
        let patient = Self::find_owned(store, actor, Action::Read, id).await?;
        let doctor = store
            .find_doctor(patient.doctor_id)
            .await?
            .map(|d| d.summary());
        Ok(PatientWithDoctor { patient, doctor })
    }

    #[instrument(skip(store, actor, dto), fields(db.operation = "UPDATE", db.table = "patient_enrollments"))]
    pub async fn update(
        store: &dyn Store,
        actor: &Actor,
        id: PatientId,
        dto: UpdatePatientDto,
    ) -> Result<PatientEnrollment, AppError> {
        Self::find_owned(store, actor, Action::Update, id).await?;
        let patient = store.update_patient(id, &dto).await?.ok_or_else(not_found)?;
        info!(patient.id = %id, "Patient updated");
        Ok(patient)
    }

    /// Also removes the patient's prescriptions.
    #[instrument(skip(store, actor), fields(db.operation = "DELETE", db.table = "patient_enrollments"))]
    pub async fn delete(store: &dyn Store, actor: &Actor, id: PatientId) -> Result<(), AppError> {
        Self::find_owned(store, actor, Action::Delete, id).await?;
        if !store.delete_patient(id).await? {
            return Err(not_found());
        }
        info!(patient.id = %id, "Patient deleted");
        Ok(())
    }
}
