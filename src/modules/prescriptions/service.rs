use tracing::{info, instrument};
use wardline_core::AppError;
use wardline_db::Store;
use wardline_models::{
    RecordFilter,
    ids::PrescriptionId,
    prescriptions::{CreatePrescriptionDto, NewPrescription, Prescription, UpdatePrescriptionDto},
};
use wardline_observability::track_entity_created;
use wardline_policy::{Action, Actor, Ownership, ResourceKind, can_access, list_scope};

fn not_found() -> AppError {
    AppError::not_found("Prescription not found")
}

pub struct PrescriptionService;

impl PrescriptionService {
    async fn find_owned(
        store: &dyn Store,
        actor: &Actor,
        action: Action,
        id: PrescriptionId,
    ) -> Result<Prescription, AppError> {
        let prescription = store.find_prescription(id).await?.ok_or_else(not_found)?;
        can_access(
            actor,
            action,
            ResourceKind::Prescription,
            Some(&Ownership::from(&prescription)),
        )
        .enforce()?;
        Ok(prescription)
    }

    /// The hospital is inherited from the patient. Doctors prescribe as
    /// themselves for their own patients only.
    #[instrument(skip(store, actor, dto), fields(patient.id = %dto.patient_enrollment_id, db.operation = "INSERT", db.table = "prescriptions"))]
    pub async fn create(
        store: &dyn Store,
        actor: &Actor,
        dto: CreatePrescriptionDto,
    ) -> Result<Prescription, AppError> {
        let patient = store
            .find_patient(dto.patient_enrollment_id)
            .await?
            .ok_or_else(|| AppError::not_found("Patient not found"))?;

        let doctor_id = if actor.is_doctor() {
            can_access(
                actor,
                Action::Create,
                ResourceKind::Prescription,
                Some(&Ownership::from(&patient)),
            )
            .enforce()?;
            actor
                .doctor_id
                .ok_or_else(|| AppError::not_found("Doctor profile not found"))?
        } else {
            let doctor_id = dto
                .doctor_id
                .ok_or_else(|| AppError::bad_request("Doctor ID is required"))?;

            can_access(
                actor,
                Action::Create,
                ResourceKind::Prescription,
                Some(&Ownership::hospital(patient.hospital_id)),
            )
            .enforce()?;

            let doctor = store
                .find_doctor(doctor_id)
                .await?
                .ok_or_else(|| AppError::not_found("Doctor not found"))?;
            if doctor.hospital_id != patient.hospital_id {
                return Err(AppError::bad_request(
                    "Doctor does not belong to the patient's hospital",
                ));
            }
            doctor.id
        };

        let prescription = store
            .insert_prescription(NewPrescription {
                patient_enrollment_id: patient.id,
                medication: dto.medication,
                dosage: dto.dosage,
                instructions: dto.instructions,
                doctor_id,
                hospital_id: patient.hospital_id,
            })
            .await?;

        track_entity_created("prescription");
        info!(prescription.id = %prescription.id, doctor.id = %doctor_id, "Prescription created");
        Ok(prescription)
    }

    #[instrument(skip(store, actor), fields(db.operation = "SELECT", db.table = "prescriptions"))]
    pub async fn list(
        store: &dyn Store,
        actor: &Actor,
        requested: &RecordFilter,
    ) -> Result<Vec<Prescription>, AppError> {
        let scope = list_scope(actor, ResourceKind::Prescription, requested)?;
        store.list_prescriptions(&scope).await
    }

    #[instrument(skip(store, actor), fields(db.operation = "SELECT", db.table = "prescriptions"))]
    pub async fn get(
        store: &dyn Store,
        actor: &Actor,
        id: PrescriptionId,
    ) -> Result<Prescription, AppError> {
        Self::find_owned(store, actor, Action::Read, id).await
    }

    #[instrument(skip(store, actor, dto), fields(db.operation = "UPDATE", db.table = "prescriptions"))]
    pub async fn update(
        store: &dyn Store,
        actor: &Actor,
        id: PrescriptionId,
        dto: UpdatePrescriptionDto,
    ) -> Result<Prescription, AppError> {
        Self::find_owned(store, actor, Action::Update, id).await?;
        let prescription = store
            .update_prescription(id, &dto)
            .await?
            .ok_or_else(not_found)?;
        info!(prescription.id = %id, "Prescription updated");
        Ok(prescription)
    }

    #[instrument(skip(store, actor), fields(db.operation = "DELETE", db.table = "prescriptions"))]
    pub async fn delete(
        store: &dyn Store,
        actor: &Actor,
        id: PrescriptionId,
    ) -> Result<(), AppError> {
        Self::find_owned(store, actor, Action::Delete, id).await?;
        if !store.delete_prescription(id).await? {
            return Err(not_found());
        }
        info!(prescription.id = %id, "Prescription deleted");
        Ok(())
    }
}
