use tracing::{info, instrument};
use wardline_core::{AppError, hash_password};
use wardline_db::{DoctorProfile, Store, provision_doctor, remove_doctor, update_doctor_profile};
use wardline_models::{
    RecordFilter,
    doctors::{CreateDoctorDto, Doctor, DoctorWithHospital, UpdateDoctorDto},
    ids::DoctorId,
};
use wardline_observability::track_entity_created;
use wardline_policy::{Action, Actor, Ownership, ResourceKind, can_access, list_scope};

fn not_found() -> AppError {
    AppError::not_found("Doctor not found")
}

pub struct DoctorService;

impl DoctorService {
    #[instrument(skip(store, actor, dto), fields(doctor.email = %dto.email, db.operation = "INSERT", db.table = "doctors"))]
    pub async fn create(
        store: &dyn Store,
        actor: &Actor,
        dto: CreateDoctorDto,
    ) -> Result<Doctor, AppError> {
        let hospital_id = dto
            .hospital_id
            .ok_or_else(|| AppError::bad_request("Hospital ID is required"))?;

        can_access(
            actor,
            Action::Create,
            ResourceKind::Doctor,
            Some(&Ownership::hospital(hospital_id)),
        )
        .enforce()?;

        if store.find_hospital(hospital_id).await?.is_none() {
            return Err(AppError::not_found("Hospital not found"));
        }
        if store.find_user_by_email(&dto.email).await?.is_some() {
            return Err(AppError::conflict("User already exists with this email"));
        }

        let password_hash = hash_password(&dto.password)?;
        let (_, doctor) = provision_doctor(
            store,
            DoctorProfile {
                name: dto.name,
                email: dto.email,
                specialization: dto.specialization,
                hospital_id,
                password_hash,
            },
        )
        .await?;

        track_entity_created("doctor");
        info!(doctor.id = %doctor.id, "Doctor created");
        Ok(doctor)
    }

    #[instrument(skip(store, actor), fields(db.operation = "SELECT", db.table = "doctors"))]
    pub async fn list(
        store: &dyn Store,
        actor: &Actor,
        requested: &RecordFilter,
    ) -> Result<Vec<Doctor>, AppError> {
        let scope = list_scope(actor, ResourceKind::Doctor, requested)?;
        store.list_doctors(&scope, None).await
    }

    #[instrument(skip(store, actor), fields(db.operation = "SELECT", db.table = "doctors"))]
    pub async fn get(
        store: &dyn Store,
        actor: &Actor,
        id: DoctorId,
    ) -> Result<DoctorWithHospital, AppError> {
        let doctor = store.find_doctor(id).await?.ok_or_else(not_found)?;
        can_access(
            actor,
            Action::Read,
            ResourceKind::Doctor,
            Some(&Ownership::from(&doctor)),
        )
        .enforce()?;

        let hospital = store
            .find_hospital(doctor.hospital_id)
            .await?
            .map(|h| h.summary());
        Ok(DoctorWithHospital { doctor, hospital })
    }

    #[instrument(skip(store, actor, dto), fields(db.operation = "UPDATE", db.table = "doctors"))]
    pub async fn update(
        store: &dyn Store,
        actor: &Actor,
        id: DoctorId,
        dto: UpdateDoctorDto,
    ) -> Result<Doctor, AppError> {
        let doctor = store.find_doctor(id).await?.ok_or_else(not_found)?;
        can_access(
            actor,
            Action::Update,
            ResourceKind::Doctor,
            Some(&Ownership::from(&doctor)),
        )
        .enforce()?;

        let updated = update_doctor_profile(store, &doctor, &dto)
            .await?
            .ok_or_else(not_found)?;

        info!(doctor.id = %id, "Doctor updated");
        Ok(updated)
    }

    /// Deletes the doctor, then their account.
    #[instrument(skip(store, actor), fields(db.operation = "DELETE", db.table = "doctors"))]
    pub async fn delete(store: &dyn Store, actor: &Actor, id: DoctorId) -> Result<(), AppError> {
        let doctor = store.find_doctor(id).await?.ok_or_else(not_found)?;
        can_access(
            actor,
            Action::Delete,
            ResourceKind::Doctor,
            Some(&Ownership::from(&doctor)),
        )
        .enforce()?;

        if !remove_doctor(store, &doctor).await? {
            return Err(not_found());
        }

        info!(doctor.id = %id, "Doctor deleted");
        Ok(())
    }
}
