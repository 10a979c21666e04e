use tracing::{info, instrument};
use wardline_core::AppError;
use wardline_db::Store;
use wardline_models::{
    RecordFilter,
    hospitals::{CreateHospitalDto, Hospital, UpdateHospitalDto},
    ids::HospitalId,
};
use wardline_observability::track_entity_created;
use wardline_policy::{Action, Actor, Ownership, ResourceKind, can_access, list_scope};

fn not_found() -> AppError {
    AppError::not_found("Hospital not found")
}

pub struct HospitalService;

impl HospitalService {
    #[instrument(skip(store, dto), fields(hospital.name = %dto.name, db.operation = "INSERT", db.table = "hospitals"))]
    pub async fn create(
        store: &dyn Store,
        actor: &Actor,
        dto: CreateHospitalDto,
    ) -> Result<Hospital, AppError> {
        can_access(actor, Action::Create, ResourceKind::Hospital, None).enforce()?;

        let hospital = store.insert_hospital(&dto, actor.user_id()).await?;
        track_entity_created("hospital");
        info!(hospital.id = %hospital.id, "Hospital created");
        Ok(hospital)
    }

    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "hospitals"))]
    pub async fn list(store: &dyn Store, actor: &Actor) -> Result<Vec<Hospital>, AppError> {
        let scope = list_scope(actor, ResourceKind::Hospital, &RecordFilter::default())?;
        store.list_hospitals(scope.hospital_id).await
    }

    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "hospitals"))]
    pub async fn get(
        store: &dyn Store,
        actor: &Actor,
        id: HospitalId,
    ) -> Result<Hospital, AppError> {
        let hospital = store.find_hospital(id).await?.ok_or_else(not_found)?;
        can_access(
            actor,
            Action::Read,
            ResourceKind::Hospital,
            Some(&Ownership::from(&hospital)),
        )
        .enforce()?;
        Ok(hospital)
    }

    #[instrument(skip(store, dto), fields(db.operation = "UPDATE", db.table = "hospitals"))]
    pub async fn update(
        store: &dyn Store,
        actor: &Actor,
        id: HospitalId,
        dto: UpdateHospitalDto,
    ) -> Result<Hospital, AppError> {
        let hospital = store.find_hospital(id).await?.ok_or_else(not_found)?;
        can_access(
            actor,
            Action::Update,
            ResourceKind::Hospital,
            Some(&Ownership::from(&hospital)),
        )
        .enforce()?;

        let updated = store.update_hospital(id, &dto).await?.ok_or_else(not_found)?;
        info!(hospital.id = %id, "Hospital updated");
        Ok(updated)
    }

    /// Fails with 409 while any account or record still references the hospital.
    #[instrument(skip(store), fields(db.operation = "DELETE", db.table = "hospitals"))]
    pub async fn delete(store: &dyn Store, actor: &Actor, id: HospitalId) -> Result<(), AppError> {
        let hospital = store.find_hospital(id).await?.ok_or_else(not_found)?;
        can_access(
            actor,
            Action::Delete,
            ResourceKind::Hospital,
            Some(&Ownership::from(&hospital)),
        )
        .enforce()?;

        if !store.delete_hospital(id).await? {
            return Err(not_found());
        }
        info!(hospital.id = %id, "Hospital deleted");
        Ok(())
    }
}
