use std::collections::HashMap;

use tracing::{info, instrument};
use wardline_core::{AppError, Role, hash_password};
use wardline_db::Store;
use wardline_models::{
    RecordFilter,
    hospitals::{HospitalDashboard, HospitalStatistics},
    ids::{HospitalId, UserId},
    patients::PatientWithDoctor,
    users::{
        CreateHospitalAdminDto, NewUser, UpdateHospitalAdminDto, User, UserChanges,
        UserWithHospital,
    },
};
use wardline_observability::track_entity_created;

const RECENT_LIMIT: i64 = 5;

fn not_found() -> AppError {
    AppError::not_found("Hospital admin not found")
}

pub struct HospitalAdminService;

impl HospitalAdminService {
    async fn find_admin(store: &dyn Store, id: UserId) -> Result<User, AppError> {
        store
            .find_user(id)
            .await?
            .filter(|user| user.role == Role::HospitalAdmin)
            .ok_or_else(not_found)
    }

    async fn with_hospital(store: &dyn Store, user: User) -> Result<UserWithHospital, AppError> {
        let hospital = match user.hospital_id {
            Some(id) => store.find_hospital(id).await?.map(|h| h.summary()),
            None => None,
        };
        Ok(UserWithHospital { user, hospital })
    }

    /// All hospital admins, newest first.
    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "users"))]
    pub async fn list(store: &dyn Store) -> Result<Vec<UserWithHospital>, AppError> {
        let admins = store.list_users_by_role(Role::HospitalAdmin).await?;

        let mut ids: Vec<HospitalId> = admins.iter().filter_map(|a| a.hospital_id).collect();
        ids.sort_unstable_by_key(|id| id.into_inner());
        ids.dedup();

        let hospitals: HashMap<HospitalId, _> = store
            .find_hospitals(&ids)
            .await?
            .into_iter()
            .map(|h| (h.id, h.summary()))
            .collect();

        Ok(admins
            .into_iter()
            .map(|user| {
                let hospital = user.hospital_id.and_then(|id| hospitals.get(&id).cloned());
                UserWithHospital { user, hospital }
            })
            .collect())
    }

    #[instrument(skip(store, dto), fields(admin.email = %dto.email, hospital.id = %dto.hospital_id, db.operation = "INSERT"))]
    pub async fn create(
        store: &dyn Store,
        dto: CreateHospitalAdminDto,
    ) -> Result<UserWithHospital, AppError> {
        let hospital = store
            .find_hospital(dto.hospital_id)
            .await?
            .ok_or_else(|| AppError::not_found("Hospital not found"))?;

        if store.find_user_by_email(&dto.email).await?.is_some() {
            return Err(AppError::conflict("User already exists with this email"));
        }
        if store.find_hospital_admin(dto.hospital_id).await?.is_some() {
            return Err(AppError::conflict("This hospital already has an admin"));
        }

        let password_hash = hash_password(&dto.password)?;
        let user = store
            .insert_user(NewUser {
                name: dto.name,
                email: dto.email,
                password_hash,
                role: Role::HospitalAdmin,
                hospital_id: Some(dto.hospital_id),
            })
            .await?;

        track_entity_created("hospital_admin");
        info!(user.id = %user.id, "Hospital admin created");
        Ok(UserWithHospital {
            user,
            hospital: Some(hospital.summary()),
        })
    }

    #[instrument(skip(store, dto), fields(db.operation = "UPDATE", db.table = "users"))]
    pub async fn update(
        store: &dyn Store,
        id: UserId,
        dto: UpdateHospitalAdminDto,
    ) -> Result<UserWithHospital, AppError> {
        let admin = Self::find_admin(store, id).await?;

        if let Some(hospital_id) = dto.hospital_id
            && admin.hospital_id != Some(hospital_id)
        {
            if store.find_hospital(hospital_id).await?.is_none() {
                return Err(AppError::not_found("Hospital not found"));
            }
            if let Some(other) = store.find_hospital_admin(hospital_id).await?
                && other.id != id
            {
                return Err(AppError::conflict("This hospital already has an admin"));
            }
        }

        if let Some(email) = &dto.email
            && *email != admin.email
            && store.find_user_by_email(email).await?.is_some()
        {
            return Err(AppError::conflict("User already exists with this email"));
        }

        let updated = store
            .update_user(id, UserChanges::from(dto))
            .await?
            .ok_or_else(not_found)?;

        info!(user.id = %id, "Hospital admin updated");
        Self::with_hospital(store, updated).await
    }

    #[instrument(skip(store), fields(db.operation = "DELETE", db.table = "users"))]
    pub async fn delete(store: &dyn Store, id: UserId) -> Result<(), AppError> {
        Self::find_admin(store, id).await?;
        if !store.delete_user(id).await? {
            return Err(not_found());
        }
        info!(user.id = %id, "Hospital admin deleted");
        Ok(())
    }

    /// The admin's own hospital with counts and the most recent staff and
    /// patients.
    #[instrument(skip(store), fields(db.operation = "SELECT"))]
    pub async fn my_hospital(
        store: &dyn Store,
        hospital_id: Option<HospitalId>,
    ) -> Result<HospitalDashboard, AppError> {
        let hospital_id = hospital_id
            .ok_or_else(|| AppError::forbidden("No hospital assigned to this account"))?;
        let hospital = store
            .find_hospital(hospital_id)
            .await?
            .ok_or_else(|| AppError::not_found("Hospital not found"))?;

        let scope = RecordFilter::hospital(hospital_id);
        let (doctors, patients, prescriptions, recent_doctors, recent_patients) = tokio::try_join!(
            store.count_doctors(&scope),
            store.count_patients(&scope),
            store.count_prescriptions(&scope),
            store.list_doctors(&scope, Some(RECENT_LIMIT)),
            store.list_patients(&scope, Some(RECENT_LIMIT)),
        )?;

        let mut doctor_ids: Vec<_> = recent_patients.iter().map(|p| p.doctor_id).collect();
        doctor_ids.sort_unstable_by_key(|id| id.into_inner());
        doctor_ids.dedup();
        let summaries: HashMap<_, _> = store
            .find_doctors(&doctor_ids)
            .await?
            .into_iter()
            .map(|d| (d.id, d.summary()))
            .collect();

        let recent_patients = recent_patients
            .into_iter()
            .map(|patient| {
                let doctor = summaries.get(&patient.doctor_id).cloned();
                PatientWithDoctor { patient, doctor }
            })
            .collect();

        Ok(HospitalDashboard {
            hospital,
            statistics: HospitalStatistics {
                doctors,
                patients,
                prescriptions,
            },
            recent_doctors,
            recent_patients,
        })
    }
}
