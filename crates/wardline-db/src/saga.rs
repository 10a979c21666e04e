//! Doctor lifecycle writes that span the `users` and `doctors` tables.
//!
//! A doctor and their DOCTOR account are written as two separate store calls.
//! Each function here undoes its first write when the second one fails, so a
//! failure never leaves a doctor without an account or the two names out of
//! step. A failed compensation is logged and the original error is returned.

use tracing::{error, warn};
use wardline_core::{AppError, Role};
use wardline_models::{
    doctors::{Doctor, NewDoctor, UpdateDoctorDto},
    ids::HospitalId,
    users::{NewUser, User, UserChanges},
    value_types::Email,
};

use crate::Store;

/// Everything needed to create a doctor together with their login account.
#[derive(Debug, Clone)]
pub struct DoctorProfile {
    pub name: String,
    pub email: Email,
    pub specialization: String,
    pub hospital_id: HospitalId,
    pub password_hash: String,
}

/// Inserts the backing user, then the doctor row. The user is removed again
/// when the doctor insert fails.
pub async fn provision_doctor(
    store: &dyn Store,
    profile: DoctorProfile,
) -> Result<(User, Doctor), AppError> {
    let user = store
        .insert_user(NewUser {
            name: profile.name.clone(),
            email: profile.email.clone(),
            password_hash: profile.password_hash,
            role: Role::Doctor,
            hospital_id: Some(profile.hospital_id),
        })
        .await?;

    let inserted = store
        .insert_doctor(NewDoctor {
            name: profile.name,
            email: profile.email,
            specialization: profile.specialization,
            hospital_id: profile.hospital_id,
            user_id: user.id,
        })
        .await;

    match inserted {
        Ok(doctor) => Ok((user, doctor)),
        Err(err) => {
            warn!(user.id = %user.id, error = %err.message(), "Doctor insert failed, removing user");
            if let Err(rollback) = store.delete_user(user.id).await {
                error!(user.id = %user.id, error = %rollback.message(), "Failed to roll back doctor user");
            }
            Err(err)
        }
    }
}

/// Applies `changes` to `current` and mirrors a new name onto the account.
/// The previous name and specialization are written back when the account
/// update fails. `None` means the doctor no longer exists.
pub async fn update_doctor_profile(
    store: &dyn Store,
    current: &Doctor,
    changes: &UpdateDoctorDto,
) -> Result<Option<Doctor>, AppError> {
    let Some(updated) = store.update_doctor(current.id, changes).await? else {
        return Ok(None);
    };

    let Some(name) = changes.name.clone() else {
        return Ok(Some(updated));
    };

    let mirrored = store
        .update_user(
            current.user_id,
            UserChanges {
                name: Some(name),
                ..UserChanges::default()
            },
        )
        .await;

    if let Err(err) = mirrored {
        warn!(doctor.id = %current.id, error = %err.message(), "User update failed, restoring doctor");
        let previous = UpdateDoctorDto {
            name: Some(current.name.clone()),
            specialization: Some(current.specialization.clone()),
        };
        if let Err(rollback) = store.update_doctor(current.id, &previous).await {
            error!(doctor.id = %current.id, error = %rollback.message(), "Failed to restore doctor");
        }
        return Err(err);
    }

    Ok(Some(updated))
}

/// Deletes the doctor, then their account. The doctor row is restored when
/// the account cannot be removed. `false` means the doctor was already gone.
pub async fn remove_doctor(store: &dyn Store, doctor: &Doctor) -> Result<bool, AppError> {
    if !store.delete_doctor(doctor.id).await? {
        return Ok(false);
    }

    if let Err(err) = store.delete_user(doctor.user_id).await {
        warn!(doctor.id = %doctor.id, error = %err.message(), "User delete failed, restoring doctor");
        if let Err(rollback) = store.restore_doctor(doctor).await {
            error!(doctor.id = %doctor.id, error = %rollback.message(), "Failed to restore doctor");
        }
        return Err(err);
    }

    Ok(true)
}
