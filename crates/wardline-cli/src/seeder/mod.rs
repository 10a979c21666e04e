//! Demo data: hospitals, one admin per hospital, doctors and their patients.

pub mod generate;
pub mod models;

use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;
use wardline_core::{AppError, Role, hash_password};
use wardline_db::{DoctorProfile, Store, provision_doctor};
use wardline_models::{
    hospitals::CreateHospitalDto,
    ids::HospitalId,
    patients::NewPatient,
    users::NewUser,
    value_types::Email,
};

pub use self::models::{SeedConfig, SeedSummary};

/// Password of every seeded account.
pub const SEED_PASSWORD: &str = "password123";

fn email(value: &str) -> Result<Email, AppError> {
    Email::new(value).map_err(|e| AppError::internal_error(format!("Generated bad email: {e}")))
}

/// Seeds everything described by `config`. Hospitals are stamped as created
/// by the oldest super admin, so one must exist.
pub async fn seed_all(store: &dyn Store, config: SeedConfig) -> Result<SeedSummary, AppError> {
    let start_time = Instant::now();
    let creator = store
        .list_users_by_role(Role::SuperAdmin)
        .await?
        .into_iter()
        .min_by_key(|user| user.created_at)
        .ok_or_else(|| {
            AppError::bad_request("No super admin found. Run `create-super-admin` first.")
        })?;

    let tag = Uuid::new_v4().simple().to_string()[..6].to_string();
    let password_hash = hash_password(SEED_PASSWORD)?;
    let mut summary = SeedSummary::default();

    println!("🏥 Seeding {} hospitals...", config.hospitals);
    for (idx, seed) in generate::generate_hospitals(config.hospitals, &tag)
        .into_iter()
        .enumerate()
    {
        let hospital = store
            .insert_hospital(
                &CreateHospitalDto {
                    name: seed.name,
                    address: seed.address,
                    phone: seed.phone,
                    email: seed.email,
                    website: None,
                    license_number: seed.license_number,
                    established_year: seed.established_year,
                    bed_capacity: seed.bed_capacity,
                    emergency_contact: seed.emergency_contact,
                    description: None,
                },
                creator.id,
            )
            .await?;
        summary.hospitals += 1;

        seed_staff(store, &config, &tag, idx, hospital.id, &password_hash, &mut summary).await?;
    }

    println!(
        "   ✓ {} hospitals, {} admins, {} doctors, {} patients in {:?}",
        summary.hospitals,
        summary.admins,
        summary.doctors,
        summary.patients,
        start_time.elapsed()
    );
    Ok(summary)
}

async fn seed_staff(
    store: &dyn Store,
    config: &SeedConfig,
    tag: &str,
    group: usize,
    hospital_id: HospitalId,
    password_hash: &str,
    summary: &mut SeedSummary,
) -> Result<(), AppError> {
    for admin in generate::generate_staff(1, group, "admin", tag) {
        store
            .insert_user(NewUser {
                name: admin.name,
                email: email(&admin.email)?,
                password_hash: password_hash.to_string(),
                role: Role::HospitalAdmin,
                hospital_id: Some(hospital_id),
            })
            .await?;
        summary.admins += 1;
    }

    for staff in generate::generate_staff(config.doctors_per_hospital, group, "doctor", tag) {
        let (_, doctor) = provision_doctor(
            store,
            DoctorProfile {
                name: staff.name,
                email: email(&staff.email)?,
                specialization: staff.specialization,
                hospital_id,
                password_hash: password_hash.to_string(),
            },
        )
        .await?;
        summary.doctors += 1;

        for patient in generate::generate_patients(config.patients_per_doctor) {
            store
                .insert_patient(NewPatient {
                    name: patient.name,
                    age: patient.age,
                    gender: patient.gender,
                    doctor_id: doctor.id,
                    hospital_id,
                    date_of_admission: Utc::now(),
                })
                .await?;
            summary.patients += 1;
        }
    }

    Ok(())
}
