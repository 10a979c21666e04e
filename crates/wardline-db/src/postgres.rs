//! PostgreSQL-backed [`Store`].
//!
//! Uniqueness and reference rules live in the schema (see `migrations/`);
//! constraint violations propagate as `sqlx::Error` and are classified into
//! `409 Conflict` by `AppError`'s conversion.

use async_trait::async_trait;
use sqlx::PgPool;
use wardline_core::{AppError, Role};
use wardline_models::{
    RecordFilter,
    doctors::{Doctor, NewDoctor, UpdateDoctorDto},
    hospitals::{CreateHospitalDto, Hospital, UpdateHospitalDto},
    ids::{DoctorId, HospitalId, PatientId, PrescriptionId, UserId},
    patients::{NewPatient, PatientEnrollment, UpdatePatientDto},
    prescriptions::{NewPrescription, Prescription, UpdatePrescriptionDto},
    users::{NewUser, User, UserChanges, UserWithPassword},
    value_types::Email,
};

use crate::store::Store;

const USER_COLUMNS: &str = "id, name, email, role, hospital_id, created_at, updated_at";
const CREDENTIAL_COLUMNS: &str =
    "id, name, email, role, hospital_id, created_at, updated_at, password_hash";
const HOSPITAL_COLUMNS: &str = "id, name, address, phone, email, website, license_number, \
     established_year, bed_capacity, emergency_contact, description, created_by, created_at, updated_at";
const DOCTOR_COLUMNS: &str =
    "id, name, email, specialization, hospital_id, user_id, created_at, updated_at";
const PATIENT_COLUMNS: &str = "id, name, age, gender, doctor_id, hospital_id, date_of_admission, \
     created_at, updated_at";
const PRESCRIPTION_COLUMNS: &str = "id, patient_enrollment_id, medication, dosage, instructions, \
     doctor_id, hospital_id, created_at, updated_at";

// Each list filter binds as `$1..$3`; a NULL parameter disables its predicate.
const DOCTOR_SCOPE: &str = "($1::uuid IS NULL OR hospital_id = $1) AND ($2::uuid IS NULL OR id = $2)";
const PATIENT_SCOPE: &str = "($1::uuid IS NULL OR hospital_id = $1) \
     AND ($2::uuid IS NULL OR doctor_id = $2) AND ($3::uuid IS NULL OR id = $3)";
const PRESCRIPTION_SCOPE: &str = "($1::uuid IS NULL OR hospital_id = $1) \
     AND ($2::uuid IS NULL OR doctor_id = $2) AND ($3::uuid IS NULL OR patient_enrollment_id = $3)";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (id, name, email, password_hash, role, hospital_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(UserId::new())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(user.hospital_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserWithPassword>, AppError> {
        let sql = format!("SELECT {CREDENTIAL_COLUMNS} FROM users WHERE email = $1");
        let creds = sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(creds)
    }

    async fn find_credentials(&self, id: UserId) -> Result<Option<UserWithPassword>, AppError> {
        let sql = format!("SELECT {CREDENTIAL_COLUMNS} FROM users WHERE id = $1");
        let creds = sqlx::query_as::<_, UserWithPassword>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(creds)
    }

    async fn find_hospital_admin(
        &self,
        hospital_id: HospitalId,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE hospital_id = $1 AND role = $2 LIMIT 1"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(hospital_id)
            .bind(Role::HospitalAdmin)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, AppError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at DESC, id"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(role)
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn update_user(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, AppError> {
        let sql = format!(
            "UPDATE users SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                hospital_id = COALESCE($4, hospital_id), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {USER_COLUMNS}"
        );
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(changes.name)
            .bind(changes.email)
            .bind(changes.hospital_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_hospital(
        &self,
        hospital: &CreateHospitalDto,
        created_by: UserId,
    ) -> Result<Hospital, AppError> {
        let sql = format!(
            "INSERT INTO hospitals (id, name, address, phone, email, website, license_number, \
                established_year, bed_capacity, emergency_contact, description, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {HOSPITAL_COLUMNS}"
        );
        let hospital = sqlx::query_as::<_, Hospital>(&sql)
            .bind(HospitalId::new())
            .bind(&hospital.name)
            .bind(&hospital.address)
            .bind(&hospital.phone)
            .bind(&hospital.email)
            .bind(&hospital.website)
            .bind(&hospital.license_number)
            .bind(hospital.established_year)
            .bind(hospital.bed_capacity)
            .bind(&hospital.emergency_contact)
            .bind(&hospital.description)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;
        Ok(hospital)
    }

    async fn find_hospital(&self, id: HospitalId) -> Result<Option<Hospital>, AppError> {
        let sql = format!("SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE id = $1");
        let hospital = sqlx::query_as::<_, Hospital>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hospital)
    }

    async fn find_hospitals(&self, ids: &[HospitalId]) -> Result<Vec<Hospital>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {HOSPITAL_COLUMNS} FROM hospitals WHERE id = ANY($1)");
        let hospitals = sqlx::query_as::<_, Hospital>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(hospitals)
    }

    async fn list_hospitals(&self, only: Option<HospitalId>) -> Result<Vec<Hospital>, AppError> {
        let sql = format!(
            "SELECT {HOSPITAL_COLUMNS} FROM hospitals \
             WHERE ($1::uuid IS NULL OR id = $1) ORDER BY created_at DESC, id"
        );
        let hospitals = sqlx::query_as::<_, Hospital>(&sql)
            .bind(only)
            .fetch_all(&self.pool)
            .await?;
        Ok(hospitals)
    }

    async fn update_hospital(
        &self,
        id: HospitalId,
        changes: &UpdateHospitalDto,
    ) -> Result<Option<Hospital>, AppError> {
        let sql = format!(
            "UPDATE hospitals SET \
                name = COALESCE($2, name), \
                address = COALESCE($3, address), \
                phone = COALESCE($4, phone), \
                email = COALESCE($5, email), \
                website = COALESCE($6, website), \
                license_number = COALESCE($7, license_number), \
                established_year = COALESCE($8, established_year), \
                bed_capacity = COALESCE($9, bed_capacity), \
                emergency_contact = COALESCE($10, emergency_contact), \
                description = COALESCE($11, description), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {HOSPITAL_COLUMNS}"
        );
        let hospital = sqlx::query_as::<_, Hospital>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.address)
            .bind(&changes.phone)
            .bind(&changes.email)
            .bind(&changes.website)
            .bind(&changes.license_number)
            .bind(changes.established_year)
            .bind(changes.bed_capacity)
            .bind(&changes.emergency_contact)
            .bind(&changes.description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(hospital)
    }

    async fn delete_hospital(&self, id: HospitalId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM hospitals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_doctor(&self, doctor: NewDoctor) -> Result<Doctor, AppError> {
        let sql = format!(
            "INSERT INTO doctors (id, name, email, specialization, hospital_id, user_id) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {DOCTOR_COLUMNS}"
        );
        let doctor = sqlx::query_as::<_, Doctor>(&sql)
            .bind(DoctorId::new())
            .bind(&doctor.name)
            .bind(&doctor.email)
            .bind(&doctor.specialization)
            .bind(doctor.hospital_id)
            .bind(doctor.user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(doctor)
    }

    async fn restore_doctor(&self, doctor: &Doctor) -> Result<Doctor, AppError> {
        let sql = format!(
            "INSERT INTO doctors ({DOCTOR_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {DOCTOR_COLUMNS}"
        );
        let doctor = sqlx::query_as::<_, Doctor>(&sql)
            .bind(doctor.id)
            .bind(&doctor.name)
            .bind(&doctor.email)
            .bind(&doctor.specialization)
            .bind(doctor.hospital_id)
            .bind(doctor.user_id)
            .bind(doctor.created_at)
            .bind(doctor.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(doctor)
    }

    async fn find_doctor(&self, id: DoctorId) -> Result<Option<Doctor>, AppError> {
        let sql = format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = $1");
        let doctor = sqlx::query_as::<_, Doctor>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doctor)
    }

    async fn find_doctor_by_user(&self, user_id: UserId) -> Result<Option<Doctor>, AppError> {
        let sql = format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE user_id = $1");
        let doctor = sqlx::query_as::<_, Doctor>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doctor)
    }

    async fn find_doctors(&self, ids: &[DoctorId]) -> Result<Vec<Doctor>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = ANY($1)");
        let doctors = sqlx::query_as::<_, Doctor>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(doctors)
    }

    async fn list_doctors(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Doctor>, AppError> {
        let sql = format!(
            "SELECT {DOCTOR_COLUMNS} FROM doctors WHERE {DOCTOR_SCOPE} \
             ORDER BY created_at DESC, id LIMIT $3"
        );
        let doctors = sqlx::query_as::<_, Doctor>(&sql)
            .bind(filter.hospital_id)
            .bind(filter.doctor_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(doctors)
    }

    async fn count_doctors(&self, filter: &RecordFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM doctors WHERE {DOCTOR_SCOPE}");
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.hospital_id)
            .bind(filter.doctor_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update_doctor(
        &self,
        id: DoctorId,
        changes: &UpdateDoctorDto,
    ) -> Result<Option<Doctor>, AppError> {
        let sql = format!(
            "UPDATE doctors SET \
                name = COALESCE($2, name), \
                specialization = COALESCE($3, specialization), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {DOCTOR_COLUMNS}"
        );
        let doctor = sqlx::query_as::<_, Doctor>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.specialization)
            .fetch_optional(&self.pool)
            .await?;
        Ok(doctor)
    }

    async fn delete_doctor(&self, id: DoctorId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_patient(&self, patient: NewPatient) -> Result<PatientEnrollment, AppError> {
        let sql = format!(
            "INSERT INTO patient_enrollments \
                (id, name, age, gender, doctor_id, hospital_id, date_of_admission) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {PATIENT_COLUMNS}"
        );
        let patient = sqlx::query_as::<_, PatientEnrollment>(&sql)
            .bind(PatientId::new())
            .bind(&patient.name)
            .bind(patient.age)
            .bind(patient.gender)
            .bind(patient.doctor_id)
            .bind(patient.hospital_id)
            .bind(patient.date_of_admission)
            .fetch_one(&self.pool)
            .await?;
        Ok(patient)
    }

    async fn find_patient(&self, id: PatientId) -> Result<Option<PatientEnrollment>, AppError> {
        let sql = format!("SELECT {PATIENT_COLUMNS} FROM patient_enrollments WHERE id = $1");
        let patient = sqlx::query_as::<_, PatientEnrollment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(patient)
    }

    async fn list_patients(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<PatientEnrollment>, AppError> {
        let sql = format!(
            "SELECT {PATIENT_COLUMNS} FROM patient_enrollments WHERE {PATIENT_SCOPE} \
             ORDER BY created_at DESC, id LIMIT $4"
        );
        let patients = sqlx::query_as::<_, PatientEnrollment>(&sql)
            .bind(filter.hospital_id)
            .bind(filter.doctor_id)
            .bind(filter.patient_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(patients)
    }

    async fn count_patients(&self, filter: &RecordFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM patient_enrollments WHERE {PATIENT_SCOPE}");
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.hospital_id)
            .bind(filter.doctor_id)
            .bind(filter.patient_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update_patient(
        &self,
        id: PatientId,
        changes: &UpdatePatientDto,
    ) -> Result<Option<PatientEnrollment>, AppError> {
        let sql = format!(
            "UPDATE patient_enrollments SET \
                name = COALESCE($2, name), \
                age = COALESCE($3, age), \
                gender = COALESCE($4, gender), \
                date_of_admission = COALESCE($5, date_of_admission), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {PATIENT_COLUMNS}"
        );
        let patient = sqlx::query_as::<_, PatientEnrollment>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(changes.age)
            .bind(changes.gender)
            .bind(changes.date_of_admission)
            .fetch_optional(&self.pool)
            .await?;
        Ok(patient)
    }

    async fn delete_patient(&self, id: PatientId) -> Result<bool, AppError> {
        // prescriptions follow via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM patient_enrollments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn insert_prescription(
        &self,
        prescription: NewPrescription,
    ) -> Result<Prescription, AppError> {
        let sql = format!(
            "INSERT INTO prescriptions \
                (id, patient_enrollment_id, medication, dosage, instructions, doctor_id, hospital_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {PRESCRIPTION_COLUMNS}"
        );
        let prescription = sqlx::query_as::<_, Prescription>(&sql)
            .bind(PrescriptionId::new())
            .bind(prescription.patient_enrollment_id)
            .bind(&prescription.medication)
            .bind(&prescription.dosage)
            .bind(&prescription.instructions)
            .bind(prescription.doctor_id)
            .bind(prescription.hospital_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(prescription)
    }

    async fn find_prescription(
        &self,
        id: PrescriptionId,
    ) -> Result<Option<Prescription>, AppError> {
        let sql = format!("SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE id = $1");
        let prescription = sqlx::query_as::<_, Prescription>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(prescription)
    }

    async fn list_prescriptions(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<Prescription>, AppError> {
        let sql = format!(
            "SELECT {PRESCRIPTION_COLUMNS} FROM prescriptions WHERE {PRESCRIPTION_SCOPE} \
             ORDER BY created_at DESC, id"
        );
        let prescriptions = sqlx::query_as::<_, Prescription>(&sql)
            .bind(filter.hospital_id)
            .bind(filter.doctor_id)
            .bind(filter.patient_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(prescriptions)
    }

    async fn count_prescriptions(&self, filter: &RecordFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM prescriptions WHERE {PRESCRIPTION_SCOPE}");
        let count = sqlx::query_scalar::<_, i64>(&sql)
            .bind(filter.hospital_id)
            .bind(filter.doctor_id)
            .bind(filter.patient_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update_prescription(
        &self,
        id: PrescriptionId,
        changes: &UpdatePrescriptionDto,
    ) -> Result<Option<Prescription>, AppError> {
        let sql = format!(
            "UPDATE prescriptions SET \
                medication = COALESCE($2, medication), \
                dosage = COALESCE($3, dosage), \
                instructions = COALESCE($4, instructions), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING {PRESCRIPTION_COLUMNS}"
        );
        let prescription = sqlx::query_as::<_, Prescription>(&sql)
            .bind(id)
            .bind(&changes.medication)
            .bind(&changes.dosage)
            .bind(&changes.instructions)
            .fetch_optional(&self.pool)
            .await?;
        Ok(prescription)
    }

    async fn delete_prescription(&self, id: PrescriptionId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM prescriptions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
