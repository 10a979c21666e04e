use async_trait::async_trait;
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

/// Entity persistence.
///
/// Implementations own the data invariants that must hold under concurrency:
/// unique emails and license numbers, one admin per hospital, and the
/// reference rules between entities. Violations surface as
/// [`AppError`] with status `409 Conflict`.
///
/// Lookups return `Ok(None)` for a missing row; updates and deletes report a
/// missing row as `None` / `false` rather than an error, so callers decide how
/// to phrase "not found".
///
/// List methods return rows newest first. A `limit` of `None` is unbounded.
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError>;
    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError>;
    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, AppError>;
    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserWithPassword>, AppError>;
    async fn find_credentials(&self, id: UserId) -> Result<Option<UserWithPassword>, AppError>;
    async fn find_hospital_admin(&self, hospital_id: HospitalId)
    -> Result<Option<User>, AppError>;
    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, AppError>;
    async fn update_user(&self, id: UserId, changes: UserChanges)
    -> Result<Option<User>, AppError>;
    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<bool, AppError>;
    async fn delete_user(&self, id: UserId) -> Result<bool, AppError>;

    // Hospitals
    async fn insert_hospital(
        &self,
        hospital: &CreateHospitalDto,
        created_by: UserId,
    ) -> Result<Hospital, AppError>;
    async fn find_hospital(&self, id: HospitalId) -> Result<Option<Hospital>, AppError>;
    async fn find_hospitals(&self, ids: &[HospitalId]) -> Result<Vec<Hospital>, AppError>;
    /// All hospitals, or only `only` when given.
    async fn list_hospitals(&self, only: Option<HospitalId>) -> Result<Vec<Hospital>, AppError>;
    async fn update_hospital(
        &self,
        id: HospitalId,
        changes: &UpdateHospitalDto,
    ) -> Result<Option<Hospital>, AppError>;
    async fn delete_hospital(&self, id: HospitalId) -> Result<bool, AppError>;

    // Doctors
    async fn insert_doctor(&self, doctor: NewDoctor) -> Result<Doctor, AppError>;
    /// Re-inserts a previously deleted profile with its original id and timestamps.
    async fn restore_doctor(&self, doctor: &Doctor) -> Result<Doctor, AppError>;
    async fn find_doctor(&self, id: DoctorId) -> Result<Option<Doctor>, AppError>;
    async fn find_doctor_by_user(&self, user_id: UserId) -> Result<Option<Doctor>, AppError>;
    async fn find_doctors(&self, ids: &[DoctorId]) -> Result<Vec<Doctor>, AppError>;
    async fn list_doctors(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Doctor>, AppError>;
    async fn count_doctors(&self, filter: &RecordFilter) -> Result<i64, AppError>;
    async fn update_doctor(
        &self,
        id: DoctorId,
        changes: &UpdateDoctorDto,
    ) -> Result<Option<Doctor>, AppError>;
    async fn delete_doctor(&self, id: DoctorId) -> Result<bool, AppError>;

    // Patient enrollments
    async fn insert_patient(&self, patient: NewPatient) -> Result<PatientEnrollment, AppError>;
    async fn find_patient(&self, id: PatientId) -> Result<Option<PatientEnrollment>, AppError>;
    async fn list_patients(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<PatientEnrollment>, AppError>;
    async fn count_patients(&self, filter: &RecordFilter) -> Result<i64, AppError>;
    async fn update_patient(
        &self,
        id: PatientId,
        changes: &UpdatePatientDto,
    ) -> Result<Option<PatientEnrollment>, AppError>;
    /// Removes the enrollment and its prescriptions.
    async fn delete_patient(&self, id: PatientId) -> Result<bool, AppError>;

    // Prescriptions
    async fn insert_prescription(
        &self,
        prescription: NewPrescription,
    ) -> Result<Prescription, AppError>;
    async fn find_prescription(&self, id: PrescriptionId)
    -> Result<Option<Prescription>, AppError>;
    async fn list_prescriptions(&self, filter: &RecordFilter)
    -> Result<Vec<Prescription>, AppError>;
    async fn count_prescriptions(&self, filter: &RecordFilter) -> Result<i64, AppError>;
    async fn update_prescription(
        &self,
        id: PrescriptionId,
        changes: &UpdatePrescriptionDto,
    ) -> Result<Option<Prescription>, AppError>;
    async fn delete_prescription(&self, id: PrescriptionId) -> Result<bool, AppError>;
}
