//! In-process [`Store`] for tests and demos.
//!
//! Every mutation takes the single write lock, checks the same uniqueness and
//! reference rules as the PostgreSQL schema, and only then writes. Two
//! concurrent admin creations for one hospital therefore serialize and the
//! second one sees the first.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;
use wardline_core::{AppError, Role, errors::unique_violation_message};
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

/// Operations that can be made to fail once, to exercise compensation paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    InsertDoctor,
    DeleteUser,
    UpdateUser,
}

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, UserWithPassword>,
    hospitals: HashMap<HospitalId, Hospital>,
    doctors: HashMap<DoctorId, Doctor>,
    patients: HashMap<PatientId, PatientEnrollment>,
    prescriptions: HashMap<PrescriptionId, Prescription>,
    armed: HashSet<FailPoint>,
}

impl Tables {
    fn trip(&mut self, point: FailPoint) -> Result<(), AppError> {
        if self.armed.remove(&point) {
            return Err(AppError::internal_error(format!(
                "injected failure at {point:?}"
            )));
        }
        Ok(())
    }

    fn check_user_invariants(
        &self,
        id: Option<UserId>,
        email: &Email,
        role: Role,
        hospital_id: Option<HospitalId>,
    ) -> Result<(), AppError> {
        let others = || self.users.values().filter(move |row| Some(row.user.id) != id);

        if others().any(|row| row.user.email == *email) {
            return Err(AppError::conflict(unique_violation_message(Some(
                "users_email_key",
            ))));
        }
        if role.requires_hospital() && hospital_id.is_none() {
            return Err(AppError::bad_request("Validation Error"));
        }
        if let Some(hospital_id) = hospital_id {
            if !self.hospitals.contains_key(&hospital_id) {
                return Err(AppError::linked_records());
            }
            if role == Role::HospitalAdmin
                && others().any(|row| {
                    row.user.role == Role::HospitalAdmin
                        && row.user.hospital_id == Some(hospital_id)
                })
            {
                return Err(AppError::conflict(unique_violation_message(Some(
                    "users_one_admin_per_hospital",
                ))));
            }
        }
        Ok(())
    }

    fn check_doctor_invariants(&self, id: DoctorId, doctor: &NewDoctor) -> Result<(), AppError> {
        let others = || self.doctors.values().filter(move |d| d.id != id);
        if others().any(|d| d.email == doctor.email) {
            return Err(AppError::conflict(unique_violation_message(Some(
                "doctors_email_key",
            ))));
        }
        if others().any(|d| d.user_id == doctor.user_id) {
            return Err(AppError::conflict(unique_violation_message(Some(
                "doctors_user_id_key",
            ))));
        }
        if !self.hospitals.contains_key(&doctor.hospital_id)
            || !self.users.contains_key(&doctor.user_id)
        {
            return Err(AppError::linked_records());
        }
        Ok(())
    }

    fn check_license(&self, id: HospitalId, license_number: &str) -> Result<(), AppError> {
        if self
            .hospitals
            .values()
            .any(|h| h.id != id && h.license_number == license_number)
        {
            return Err(AppError::conflict(unique_violation_message(Some(
                "hospitals_license_number_key",
            ))));
        }
        Ok(())
    }

    fn doctors_matching(&self, filter: &RecordFilter) -> Vec<Doctor> {
        self.doctors
            .values()
            .filter(|d| filter.matches(d.hospital_id, Some(d.id), None))
            .cloned()
            .collect()
    }

    fn patients_matching(&self, filter: &RecordFilter) -> Vec<PatientEnrollment> {
        self.patients
            .values()
            .filter(|p| filter.matches(p.hospital_id, Some(p.doctor_id), Some(p.id)))
            .cloned()
            .collect()
    }

    fn prescriptions_matching(&self, filter: &RecordFilter) -> Vec<Prescription> {
        self.prescriptions
            .values()
            .filter(|p| {
                filter.matches(
                    p.hospital_id,
                    Some(p.doctor_id),
                    Some(p.patient_enrollment_id),
                )
            })
            .cloned()
            .collect()
    }
}

fn newest_first<T>(mut rows: Vec<T>, key: impl Fn(&T) -> (DateTime<Utc>, Uuid)) -> Vec<T> {
    rows.sort_by(|a, b| {
        let (a_at, a_id) = key(a);
        let (b_at, b_id) = key(b);
        b_at.cmp(&a_at).then(a_id.cmp(&b_id))
    });
    rows
}

fn take<T>(rows: Vec<T>, limit: Option<i64>) -> Vec<T> {
    rows.into_iter()
        .take(limit.map_or(usize::MAX, |l| l.max(0) as usize))
        .collect()
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next call to `point` fail with an internal error.
    pub async fn fail_next(&self, point: FailPoint) {
        self.tables.write().await.armed.insert(point);
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn doctor_count(&self) -> usize {
        self.tables.read().await.doctors.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        tables.check_user_invariants(None, &user.email, user.role, user.hospital_id)?;

        let now = Utc::now();
        let row = UserWithPassword {
            user: User {
                id: UserId::new(),
                name: user.name,
                email: user.email,
                role: user.role,
                hospital_id: user.hospital_id,
                created_at: now,
                updated_at: now,
            },
            password_hash: user.password_hash,
        };
        let created = row.user.clone();
        tables.users.insert(created.id, row);
        Ok(created)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).map(|row| row.user.clone()))
    }

    async fn find_user_by_email(&self, email: &Email) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|row| row.user.email == *email)
            .map(|row| row.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserWithPassword>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|row| row.user.email == *email)
            .cloned())
    }

    async fn find_credentials(&self, id: UserId) -> Result<Option<UserWithPassword>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn find_hospital_admin(
        &self,
        hospital_id: HospitalId,
    ) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|row| {
                row.user.role == Role::HospitalAdmin && row.user.hospital_id == Some(hospital_id)
            })
            .map(|row| row.user.clone()))
    }

    async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, AppError> {
        let tables = self.tables.read().await;
        let users = tables
            .users
            .values()
            .filter(|row| row.user.role == role)
            .map(|row| row.user.clone())
            .collect();
        Ok(newest_first(users, |u: &User| (u.created_at, u.id.into_inner())))
    }

    async fn update_user(
        &self,
        id: UserId,
        changes: UserChanges,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.tables.write().await;
        tables.trip(FailPoint::UpdateUser)?;
        let Some(current) = tables.users.get(&id).map(|row| row.user.clone()) else {
            return Ok(None);
        };

        let email = changes.email.unwrap_or(current.email);
        let hospital_id = changes.hospital_id.or(current.hospital_id);
        tables.check_user_invariants(Some(id), &email, current.role, hospital_id)?;

        let Some(row) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            row.user.name = name;
        }
        row.user.email = email;
        row.user.hospital_id = hospital_id;
        row.user.updated_at = Utc::now();
        Ok(Some(row.user.clone()))
    }

    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&id) {
            Some(row) => {
                row.password_hash = password_hash.to_string();
                row.user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_user(&self, id: UserId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        tables.trip(FailPoint::DeleteUser)?;
        if tables.doctors.values().any(|d| d.user_id == id) {
            return Err(AppError::linked_records());
        }
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        for hospital in tables.hospitals.values_mut() {
            if hospital.created_by == Some(id) {
                hospital.created_by = None;
            }
        }
        Ok(true)
    }

    async fn insert_hospital(
        &self,
        hospital: &CreateHospitalDto,
        created_by: UserId,
    ) -> Result<Hospital, AppError> {
        let mut tables = self.tables.write().await;
        let id = HospitalId::new();
        tables.check_license(id, &hospital.license_number)?;
        if !tables.users.contains_key(&created_by) {
            return Err(AppError::linked_records());
        }

        let now = Utc::now();
        let created = Hospital {
            id,
            name: hospital.name.clone(),
            address: hospital.address.clone(),
            phone: hospital.phone.clone(),
            email: hospital.email.clone(),
            website: hospital.website.clone(),
            license_number: hospital.license_number.clone(),
            established_year: hospital.established_year,
            bed_capacity: hospital.bed_capacity,
            emergency_contact: hospital.emergency_contact.clone(),
            description: hospital.description.clone(),
            created_by: Some(created_by),
            created_at: now,
            updated_at: now,
        };
        tables.hospitals.insert(id, created.clone());
        Ok(created)
    }

    async fn find_hospital(&self, id: HospitalId) -> Result<Option<Hospital>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.hospitals.get(&id).cloned())
    }

    async fn find_hospitals(&self, ids: &[HospitalId]) -> Result<Vec<Hospital>, AppError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .filter_map(|id| tables.hospitals.get(id).cloned())
            .collect())
    }

    async fn list_hospitals(&self, only: Option<HospitalId>) -> Result<Vec<Hospital>, AppError> {
        let tables = self.tables.read().await;
        let hospitals = tables
            .hospitals
            .values()
            .filter(|h| only.is_none_or(|id| h.id == id))
            .cloned()
            .collect();
        Ok(newest_first(hospitals, |h: &Hospital| {
            (h.created_at, h.id.into_inner())
        }))
    }

    async fn update_hospital(
        &self,
        id: HospitalId,
        changes: &UpdateHospitalDto,
    ) -> Result<Option<Hospital>, AppError> {
        let mut tables = self.tables.write().await;
        if let Some(license_number) = &changes.license_number {
            tables.check_license(id, license_number)?;
        }
        Ok(tables.hospitals.get_mut(&id).map(|hospital| {
            hospital.apply(changes);
            hospital.updated_at = Utc::now();
            hospital.clone()
        }))
    }

    async fn delete_hospital(&self, id: HospitalId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let referenced = tables
            .users
            .values()
            .any(|row| row.user.hospital_id == Some(id))
            || tables.doctors.values().any(|d| d.hospital_id == id)
            || tables.patients.values().any(|p| p.hospital_id == id)
            || tables.prescriptions.values().any(|p| p.hospital_id == id);
        if referenced {
            return Err(AppError::linked_records());
        }
        Ok(tables.hospitals.remove(&id).is_some())
    }

    async fn insert_doctor(&self, doctor: NewDoctor) -> Result<Doctor, AppError> {
        let mut tables = self.tables.write().await;
        tables.trip(FailPoint::InsertDoctor)?;
        let id = DoctorId::new();
        tables.check_doctor_invariants(id, &doctor)?;

        let now = Utc::now();
        let created = Doctor {
            id,
            name: doctor.name,
            email: doctor.email,
            specialization: doctor.specialization,
            hospital_id: doctor.hospital_id,
            user_id: doctor.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.doctors.insert(id, created.clone());
        Ok(created)
    }

    async fn restore_doctor(&self, doctor: &Doctor) -> Result<Doctor, AppError> {
        let mut tables = self.tables.write().await;
        if tables.doctors.contains_key(&doctor.id) {
            return Err(AppError::conflict("Duplicate field value: id already exists"));
        }
        let as_new = NewDoctor {
            name: doctor.name.clone(),
            email: doctor.email.clone(),
            specialization: doctor.specialization.clone(),
            hospital_id: doctor.hospital_id,
            user_id: doctor.user_id,
        };
        tables.check_doctor_invariants(doctor.id, &as_new)?;
        tables.doctors.insert(doctor.id, doctor.clone());
        Ok(doctor.clone())
    }

    async fn find_doctor(&self, id: DoctorId) -> Result<Option<Doctor>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.doctors.get(&id).cloned())
    }

    async fn find_doctor_by_user(&self, user_id: UserId) -> Result<Option<Doctor>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .doctors
            .values()
            .find(|d| d.user_id == user_id)
            .cloned())
    }

    async fn find_doctors(&self, ids: &[DoctorId]) -> Result<Vec<Doctor>, AppError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .filter_map(|id| tables.doctors.get(id).cloned())
            .collect())
    }

    async fn list_doctors(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Doctor>, AppError> {
        let tables = self.tables.read().await;
        let doctors = newest_first(tables.doctors_matching(filter), |d: &Doctor| {
            (d.created_at, d.id.into_inner())
        });
        Ok(take(doctors, limit))
    }

    async fn count_doctors(&self, filter: &RecordFilter) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.doctors_matching(filter).len() as i64)
    }

    async fn update_doctor(
        &self,
        id: DoctorId,
        changes: &UpdateDoctorDto,
    ) -> Result<Option<Doctor>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.doctors.get_mut(&id).map(|doctor| {
            doctor.apply(changes);
            doctor.updated_at = Utc::now();
            doctor.clone()
        }))
    }

    async fn delete_doctor(&self, id: DoctorId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        let referenced = tables.patients.values().any(|p| p.doctor_id == id)
            || tables.prescriptions.values().any(|p| p.doctor_id == id);
        if referenced {
            return Err(AppError::linked_records());
        }
        Ok(tables.doctors.remove(&id).is_some())
    }

    async fn insert_patient(&self, patient: NewPatient) -> Result<PatientEnrollment, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.doctors.contains_key(&patient.doctor_id)
            || !tables.hospitals.contains_key(&patient.hospital_id)
        {
            return Err(AppError::linked_records());
        }

        let now = Utc::now();
        let created = PatientEnrollment {
            id: PatientId::new(),
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
            doctor_id: patient.doctor_id,
            hospital_id: patient.hospital_id,
            date_of_admission: patient.date_of_admission,
            created_at: now,
            updated_at: now,
        };
        tables.patients.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_patient(&self, id: PatientId) -> Result<Option<PatientEnrollment>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.patients.get(&id).cloned())
    }

    async fn list_patients(
        &self,
        filter: &RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<PatientEnrollment>, AppError> {
        let tables = self.tables.read().await;
        let patients = newest_first(tables.patients_matching(filter), |p: &PatientEnrollment| {
            (p.created_at, p.id.into_inner())
        });
        Ok(take(patients, limit))
    }

    async fn count_patients(&self, filter: &RecordFilter) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.patients_matching(filter).len() as i64)
    }

    async fn update_patient(
        &self,
        id: PatientId,
        changes: &UpdatePatientDto,
    ) -> Result<Option<PatientEnrollment>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.patients.get_mut(&id).map(|patient| {
            patient.apply(changes);
            patient.updated_at = Utc::now();
            patient.clone()
        }))
    }

    async fn delete_patient(&self, id: PatientId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.patients.remove(&id).is_none() {
            return Ok(false);
        }
        tables
            .prescriptions
            .retain(|_, p| p.patient_enrollment_id != id);
        Ok(true)
    }

    async fn insert_prescription(
        &self,
        prescription: NewPrescription,
    ) -> Result<Prescription, AppError> {
        let mut tables = self.tables.write().await;
        if !tables
            .patients
            .contains_key(&prescription.patient_enrollment_id)
            || !tables.doctors.contains_key(&prescription.doctor_id)
            || !tables.hospitals.contains_key(&prescription.hospital_id)
        {
            return Err(AppError::linked_records());
        }

        let now = Utc::now();
        let created = Prescription {
            id: PrescriptionId::new(),
            patient_enrollment_id: prescription.patient_enrollment_id,
            medication: prescription.medication,
            dosage: prescription.dosage,
            instructions: prescription.instructions,
            doctor_id: prescription.doctor_id,
            hospital_id: prescription.hospital_id,
            created_at: now,
            updated_at: now,
        };
        tables.prescriptions.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_prescription(
        &self,
        id: PrescriptionId,
    ) -> Result<Option<Prescription>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.prescriptions.get(&id).cloned())
    }

    async fn list_prescriptions(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<Prescription>, AppError> {
        let tables = self.tables.read().await;
        Ok(newest_first(
            tables.prescriptions_matching(filter),
            |p: &Prescription| (p.created_at, p.id.into_inner()),
        ))
    }

    async fn count_prescriptions(&self, filter: &RecordFilter) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.prescriptions_matching(filter).len() as i64)
    }

    async fn update_prescription(
        &self,
        id: PrescriptionId,
        changes: &UpdatePrescriptionDto,
    ) -> Result<Option<Prescription>, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.prescriptions.get_mut(&id).map(|prescription| {
            prescription.apply(changes);
            prescription.updated_at = Utc::now();
            prescription.clone()
        }))
    }

    async fn delete_prescription(&self, id: PrescriptionId) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        Ok(tables.prescriptions.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wardline_models::patients::Gender;

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn new_user(address: &str, role: Role, hospital_id: Option<HospitalId>) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email(address),
            password_hash: "hash".to_string(),
            role,
            hospital_id,
        }
    }

    fn hospital_dto(license: &str) -> CreateHospitalDto {
        CreateHospitalDto {
            name: "General".to_string(),
            address: "1 Main St".to_string(),
            phone: "555".to_string(),
            email: "info@general.org".to_string(),
            website: None,
            license_number: license.to_string(),
            established_year: 1990,
            bed_capacity: 100,
            emergency_contact: "911".to_string(),
            description: None,
        }
    }

    async fn seeded() -> (MemoryStore, User, Hospital) {
        let store = MemoryStore::new();
        let admin = store
            .insert_user(new_user("root@wardline.io", Role::SuperAdmin, None))
            .await
            .unwrap();
        let hospital = store
            .insert_hospital(&hospital_dto("LIC-1"), admin.id)
            .await
            .unwrap();
        (store, admin, hospital)
    }

    async fn add_doctor(store: &MemoryStore, hospital_id: HospitalId, address: &str) -> Doctor {
        let user = store
            .insert_user(new_user(address, Role::Doctor, Some(hospital_id)))
            .await
            .unwrap();
        store
            .insert_doctor(NewDoctor {
                name: "Dr. Test".to_string(),
                email: email(address),
                specialization: "General".to_string(),
                hospital_id,
                user_id: user.id,
            })
            .await
            .unwrap()
    }

    async fn add_patient(store: &MemoryStore, doctor: &Doctor) -> PatientEnrollment {
        store
            .insert_patient(NewPatient {
                name: "Pat".to_string(),
                age: 30,
                gender: Gender::Female,
                doctor_id: doctor.id,
                hospital_id: doctor.hospital_id,
                date_of_admission: Utc::now(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let (store, _, _) = seeded().await;
        let err = store
            .insert_user(new_user("ROOT@wardline.io", Role::SuperAdmin, None))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
    }

    #[tokio::test]
    async fn duplicate_license_is_conflict() {
        let (store, admin, hospital) = seeded().await;
        let err = store
            .insert_hospital(&hospital_dto("LIC-1"), admin.id)
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
        assert!(err.message().contains("licenseNumber"));

        // updating a hospital to its own license is not a conflict
        let changes = UpdateHospitalDto {
            license_number: Some("LIC-1".into()),
            ..Default::default()
        };
        assert!(store.update_hospital(hospital.id, &changes).await.is_ok());
    }

    #[tokio::test]
    async fn one_admin_per_hospital() {
        let (store, _, hospital) = seeded().await;
        store
            .insert_user(new_user("a1@h.io", Role::HospitalAdmin, Some(hospital.id)))
            .await
            .unwrap();
        let err = store
            .insert_user(new_user("a2@h.io", Role::HospitalAdmin, Some(hospital.id)))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "This hospital already has an admin");
    }

    #[tokio::test]
    async fn concurrent_admin_creation_admits_one() {
        let (store, _, hospital) = seeded().await;
        let store = Arc::new(store);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .insert_user(new_user(
                            &format!("admin{i}@h.io"),
                            Role::HospitalAdmin,
                            Some(hospital.id),
                        ))
                        .await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn role_requiring_hospital_is_rejected_without_one() {
        let store = MemoryStore::new();
        let err = store
            .insert_user(new_user("doc@h.io", Role::Doctor, None))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
    }

    #[tokio::test]
    async fn hospital_with_dependents_cannot_be_deleted() {
        let (store, _, hospital) = seeded().await;
        add_doctor(&store, hospital.id, "doc@h.io").await;
        let err = store.delete_hospital(hospital.id).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
        assert!(store.find_hospital(hospital.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn deleting_patient_cascades_prescriptions() {
        let (store, _, hospital) = seeded().await;
        let doctor = add_doctor(&store, hospital.id, "doc@h.io").await;
        let patient = add_patient(&store, &doctor).await;
        store
            .insert_prescription(NewPrescription {
                patient_enrollment_id: patient.id,
                medication: "Ibuprofen".into(),
                dosage: "200mg".into(),
                instructions: "After meals".into(),
                doctor_id: doctor.id,
                hospital_id: hospital.id,
            })
            .await
            .unwrap();

        assert!(store.delete_patient(patient.id).await.unwrap());
        let remaining = store
            .count_prescriptions(&RecordFilter::hospital(hospital.id))
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn doctor_with_patients_cannot_be_deleted() {
        let (store, _, hospital) = seeded().await;
        let doctor = add_doctor(&store, hospital.id, "doc@h.io").await;
        add_patient(&store, &doctor).await;
        assert!(store.delete_doctor(doctor.id).await.is_err());
    }

    #[tokio::test]
    async fn list_filters_and_limits_newest_first() {
        let (store, _, hospital) = seeded().await;
        let doctor = add_doctor(&store, hospital.id, "doc@h.io").await;
        let mut ids = Vec::new();
        for _ in 0..7 {
            ids.push(add_patient(&store, &doctor).await.id);
        }

        let recent = store
            .list_patients(&RecordFilter::hospital(hospital.id), Some(5))
            .await
            .unwrap();
        assert_eq!(recent.len(), 5);
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let elsewhere = store
            .list_patients(&RecordFilter::hospital(HospitalId::new()), None)
            .await
            .unwrap();
        assert!(elsewhere.is_empty());
    }

    #[tokio::test]
    async fn fail_point_trips_once() {
        let (store, _, hospital) = seeded().await;
        store.fail_next(FailPoint::InsertDoctor).await;
        let user = store
            .insert_user(new_user("doc@h.io", Role::Doctor, Some(hospital.id)))
            .await
            .unwrap();
        let attempt = NewDoctor {
            name: "Dr. Test".into(),
            email: email("doc@h.io"),
            specialization: "General".into(),
            hospital_id: hospital.id,
            user_id: user.id,
        };
        assert!(store.insert_doctor(attempt.clone()).await.is_err());
        assert!(store.insert_doctor(attempt).await.is_ok());
    }

    #[tokio::test]
    async fn restore_doctor_keeps_identity() {
        let (store, _, hospital) = seeded().await;
        let doctor = add_doctor(&store, hospital.id, "doc@h.io").await;
        assert!(store.delete_doctor(doctor.id).await.unwrap());
        let restored = store.restore_doctor(&doctor).await.unwrap();
        assert_eq!(restored, doctor);
        assert_eq!(store.find_doctor(doctor.id).await.unwrap(), Some(doctor));
    }
}
