//! Seeding configuration and generated records.

use wardline_models::patients::Gender;

pub struct HospitalSeed {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub license_number: String,
    pub established_year: i32,
    pub bed_capacity: i32,
    pub emergency_contact: String,
}

/// A login account: hospital admins and doctors both need one.
pub struct StaffSeed {
    pub name: String,
    pub email: String,
    pub specialization: String,
}

pub struct PatientSeed {
    pub name: String,
    pub age: i32,
    pub gender: Gender,
}

#[derive(Debug, Clone)]
pub struct SeedConfig {
    pub hospitals: usize,
    pub doctors_per_hospital: usize,
    pub patients_per_doctor: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            hospitals: 3,
            doctors_per_hospital: 4,
            patients_per_doctor: 5,
        }
    }
}

impl SeedConfig {
    pub fn new(hospitals: usize) -> Self {
        Self {
            hospitals,
            ..Self::default()
        }
    }

    pub fn with_doctors(mut self, per_hospital: usize) -> Self {
        self.doctors_per_hospital = per_hospital;
        self
    }

    pub fn with_patients(mut self, per_doctor: usize) -> Self {
        self.patients_per_doctor = per_doctor;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub hospitals: usize,
    pub admins: usize,
    pub doctors: usize,
    pub patients: usize,
}
