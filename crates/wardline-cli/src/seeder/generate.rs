//! Fake record generation, in parallel with Rayon.
//!
//! Every generated email and license number carries the run tag plus the
//! record's position, so repeated runs never collide.

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use rayon::prelude::*;
use wardline_models::patients::Gender;

use super::models::{HospitalSeed, PatientSeed, StaffSeed};

const SPECIALIZATIONS: &[&str] = &[
    "Cardiology",
    "Dermatology",
    "Emergency Medicine",
    "General Practice",
    "Neurology",
    "Oncology",
    "Pediatrics",
    "Radiology",
];

fn slug(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase()
}

pub fn generate_hospitals(count: usize, tag: &str) -> Vec<HospitalSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let city: String = CityName().fake();
            let street: String = StreetName().fake();
            let building: String = BuildingNumber().fake();
            let state: String = StateAbbr().fake();
            let zip: String = ZipCode().fake();
            let company: String = CompanyName().fake();

            HospitalSeed {
                name: format!("{company} {city} Hospital"),
                address: format!("{building} {street}, {city}, {state} {zip}"),
                phone: PhoneNumber().fake(),
                email: format!("contact+{tag}{idx}@{}.example.com", slug(&city)),
                license_number: format!("LIC-{}-{idx:04}", tag.to_uppercase()),
                established_year: (1900..2024).fake(),
                bed_capacity: (20..1200).fake(),
                emergency_contact: PhoneNumber().fake(),
            }
        })
        .collect()
}

/// `role` ends up in the email, e.g. `"admin"` or `"doctor"`.
pub fn generate_staff(count: usize, group: usize, role: &str, tag: &str) -> Vec<StaffSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let specialization = SPECIALIZATIONS[(0..SPECIALIZATIONS.len()).fake::<usize>()];

            StaffSeed {
                email: format!(
                    "{}.{}+{role}{tag}{}@example.com",
                    slug(&first_name),
                    slug(&last_name),
                    group * 1000 + idx
                ),
                name: format!("{first_name} {last_name}"),
                specialization: specialization.to_string(),
            }
        })
        .collect()
}

pub fn generate_patients(count: usize) -> Vec<PatientSeed> {
    (0..count)
        .into_par_iter()
        .map(|_| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let gender = match (0..3).fake::<u8>() {
                0 => Gender::Male,
                1 => Gender::Female,
                _ => Gender::Other,
            };

            PatientSeed {
                name: format!("{first_name} {last_name}"),
                age: (0..100).fake(),
                gender,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use wardline_models::value_types::Email;

    #[test]
    fn hospitals_get_unique_licenses_and_valid_emails() {
        let hospitals = generate_hospitals(20, "t1");
        let licenses: HashSet<_> = hospitals.iter().map(|h| &h.license_number).collect();
        assert_eq!(licenses.len(), 20);
        for hospital in &hospitals {
            assert!(Email::new(hospital.email.as_str()).is_ok(), "{}", hospital.email);
            assert!((1900..2024).contains(&hospital.established_year));
        }
    }

    #[test]
    fn staff_emails_are_unique_across_groups() {
        let mut emails = HashSet::new();
        for group in 0..3 {
            for staff in generate_staff(10, group, "doctor", "t1") {
                assert!(Email::new(staff.email.as_str()).is_ok(), "{}", staff.email);
                assert!(SPECIALIZATIONS.contains(&staff.specialization.as_str()));
                emails.insert(staff.email);
            }
        }
        assert_eq!(emails.len(), 30);
    }

    #[test]
    fn patients_have_plausible_ages() {
        let patients = generate_patients(50);
        assert_eq!(patients.len(), 50);
        assert!(patients.iter().all(|p| (0..100).contains(&p.age)));
    }

    #[test]
    fn slug_drops_punctuation() {
        assert_eq!(slug("O'Keefe-Smith"), "okeefesmith");
    }
}
