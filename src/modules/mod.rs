pub mod auth;
pub mod doctors;
pub mod health;
pub mod hospital_admins;
pub mod hospitals;
pub mod patients;
pub mod prescriptions;
