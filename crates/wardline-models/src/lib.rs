//! # Wardline Models
//!
//! Domain entities, request DTOs and typed identifiers.
//!
//! - [`ids`]: strongly-typed UUID newtypes per entity
//! - [`value_types`]: validated primitives such as [`Email`](value_types::Email)
//! - [`filters`]: the [`RecordFilter`](filters::RecordFilter) used to scope list queries
//! - [`users`], [`auth`], [`hospitals`], [`doctors`], [`patients`], [`prescriptions`]:
//!   entities and their DTOs

pub mod auth;
pub mod doctors;
pub mod filters;
pub mod hospitals;
pub mod ids;
pub mod patients;
pub mod prescriptions;
pub mod users;
pub mod value_types;

pub use filters::RecordFilter;
pub use ids::{DoctorId, HospitalId, PatientId, PrescriptionId, UserId};
pub use value_types::Email;
