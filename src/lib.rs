//! # Wardline API
//!
//! A multi-tenant hospital management REST API built with Axum. Hospitals,
//! their doctors, enrolled patients and prescriptions are exposed over HTTP
//! with role-scoped access.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Bearer-token extractor and role gates
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Register, login, current user, password change
//! │   ├── hospitals/
//! │   ├── doctors/
//! │   ├── patients/
//! │   ├── prescriptions/
//! │   ├── hospital_admins/
//! │   └── health/
//! ├── docs.rs           # OpenAPI document
//! ├── router.rs         # Application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validating JSON and path extractors
//! ```
//!
//! Each feature module has the same layout:
//!
//! - `controller.rs`: HTTP handlers with their OpenAPI annotations
//! - `service.rs`: business logic and policy checks
//! - `router.rs`: Axum routes
//!
//! Shared pieces live in workspace crates: `wardline-core` (errors, envelopes,
//! roles), `wardline-models`, `wardline-auth` (JWT), `wardline-config`,
//! `wardline-db` (the [`Store`](wardline_db::Store) trait with PostgreSQL and
//! in-memory backends), `wardline-policy` and `wardline-observability`.
//!
//! ## Roles
//!
//! | Role | Scope | Description |
//! |------|-------|-------------|
//! | SUPER_ADMIN | Global | Manages hospitals and hospital admins |
//! | HOSPITAL_ADMIN | Hospital | Manages doctors, patients and prescriptions of one hospital |
//! | HOSPITAL | Hospital | Reads its hospital and doctors |
//! | DOCTOR | Own patients | Manages their own patients and prescriptions |
//!
//! ## API Documentation
//!
//! - Swagger UI: `http://localhost:5000/swagger-ui`
//! - Scalar: `http://localhost:5000/scalar`

pub mod docs;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

pub use wardline_auth;
pub use wardline_config;
pub use wardline_core;
pub use wardline_db;
pub use wardline_models;
pub use wardline_policy;
