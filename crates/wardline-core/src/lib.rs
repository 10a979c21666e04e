//! # Wardline Core
//!
//! Core types, errors, and utilities for the Wardline API.
//!
//! - [`errors`]: the application error taxonomy and its JSON translation
//! - [`password`]: bcrypt password hashing and verification
//! - [`response`]: success envelopes shared by every endpoint
//! - [`roles`]: the four account roles
//! - [`serde`]: custom deserialization helpers for query strings
//!
//! # Example
//!
//! ```ignore
//! use wardline_core::errors::AppError;
//! use wardline_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found("Hospital not found");
//! let hash = hash_password("secure_password")?;
//! assert!(verify_password("secure_password", &hash)?);
//! ```

pub mod errors;
pub mod password;
pub mod response;
pub mod roles;
pub mod serde;

pub use errors::AppError;
pub use password::{hash_password, verify_password};
pub use response::{ApiResponse, ListResponse, MessageResponse};
pub use roles::Role;
