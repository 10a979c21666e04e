//! # Wardline Auth
//!
//! Token issuance and verification.
//!
//! - [`claims`]: the identity carried by every access token
//! - [`jwt`]: HS256 signing and verification
//!
//! # Example
//!
//! ```ignore
//! use wardline_auth::{create_access_token, verify_token};
//! use wardline_config::JwtConfig;
//! use wardline_core::Role;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, Role::Doctor, Some(hospital_id), &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
