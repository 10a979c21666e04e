//! # Wardline CLI
//!
//! Administrative commands and demo-data seeding for Wardline.
//!
//! Everything goes through the [`Store`](wardline_db::Store) trait, so the
//! same uniqueness and one-admin-per-hospital rules the API enforces apply
//! to seeded data.
//!
//! ```ignore
//! use wardline_cli::seeder::{SeedConfig, seed_all};
//!
//! let summary = seed_all(&store, SeedConfig::new(3)).await?;
//! ```

pub mod admin;
pub mod seeder;
