//! # Wardline Policy
//!
//! Pure authorization decisions. Nothing here touches the store or the
//! request: callers resolve the [`Actor`] and the target record first, then
//! ask [`can_access`] or [`list_scope`] what is allowed.
//!
//! ```ignore
//! use wardline_policy::{Action, Ownership, ResourceKind, can_access};
//!
//! let patient = store.find_patient(id).await?.ok_or_else(not_found)?;
//! can_access(&actor, Action::Read, ResourceKind::Patient, Some(&Ownership::from(&patient)))
//!     .enforce()?;
//! ```

pub mod actor;
pub mod decision;
pub mod engine;

pub use actor::{Actor, Identity};
pub use decision::{Action, Decision, DenyReason, Denial, Ownership, ResourceKind};
pub use engine::{can_access, list_scope};
