//! Strongly-typed ID newtypes for domain entities.
//!
//! A `DoctorId` and a `PatientId` are both UUIDs in the database, but mixing
//! them up in an ownership comparison is exactly the bug the policy engine
//! must never have. Each entity gets its own type.
//!
//! ```ignore
//! use wardline_models::ids::{DoctorId, PatientId};
//!
//! fn assigned_to(doctor: DoctorId) { /* ... */ }
//!
//! assigned_to(DoctorId::new());      // OK
//! // assigned_to(PatientId::new());  // Compile error
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Declares a `Uuid` newtype usable as a column, a JSON field and an OpenAPI
/// string. The sqlx derive also covers `= ANY($1)` slice binds.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
        #[serde(transparent)]
        #[sqlx(transparent)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(pub Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub const fn from_u128(v: u128) -> Self {
                Self(Uuid::from_u128(v))
            }

            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(
    /// Account identifier.
    UserId
);

define_id!(HospitalId);

define_id!(
    /// Doctor profile identifier. Distinct from the backing account's [`UserId`].
    DoctorId
);

define_id!(
    /// Patient enrollment identifier.
    PatientId
);

define_id!(PrescriptionId);
