//! Coarse role gates.
//!
//! Each gate is an extractor that authenticates the caller and checks their
//! role against a fixed set before the handler runs. Fine-grained scoping is
//! left to the policy engine.
//!
//! ```rust,ignore
//! pub async fn create_hospital(
//!     State(state): State<AppState>,
//!     SuperAdminOnly(auth_user): SuperAdminOnly,
//!     ValidatedJson(dto): ValidatedJson<CreateHospitalDto>,
//! ) -> Result<(StatusCode, Json<ApiResponse<Hospital>>), AppError> { ... }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use wardline_core::{AppError, Role};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Rejects with 403 unless the caller's role is one of `allowed`.
pub fn check_any_role(auth_user: &AuthUser, allowed: &[Role]) -> Result<(), AppError> {
    if !allowed.contains(&auth_user.role()) {
        return Err(AppError::forbidden(format!(
            "Access denied: role {} is not permitted",
            auth_user.role()
        )));
    }
    Ok(())
}

macro_rules! require_roles {
    ($(#[$meta:meta])* $name:ident, [$($role:ident),+ $(,)?]) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub AuthUser);

        impl $name {
            pub const ROLES: &'static [Role] = &[$(Role::$role),+];
        }

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = AuthUser::from_request_parts(parts, state).await?;
                check_any_role(&auth_user, Self::ROLES)?;
                Ok($name(auth_user))
            }
        }
    };
}

require_roles!(
    /// Hospital and hospital-admin management.
    SuperAdminOnly,
    [SuperAdmin]
);
require_roles!(
    /// Doctor mutations.
    HospitalManager,
    [SuperAdmin, HospitalAdmin]
);
require_roles!(
    /// Hospital and doctor reads.
    HospitalReader,
    [SuperAdmin, HospitalAdmin, Hospital]
);
require_roles!(
    /// Patient and prescription access.
    Clinician,
    [SuperAdmin, HospitalAdmin, Doctor]
);
require_roles!(
    /// The hospital admin dashboard.
    HospitalAdminOnly,
    [HospitalAdmin]
);

#[cfg(test)]
mod tests {
    use super::*;
    use wardline_auth::Claims;

    fn user(role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: uuid::Uuid::new_v4().to_string(),
            role,
            hospital_id: None,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn gates_match_route_table() {
        assert_eq!(SuperAdminOnly::ROLES, &[Role::SuperAdmin]);
        assert!(!HospitalManager::ROLES.contains(&Role::Hospital));
        assert!(HospitalReader::ROLES.contains(&Role::Hospital));
        assert!(!HospitalReader::ROLES.contains(&Role::Doctor));
        assert!(Clinician::ROLES.contains(&Role::Doctor));
        assert!(!Clinician::ROLES.contains(&Role::Hospital));
        assert_eq!(HospitalAdminOnly::ROLES, &[Role::HospitalAdmin]);
    }

    #[test]
    fn check_any_role_rejects_outsiders() {
        assert!(check_any_role(&user(Role::Doctor), Clinician::ROLES).is_ok());
        let err = check_any_role(&user(Role::Hospital), Clinician::ROLES).unwrap_err();
        assert_eq!(err.status.as_u16(), 403);
    }
}
