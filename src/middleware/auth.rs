use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use wardline_auth::{Claims, verify_token};
use wardline_core::{AppError, Role};
use wardline_db::Store;
use wardline_models::ids::{HospitalId, UserId};
use wardline_policy::{Actor, Identity};

use crate::state::AppState;

/// Extractor that validates the bearer token and provides its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0.user_id().map(UserId::from)
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn hospital_id(&self) -> Option<HospitalId> {
        self.0.hospital_id.map(HospitalId::from)
    }

    pub fn identity(&self) -> Result<Identity, AppError> {
        Ok(Identity {
            user_id: self.user_id()?,
            role: self.role(),
            hospital_id: self.hospital_id(),
        })
    }

    /// Resolves the caller's doctor profile, for doctors only.
    pub async fn actor(&self, store: &dyn Store) -> Result<Actor, AppError> {
        let identity = self.identity()?;
        let actor = Actor::new(identity);
        if identity.role != Role::Doctor {
            return Ok(actor);
        }

        let doctor = store.find_doctor_by_user(identity.user_id).await?;
        Ok(actor.with_doctor(doctor.map(|d| d.id)))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        AppError::unauthorized("Authentication required")
                    } else {
                        AppError::unauthorized("Invalid or expired token")
                    }
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;
        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(role: Role, hospital_id: Option<Uuid>) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            role,
            hospital_id,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn identity_carries_token_scope() {
        let hospital = Uuid::new_v4();
        let user = AuthUser(claims(Role::HospitalAdmin, Some(hospital)));
        let identity = user.identity().unwrap();
        assert_eq!(identity.role, Role::HospitalAdmin);
        assert_eq!(identity.hospital_id, Some(HospitalId::from(hospital)));
    }

    #[test]
    fn malformed_subject_is_unauthorized() {
        let mut bad = claims(Role::SuperAdmin, None);
        bad.sub = "not-a-uuid".to_string();
        let err = AuthUser(bad).identity().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
