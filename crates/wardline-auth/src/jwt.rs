//! JWT utilities for authentication.
//!
//! Tokens are HS256-signed and carry `{sub, role, hospital_id}` plus the
//! standard `exp`/`iat` claims. Lifetime comes from [`JwtConfig`].

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use wardline_config::JwtConfig;
use wardline_core::{AppError, Role};

use crate::claims::Claims;

/// Creates an access token for the given identity.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    role: Role,
    hospital_id: Option<Uuid>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        hospital_id,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error for any malformed, forged or expired token.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::Algorithm;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();
        let hospital_id = Uuid::new_v4();

        let token = create_access_token(user_id, Role::Doctor, Some(hospital_id), &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Doctor);
        assert_eq!(claims.hospital_id, Some(hospital_id));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_is_hs256() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), Role::SuperAdmin, None, &config).unwrap();
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, Algorithm::HS256);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), Role::SuperAdmin, None, &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "wrong-secret".to_string(),
            access_token_expiry: 3600,
        };
        let err = verify_token(&token, &wrong_config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.message(), "Invalid or expired token");
    }

    #[test]
    fn test_verify_expired_token() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: Role::HospitalAdmin,
            hospital_id: Some(Uuid::new_v4()),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_verify_garbage_token() {
        let config = get_test_jwt_config();
        assert!(verify_token("not.a.token", &config).is_err());
    }
}
