use uuid::Uuid;
use wardline::wardline_auth::{create_access_token, verify_token};
use wardline::wardline_config::JwtConfig;
use wardline::wardline_core::Role;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        access_token_expiry: 3600,
    }
}

#[test]
fn test_token_carries_role_and_hospital() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let hospital_id = Uuid::new_v4();

    for role in [Role::Hospital, Role::HospitalAdmin, Role::Doctor] {
        let token = create_access_token(user_id, role, Some(hospital_id), &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, role);
        assert_eq!(claims.hospital_id, Some(hospital_id));
    }
}

#[test]
fn test_super_admin_token_has_no_hospital() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token(Uuid::new_v4(), Role::SuperAdmin, None, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();
    assert_eq!(claims.role, Role::SuperAdmin);
    assert!(claims.hospital_id.is_none());
}

#[test]
fn test_default_expiry_is_one_day() {
    let jwt_config = JwtConfig::from_lookup(|_| None);
    assert_eq!(jwt_config.access_token_expiry, 86400);
    assert!(jwt_config.uses_default_secret());
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();
    for token in ["", "not.a.token", "eyJhbGciOiJIUzI1NiJ9.e30"] {
        assert!(verify_token(token, &jwt_config).is_err(), "{token}");
    }
}

#[test]
fn test_different_users_get_different_tokens() {
    let jwt_config = get_test_jwt_config();
    let first = create_access_token(Uuid::new_v4(), Role::Doctor, None, &jwt_config).unwrap();
    let second = create_access_token(Uuid::new_v4(), Role::Doctor, None, &jwt_config).unwrap();
    assert_ne!(first, second);
}
