use wardline_core::{AppError, Role, hash_password};
use wardline_db::Store;
use wardline_models::{
    users::{NewUser, User},
    value_types::Email,
};

/// Creates a SUPER_ADMIN account. Super admins carry no hospital.
pub async fn create_super_admin(
    store: &dyn Store,
    name: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    if password.len() < 6 {
        return Err(AppError::bad_request(
            "Password must be at least 6 characters",
        ));
    }
    let email = Email::new(email).map_err(|_| AppError::bad_request("Invalid email address"))?;

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::conflict("User already exists with this email"));
    }

    let password_hash = hash_password(password)?;
    store
        .insert_user(NewUser {
            name: name.to_string(),
            email,
            password_hash,
            role: Role::SuperAdmin,
            hospital_id: None,
        })
        .await
}
