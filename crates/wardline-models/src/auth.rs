use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use wardline_core::Role;

use crate::ids::HospitalId;
use crate::users::{User, UserWithHospital};
use crate::value_types::Email;

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub email: Email,
    #[validate(length(min = 6))]
    pub password: String,
    pub role: Role,
    pub hospital_id: Option<HospitalId>,
    /// Required when `role` is `DOCTOR`.
    pub specialization: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct LoginRequest {
    pub email: Email,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: User,
}

impl AuthResponse {
    pub fn new(token: String, user: User) -> Self {
        Self {
            success: true,
            token,
            user,
        }
    }
}

/// An account created on someone else's behalf; no token is issued.
#[derive(Serialize, Debug, ToSchema)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

impl UserResponse {
    pub fn new(user: User) -> Self {
        Self {
            success: true,
            user,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: UserWithHospital,
}
