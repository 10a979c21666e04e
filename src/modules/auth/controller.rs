use axum::{Json, extract::State, http::StatusCode};
use wardline_core::{AppError, MessageResponse};
use wardline_models::{
    auth::{
        AuthResponse, ChangePasswordRequest, CurrentUserResponse, LoginRequest, RegisterRequest,
        UserResponse,
    },
    users::CreateHospitalAdminDto,
};

use crate::docs::ErrorResponse;
use crate::middleware::auth::AuthUser;
use crate::middleware::role::SuperAdminOnly;
use crate::modules::hospital_admins::service::HospitalAdminService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing hospital or specialization", body = ErrorResponse),
        (status = 404, description = "Hospital not found", body = ErrorResponse),
        (status = 409, description = "Email taken or hospital already has an admin", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let (user, token) = AuthService::register(state.store(), &state.jwt_config, dto).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse::new(token, user))))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let (user, token) = AuthService::login(state.store(), &state.jwt_config, dto).await?;
    Ok(Json(AuthResponse::new(token, user)))
}

/// The authenticated account with its hospital
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current account", body = CurrentUserResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Account no longer exists", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let user = AuthService::current_user(state.store(), auth_user.user_id()?).await?;
    Ok(Json(CurrentUserResponse {
        success: true,
        user,
    }))
}

/// Change the authenticated account's password
#[utoipa::path(
    put,
    path = "/api/auth/password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 401, description = "Current password does not match", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::change_password(state.store(), auth_user.user_id()?, dto).await?;
    Ok(Json(MessageResponse::new("Password updated successfully")))
}

/// Create a hospital admin account
#[utoipa::path(
    post,
    path = "/api/auth/hospital-admins",
    request_body = CreateHospitalAdminDto,
    responses(
        (status = 201, description = "Hospital admin created", body = UserResponse),
        (status = 403, description = "Super admin only", body = ErrorResponse),
        (status = 404, description = "Hospital not found", body = ErrorResponse),
        (status = 409, description = "Email taken or hospital already has an admin", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn create_hospital_admin(
    State(state): State<AppState>,
    _gate: SuperAdminOnly,
    ValidatedJson(dto): ValidatedJson<CreateHospitalAdminDto>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let admin = HospitalAdminService::create(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::new(admin.user))))
}
