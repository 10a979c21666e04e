use axum::{Json, extract::State, http::StatusCode};
use wardline_core::{ApiResponse, AppError, ListResponse, MessageResponse};
use wardline_models::{
    hospitals::HospitalDashboard,
    ids::UserId,
    users::{CreateHospitalAdminDto, UpdateHospitalAdminDto, UserWithHospital},
};

use crate::docs::ErrorResponse;
use crate::middleware::role::{HospitalAdminOnly, SuperAdminOnly};
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::HospitalAdminService;

#[utoipa::path(
    get,
    path = "/api/hospital-admins",
    responses(
        (status = 200, description = "All hospital admins, newest first", body = ListResponse<UserWithHospital>),
        (status = 403, description = "Super admin only", body = ErrorResponse)
    ),
    tag = "Hospital Admins",
    security(("bearer_auth" = []))
)]
pub async fn get_hospital_admins(
    State(state): State<AppState>,
    _gate: SuperAdminOnly,
) -> Result<Json<ListResponse<UserWithHospital>>, AppError> {
    let admins = HospitalAdminService::list(state.store()).await?;
    Ok(Json(ListResponse::new(admins)))
}

#[utoipa::path(
    post,
    path = "/api/hospital-admins",
    request_body = CreateHospitalAdminDto,
    responses(
        (status = 201, description = "Hospital admin created", body = ApiResponse<UserWithHospital>),
        (status = 404, description = "Hospital not found", body = ErrorResponse),
        (status = 409, description = "Email taken or hospital already has an admin", body = ErrorResponse)
    ),
    tag = "Hospital Admins",
    security(("bearer_auth" = []))
)]
pub async fn create_hospital_admin(
    State(state): State<AppState>,
    _gate: SuperAdminOnly,
    ValidatedJson(dto): ValidatedJson<CreateHospitalAdminDto>,
) -> Result<(StatusCode, Json<ApiResponse<UserWithHospital>>), AppError> {
    let admin = HospitalAdminService::create(state.store(), dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(admin))))
}

#[utoipa::path(
    put,
    path = "/api/hospital-admins/{id}",
    params(("id" = UserId, Path, description = "Hospital admin user ID")),
    request_body = UpdateHospitalAdminDto,
    responses(
        (status = 200, description = "Hospital admin updated", body = ApiResponse<UserWithHospital>),
        (status = 404, description = "Hospital admin or hospital not found", body = ErrorResponse),
        (status = 409, description = "Target hospital already has an admin", body = ErrorResponse)
    ),
    tag = "Hospital Admins",
    security(("bearer_auth" = []))
)]
pub async fn update_hospital_admin(
    State(state): State<AppState>,
    _gate: SuperAdminOnly,
    ValidatedPath(id): ValidatedPath<UserId>,
    ValidatedJson(dto): ValidatedJson<UpdateHospitalAdminDto>,
) -> Result<Json<ApiResponse<UserWithHospital>>, AppError> {
    let admin = HospitalAdminService::update(state.store(), id, dto).await?;
    Ok(Json(ApiResponse::ok(admin)))
}

#[utoipa::path(
    delete,
    path = "/api/hospital-admins/{id}",
    params(("id" = UserId, Path, description = "Hospital admin user ID")),
    responses(
        (status = 200, description = "Hospital admin deleted", body = MessageResponse),
        (status = 404, description = "Hospital admin not found", body = ErrorResponse)
    ),
    tag = "Hospital Admins",
    security(("bearer_auth" = []))
)]
pub async fn delete_hospital_admin(
    State(state): State<AppState>,
    _gate: SuperAdminOnly,
    ValidatedPath(id): ValidatedPath<UserId>,
) -> Result<Json<MessageResponse>, AppError> {
    HospitalAdminService::delete(state.store(), id).await?;
    Ok(Json(MessageResponse::new("Hospital admin deleted successfully")))
}

/// Dashboard for the caller's own hospital
#[utoipa::path(
    get,
    path = "/api/hospital-admins/my-hospital",
    responses(
        (status = 200, description = "Hospital, statistics and recent records", body = ApiResponse<HospitalDashboard>),
        (status = 403, description = "Hospital admins only", body = ErrorResponse),
        (status = 404, description = "Hospital not found", body = ErrorResponse)
    ),
    tag = "Hospital Admins",
    security(("bearer_auth" = []))
)]
pub async fn get_my_hospital(
    State(state): State<AppState>,
    HospitalAdminOnly(auth_user): HospitalAdminOnly,
) -> Result<Json<ApiResponse<HospitalDashboard>>, AppError> {
    let dashboard =
        HospitalAdminService::my_hospital(state.store(), auth_user.hospital_id()).await?;
    Ok(Json(ApiResponse::ok(dashboard)))
}
