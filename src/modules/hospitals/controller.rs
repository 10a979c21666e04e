use axum::{Json, extract::State, http::StatusCode};
use wardline_core::{ApiResponse, AppError, ListResponse, MessageResponse};
use wardline_models::{
    hospitals::{CreateHospitalDto, Hospital, UpdateHospitalDto},
    ids::HospitalId,
};

use crate::docs::ErrorResponse;
use crate::middleware::role::{HospitalReader, SuperAdminOnly};
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::HospitalService;

#[utoipa::path(
    post,
    path = "/api/hospitals",
    request_body = CreateHospitalDto,
    responses(
        (status = 201, description = "Hospital created", body = ApiResponse<Hospital>),
        (status = 403, description = "Super admin only", body = ErrorResponse),
        (status = 409, description = "License number already exists", body = ErrorResponse)
    ),
    tag = "Hospitals",
    security(("bearer_auth" = []))
)]
pub async fn create_hospital(
    State(state): State<AppState>,
    SuperAdminOnly(auth_user): SuperAdminOnly,
    ValidatedJson(dto): ValidatedJson<CreateHospitalDto>,
) -> Result<(StatusCode, Json<ApiResponse<Hospital>>), AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let hospital = HospitalService::create(state.store(), &actor, dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(hospital))))
}

/// All hospitals for super admins, otherwise the caller's own
#[utoipa::path(
    get,
    path = "/api/hospitals",
    responses(
        (status = 200, description = "Hospitals visible to the caller", body = ListResponse<Hospital>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Hospitals",
    security(("bearer_auth" = []))
)]
pub async fn get_hospitals(
    State(state): State<AppState>,
    HospitalReader(auth_user): HospitalReader,
) -> Result<Json<ListResponse<Hospital>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let hospitals = HospitalService::list(state.store(), &actor).await?;
    Ok(Json(ListResponse::new(hospitals)))
}

#[utoipa::path(
    get,
    path = "/api/hospitals/{id}",
    params(("id" = HospitalId, Path, description = "Hospital ID")),
    responses(
        (status = 200, description = "Hospital details", body = ApiResponse<Hospital>),
        (status = 403, description = "Outside the caller's hospital", body = ErrorResponse),
        (status = 404, description = "Hospital not found", body = ErrorResponse)
    ),
    tag = "Hospitals",
    security(("bearer_auth" = []))
)]
pub async fn get_hospital(
    State(state): State<AppState>,
    HospitalReader(auth_user): HospitalReader,
    ValidatedPath(id): ValidatedPath<HospitalId>,
) -> Result<Json<ApiResponse<Hospital>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let hospital = HospitalService::get(state.store(), &actor, id).await?;
    Ok(Json(ApiResponse::ok(hospital)))
}

#[utoipa::path(
    put,
    path = "/api/hospitals/{id}",
    params(("id" = HospitalId, Path, description = "Hospital ID")),
    request_body = UpdateHospitalDto,
    responses(
        (status = 200, description = "Hospital updated", body = ApiResponse<Hospital>),
        (status = 404, description = "Hospital not found", body = ErrorResponse),
        (status = 409, description = "License number already exists", body = ErrorResponse)
    ),
    tag = "Hospitals",
    security(("bearer_auth" = []))
)]
pub async fn update_hospital(
    State(state): State<AppState>,
    SuperAdminOnly(auth_user): SuperAdminOnly,
    ValidatedPath(id): ValidatedPath<HospitalId>,
    ValidatedJson(dto): ValidatedJson<UpdateHospitalDto>,
) -> Result<Json<ApiResponse<Hospital>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let hospital = HospitalService::update(state.store(), &actor, id, dto).await?;
    Ok(Json(ApiResponse::ok(hospital)))
}

#[utoipa::path(
    delete,
    path = "/api/hospitals/{id}",
    params(("id" = HospitalId, Path, description = "Hospital ID")),
    responses(
        (status = 200, description = "Hospital deleted", body = MessageResponse),
        (status = 404, description = "Hospital not found", body = ErrorResponse),
        (status = 409, description = "Hospital still has accounts or records", body = ErrorResponse)
    ),
    tag = "Hospitals",
    security(("bearer_auth" = []))
)]
pub async fn delete_hospital(
    State(state): State<AppState>,
    SuperAdminOnly(auth_user): SuperAdminOnly,
    ValidatedPath(id): ValidatedPath<HospitalId>,
) -> Result<Json<MessageResponse>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    HospitalService::delete(state.store(), &actor, id).await?;
    Ok(Json(MessageResponse::new("Hospital deleted successfully")))
}
