use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use wardline_core::{ApiResponse, AppError, ListResponse, MessageResponse};
use wardline_models::{
    RecordFilter,
    doctors::{CreateDoctorDto, Doctor, DoctorFilterParams, DoctorWithHospital, UpdateDoctorDto},
    ids::DoctorId,
};

use crate::docs::ErrorResponse;
use crate::middleware::role::{HospitalManager, HospitalReader};
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::DoctorService;

#[utoipa::path(
    post,
    path = "/api/doctors",
    request_body = CreateDoctorDto,
    responses(
        (status = 201, description = "Doctor and login account created", body = ApiResponse<Doctor>),
        (status = 400, description = "Hospital ID is required", body = ErrorResponse),
        (status = 403, description = "Outside the caller's hospital", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    ),
    tag = "Doctors",
    security(("bearer_auth" = []))
)]
pub async fn create_doctor(
    State(state): State<AppState>,
    HospitalManager(auth_user): HospitalManager,
    ValidatedJson(dto): ValidatedJson<CreateDoctorDto>,
) -> Result<(StatusCode, Json<ApiResponse<Doctor>>), AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let doctor = DoctorService::create(state.store(), &actor, dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(doctor))))
}

#[utoipa::path(
    get,
    path = "/api/doctors",
    params(DoctorFilterParams),
    responses(
        (status = 200, description = "Doctors visible to the caller", body = ListResponse<Doctor>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Doctors",
    security(("bearer_auth" = []))
)]
pub async fn get_doctors(
    State(state): State<AppState>,
    HospitalReader(auth_user): HospitalReader,
    params: Result<Query<DoctorFilterParams>, QueryRejection>,
) -> Result<Json<ListResponse<Doctor>>, AppError> {
    let Query(params) = params.map_err(|_| AppError::bad_request("Invalid query parameters"))?;
    let actor = auth_user.actor(state.store()).await?;
    let doctors = DoctorService::list(state.store(), &actor, &RecordFilter::from(&params)).await?;
    Ok(Json(ListResponse::new(doctors)))
}

#[utoipa::path(
    get,
    path = "/api/doctors/{id}",
    params(("id" = DoctorId, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor with hospital summary", body = ApiResponse<DoctorWithHospital>),
        (status = 403, description = "Outside the caller's hospital", body = ErrorResponse),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    ),
    tag = "Doctors",
    security(("bearer_auth" = []))
)]
pub async fn get_doctor(
    State(state): State<AppState>,
    HospitalReader(auth_user): HospitalReader,
    ValidatedPath(id): ValidatedPath<DoctorId>,
) -> Result<Json<ApiResponse<DoctorWithHospital>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let doctor = DoctorService::get(state.store(), &actor, id).await?;
    Ok(Json(ApiResponse::ok(doctor)))
}

#[utoipa::path(
    put,
    path = "/api/doctors/{id}",
    params(("id" = DoctorId, Path, description = "Doctor ID")),
    request_body = UpdateDoctorDto,
    responses(
        (status = 200, description = "Doctor updated", body = ApiResponse<Doctor>),
        (status = 403, description = "Outside the caller's hospital", body = ErrorResponse),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    ),
    tag = "Doctors",
    security(("bearer_auth" = []))
)]
pub async fn update_doctor(
    State(state): State<AppState>,
    HospitalManager(auth_user): HospitalManager,
    ValidatedPath(id): ValidatedPath<DoctorId>,
    ValidatedJson(dto): ValidatedJson<UpdateDoctorDto>,
) -> Result<Json<ApiResponse<Doctor>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let doctor = DoctorService::update(state.store(), &actor, id, dto).await?;
    Ok(Json(ApiResponse::ok(doctor)))
}

#[utoipa::path(
    delete,
    path = "/api/doctors/{id}",
    params(("id" = DoctorId, Path, description = "Doctor ID")),
    responses(
        (status = 200, description = "Doctor and login account deleted", body = MessageResponse),
        (status = 404, description = "Doctor not found", body = ErrorResponse),
        (status = 409, description = "Doctor still has patients or prescriptions", body = ErrorResponse)
    ),
    tag = "Doctors",
    security(("bearer_auth" = []))
)]
pub async fn delete_doctor(
    State(state): State<AppState>,
    HospitalManager(auth_user): HospitalManager,
    ValidatedPath(id): ValidatedPath<DoctorId>,
) -> Result<Json<MessageResponse>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    DoctorService::delete(state.store(), &actor, id).await?;
    Ok(Json(MessageResponse::new("Doctor deleted successfully")))
}
