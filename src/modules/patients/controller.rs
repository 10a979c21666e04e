use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use wardline_core::{ApiResponse, AppError, ListResponse, MessageResponse};
use wardline_models::{
    RecordFilter,
    ids::PatientId,
    patients::{
        CreatePatientDto, PatientEnrollment, PatientFilterParams, PatientWithDoctor,
        UpdatePatientDto,
    },
};

use crate::docs::ErrorResponse;
use crate::middleware::role::Clinician;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::PatientService;

/// Enroll a patient
///
/// Doctors always enroll under themselves; `doctorId` and `hospitalId` in the
/// body are ignored for them.
#[utoipa::path(
    post,
    path = "/api/patients",
    request_body = CreatePatientDto,
    responses(
        (status = 201, description = "Patient enrolled", body = ApiResponse<PatientEnrollment>),
        (status = 400, description = "Doctor ID is required", body = ErrorResponse),
        (status = 403, description = "Outside the caller's hospital", body = ErrorResponse),
        (status = 404, description = "Doctor not found", body = ErrorResponse)
    ),
    tag = "Patients",
    security(("bearer_auth" = []))
)]
pub async fn create_patient(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    ValidatedJson(dto): ValidatedJson<CreatePatientDto>,
) -> Result<(StatusCode, Json<ApiResponse<PatientEnrollment>>), AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let patient = PatientService::create(state.store(), &actor, dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(patient))))
}

#[utoipa::path(
    get,
    path = "/api/patients",
    params(PatientFilterParams),
    responses(
        (status = 200, description = "Patients visible to the caller", body = ListResponse<PatientWithDoctor>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Patients",
    security(("bearer_auth" = []))
)]
pub async fn get_patients(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    params: Result<Query<PatientFilterParams>, QueryRejection>,
) -> Result<Json<ListResponse<PatientWithDoctor>>, AppError> {
    let Query(params) = params.map_err(|_| AppError::bad_request("Invalid query parameters"))?;
    let actor = auth_user.actor(state.store()).await?;
    let patients = PatientService::list(state.store(), &actor, &RecordFilter::from(&params)).await?;
    Ok(Json(ListResponse::new(patients)))
}

#[utoipa::path(
    get,
    path = "/api/patients/{id}",
    params(("id" = PatientId, Path, description = "Patient enrollment ID")),
    responses(
        (status = 200, description = "Patient with doctor summary", body = ApiResponse<PatientWithDoctor>),
        (status = 403, description = "Not the caller's patient", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse)
    ),
    tag = "Patients",
    security(("bearer_auth" = []))
)]
pub async fn get_patient(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    ValidatedPath(id): ValidatedPath<PatientId>,
) -> Result<Json<ApiResponse<PatientWithDoctor>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let patient = PatientService::get(state.store(), &actor, id).await?;
    Ok(Json(ApiResponse::ok(patient)))
}

#[utoipa::path(
    put,
    path = "/api/patients/{id}",
    params(("id" = PatientId, Path, description = "Patient enrollment ID")),
    request_body = UpdatePatientDto,
    responses(
        (status = 200, description = "Patient updated", body = ApiResponse<PatientEnrollment>),
        (status = 403, description = "Not the caller's patient", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse)
    ),
    tag = "Patients",
    security(("bearer_auth" = []))
)]
pub async fn update_patient(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    ValidatedPath(id): ValidatedPath<PatientId>,
    ValidatedJson(dto): ValidatedJson<UpdatePatientDto>,
) -> Result<Json<ApiResponse<PatientEnrollment>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let patient = PatientService::update(state.store(), &actor, id, dto).await?;
    Ok(Json(ApiResponse::ok(patient)))
}

#[utoipa::path(
    delete,
    path = "/api/patients/{id}",
    params(("id" = PatientId, Path, description = "Patient enrollment ID")),
    responses(
        (status = 200, description = "Patient and their prescriptions deleted", body = MessageResponse),
        (status = 403, description = "Not the caller's patient", body = ErrorResponse),
        (status = 404, description = "Patient not found", body = ErrorResponse)
    ),
    tag = "Patients",
    security(("bearer_auth" = []))
)]
pub async fn delete_patient(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    ValidatedPath(id): ValidatedPath<PatientId>,
) -> Result<Json<MessageResponse>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    PatientService::delete(state.store(), &actor, id).await?;
    Ok(Json(MessageResponse::new("Patient deleted successfully")))
}
