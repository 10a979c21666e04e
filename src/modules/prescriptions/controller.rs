use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use wardline_core::{ApiResponse, AppError, ListResponse, MessageResponse};
use wardline_models::{
    RecordFilter,
    ids::PrescriptionId,
    prescriptions::{
        CreatePrescriptionDto, Prescription, PrescriptionFilterParams, UpdatePrescriptionDto,
    },
};

use crate::docs::ErrorResponse;
use crate::middleware::role::Clinician;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedPath};

use super::service::PrescriptionService;

#[utoipa::path(
    post,
    path = "/api/prescriptions",
    request_body = CreatePrescriptionDto,
    responses(
        (status = 201, description = "Prescription created", body = ApiResponse<Prescription>),
        (status = 400, description = "Doctor ID is required", body = ErrorResponse),
        (status = 403, description = "Not the caller's patient", body = ErrorResponse),
        (status = 404, description = "Patient or doctor not found", body = ErrorResponse)
    ),
    tag = "Prescriptions",
    security(("bearer_auth" = []))
)]
pub async fn create_prescription(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    ValidatedJson(dto): ValidatedJson<CreatePrescriptionDto>,
) -> Result<(StatusCode, Json<ApiResponse<Prescription>>), AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let prescription = PrescriptionService::create(state.store(), &actor, dto).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(prescription))))
}

#[utoipa::path(
    get,
    path = "/api/prescriptions",
    params(PrescriptionFilterParams),
    responses(
        (status = 200, description = "Prescriptions visible to the caller", body = ListResponse<Prescription>),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    tag = "Prescriptions",
    security(("bearer_auth" = []))
)]
pub async fn get_prescriptions(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    params: Result<Query<PrescriptionFilterParams>, QueryRejection>,
) -> Result<Json<ListResponse<Prescription>>, AppError> {
    let Query(params) = params.map_err(|_| AppError::bad_request("Invalid query parameters"))?;
    let actor = auth_user.actor(state.store()).await?;
    let prescriptions =
        PrescriptionService::list(state.store(), &actor, &RecordFilter::from(&params)).await?;
    Ok(Json(ListResponse::new(prescriptions)))
}

#[utoipa::path(
    get,
    path = "/api/prescriptions/{id}",
    params(("id" = PrescriptionId, Path, description = "Prescription ID")),
    responses(
        (status = 200, description = "Prescription details", body = ApiResponse<Prescription>),
        (status = 403, description = "Outside the caller's scope", body = ErrorResponse),
        (status = 404, description = "Prescription not found", body = ErrorResponse)
    ),
    tag = "Prescriptions",
    security(("bearer_auth" = []))
)]
pub async fn get_prescription(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    ValidatedPath(id): ValidatedPath<PrescriptionId>,
) -> Result<Json<ApiResponse<Prescription>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let prescription = PrescriptionService::get(state.store(), &actor, id).await?;
    Ok(Json(ApiResponse::ok(prescription)))
}

#[utoipa::path(
    put,
    path = "/api/prescriptions/{id}",
    params(("id" = PrescriptionId, Path, description = "Prescription ID")),
    request_body = UpdatePrescriptionDto,
    responses(
        (status = 200, description = "Prescription updated", body = ApiResponse<Prescription>),
        (status = 403, description = "Outside the caller's scope", body = ErrorResponse),
        (status = 404, description = "Prescription not found", body = ErrorResponse)
    ),
    tag = "Prescriptions",
    security(("bearer_auth" = []))
)]
pub async fn update_prescription(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    ValidatedPath(id): ValidatedPath<PrescriptionId>,
    ValidatedJson(dto): ValidatedJson<UpdatePrescriptionDto>,
) -> Result<Json<ApiResponse<Prescription>>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    let prescription = PrescriptionService::update(state.store(), &actor, id, dto).await?;
    Ok(Json(ApiResponse::ok(prescription)))
}

#[utoipa::path(
    delete,
    path = "/api/prescriptions/{id}",
    params(("id" = PrescriptionId, Path, description = "Prescription ID")),
    responses(
        (status = 200, description = "Prescription deleted", body = MessageResponse),
        (status = 403, description = "Outside the caller's scope", body = ErrorResponse),
        (status = 404, description = "Prescription not found", body = ErrorResponse)
    ),
    tag = "Prescriptions",
    security(("bearer_auth" = []))
)]
pub async fn delete_prescription(
    State(state): State<AppState>,
    Clinician(auth_user): Clinician,
    ValidatedPath(id): ValidatedPath<PrescriptionId>,
) -> Result<Json<MessageResponse>, AppError> {
    let actor = auth_user.actor(state.store()).await?;
    PrescriptionService::delete(state.store(), &actor, id).await?;
    Ok(Json(MessageResponse::new("Prescription deleted successfully")))
}
