use serde::Serialize;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use wardline_core::{MessageResponse, Role};
use wardline_models::{
    auth::{
        AuthResponse, ChangePasswordRequest, CurrentUserResponse, LoginRequest, RegisterRequest,
        UserResponse,
    },
    doctors::{CreateDoctorDto, Doctor, DoctorSummary, DoctorWithHospital, UpdateDoctorDto},
    hospitals::{
        CreateHospitalDto, Hospital, HospitalDashboard, HospitalStatistics, HospitalSummary,
        UpdateHospitalDto,
    },
    patients::{CreatePatientDto, Gender, PatientEnrollment, PatientWithDoctor, UpdatePatientDto},
    prescriptions::{CreatePrescriptionDto, Prescription, UpdatePrescriptionDto},
    users::{CreateHospitalAdminDto, UpdateHospitalAdminDto, User, UserWithHospital},
};

use crate::modules::health::controller::HealthResponse;

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::get_current_user,
        crate::modules::auth::controller::change_password,
        crate::modules::auth::controller::create_hospital_admin,
        crate::modules::hospitals::controller::create_hospital,
        crate::modules::hospitals::controller::get_hospitals,
        crate::modules::hospitals::controller::get_hospital,
        crate::modules::hospitals::controller::update_hospital,
        crate::modules::hospitals::controller::delete_hospital,
        crate::modules::doctors::controller::create_doctor,
        crate::modules::doctors::controller::get_doctors,
        crate::modules::doctors::controller::get_doctor,
        crate::modules::doctors::controller::update_doctor,
        crate::modules::doctors::controller::delete_doctor,
        crate::modules::patients::controller::create_patient,
        crate::modules::patients::controller::get_patients,
        crate::modules::patients::controller::get_patient,
        crate::modules::patients::controller::update_patient,
        crate::modules::patients::controller::delete_patient,
        crate::modules::prescriptions::controller::create_prescription,
        crate::modules::prescriptions::controller::get_prescriptions,
        crate::modules::prescriptions::controller::get_prescription,
        crate::modules::prescriptions::controller::update_prescription,
        crate::modules::prescriptions::controller::delete_prescription,
        crate::modules::hospital_admins::controller::get_hospital_admins,
        crate::modules::hospital_admins::controller::create_hospital_admin,
        crate::modules::hospital_admins::controller::update_hospital_admin,
        crate::modules::hospital_admins::controller::delete_hospital_admin,
        crate::modules::hospital_admins::controller::get_my_hospital,
    ),
    components(
        schemas(
            Role,
            User,
            UserWithHospital,
            RegisterRequest,
            LoginRequest,
            ChangePasswordRequest,
            AuthResponse,
            CurrentUserResponse,
            UserResponse,
            CreateHospitalAdminDto,
            UpdateHospitalAdminDto,
            Hospital,
            HospitalSummary,
            HospitalStatistics,
            HospitalDashboard,
            CreateHospitalDto,
            UpdateHospitalDto,
            Doctor,
            DoctorSummary,
            DoctorWithHospital,
            CreateDoctorDto,
            UpdateDoctorDto,
            Gender,
            PatientEnrollment,
            PatientWithDoctor,
            CreatePatientDto,
            UpdatePatientDto,
            Prescription,
            CreatePrescriptionDto,
            UpdatePrescriptionDto,
            MessageResponse,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Authentication", description = "Registration, login and account endpoints"),
        (name = "Hospitals", description = "Hospital management"),
        (name = "Doctors", description = "Doctor management"),
        (name = "Patients", description = "Patient enrollment"),
        (name = "Prescriptions", description = "Prescriptions for enrolled patients"),
        (name = "Hospital Admins", description = "Hospital admin accounts and dashboard")
    ),
    info(
        title = "Wardline API",
        version = "0.1.0",
        description = "Multi-tenant hospital management API with role-scoped access to hospitals, doctors, patients and prescriptions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
