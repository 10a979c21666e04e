use std::sync::LazyLock;

use tracing::{info, instrument, warn};
use wardline_auth::create_access_token;
use wardline_config::JwtConfig;
use wardline_core::{AppError, Role, hash_password, verify_password};
use wardline_db::{DoctorProfile, Store, provision_doctor};
use wardline_models::{
    auth::{ChangePasswordRequest, LoginRequest, RegisterRequest},
    ids::UserId,
    users::{NewUser, User, UserWithHospital},
};
use wardline_observability::track_login;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Hash compared against when the email is unknown, so both login failures
/// cost one bcrypt verification.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("wardline-timing-equalizer").ok());

pub struct AuthService;

impl AuthService {
    #[instrument(skip(store, jwt_config, dto), fields(user.email = %dto.email, user.role = %dto.role, db.operation = "INSERT"))]
    pub async fn register(
        store: &dyn Store,
        jwt_config: &JwtConfig,
        dto: RegisterRequest,
    ) -> Result<(User, String), AppError> {
        if store.find_user_by_email(&dto.email).await?.is_some() {
            warn!("Registration with an existing email");
            return Err(AppError::conflict("User already exists with this email"));
        }

        let hospital_id = match dto.role {
            Role::SuperAdmin => None,
            _ => dto.hospital_id,
        };
        if dto.role.requires_hospital() && hospital_id.is_none() {
            return Err(AppError::bad_request("Hospital ID is required for this role"));
        }
        if let Some(hospital_id) = hospital_id
            && store.find_hospital(hospital_id).await?.is_none()
        {
            return Err(AppError::not_found("Hospital not found"));
        }

        let specialization = dto
            .specialization
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if dto.role == Role::Doctor && specialization.is_none() {
            return Err(AppError::bad_request("Specialization is required for doctors"));
        }
        if dto.role == Role::HospitalAdmin
            && let Some(hospital_id) = hospital_id
            && store.find_hospital_admin(hospital_id).await?.is_some()
        {
            return Err(AppError::conflict("This hospital already has an admin"));
        }

        let password_hash = hash_password(&dto.password)?;

        let user = match (dto.role, hospital_id, specialization) {
            (Role::Doctor, Some(hospital_id), Some(specialization)) => {
                let (user, _) = provision_doctor(
                    store,
                    DoctorProfile {
                        name: dto.name,
                        email: dto.email,
                        specialization,
                        hospital_id,
                        password_hash,
                    },
                )
                .await?;
                user
            }
            _ => {
                store
                    .insert_user(NewUser {
                        name: dto.name,
                        email: dto.email,
                        password_hash,
                        role: dto.role,
                        hospital_id,
                    })
                    .await?
            }
        };

        let token = create_access_token(
            user.id.into_inner(),
            user.role,
            user.hospital_id.map(|h| h.into_inner()),
            jwt_config,
        )?;

        info!(user.id = %user.id, "User registered");
        Ok((user, token))
    }

    #[instrument(skip(store, jwt_config, dto), fields(user.email = %dto.email, db.operation = "SELECT"))]
    pub async fn login(
        store: &dyn Store,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<(User, String), AppError> {
        let Some(credentials) = store.find_credentials_by_email(&dto.email).await? else {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = verify_password(&dto.password, hash);
            }
            track_login(false);
            warn!("Login failed");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &credentials.password_hash)? {
            track_login(false);
            warn!(user.id = %credentials.user.id, "Login failed");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let user = credentials.user;
        let token = create_access_token(
            user.id.into_inner(),
            user.role,
            user.hospital_id.map(|h| h.into_inner()),
            jwt_config,
        )?;

        track_login(true);
        info!(user.id = %user.id, user.role = %user.role, "User logged in");
        Ok((user, token))
    }

    #[instrument(skip(store), fields(db.operation = "SELECT"))]
    pub async fn current_user(
        store: &dyn Store,
        user_id: UserId,
    ) -> Result<UserWithHospital, AppError> {
        let user = store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let hospital = match user.hospital_id {
            Some(hospital_id) => store.find_hospital(hospital_id).await?.map(|h| h.summary()),
            None => None,
        };

        Ok(UserWithHospital { user, hospital })
    }

    #[instrument(skip(store, dto), fields(db.operation = "UPDATE"))]
    pub async fn change_password(
        store: &dyn Store,
        user_id: UserId,
        dto: ChangePasswordRequest,
    ) -> Result<(), AppError> {
        let credentials = store
            .find_credentials(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !verify_password(&dto.current_password, &credentials.password_hash)? {
            warn!("Password change with wrong current password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let password_hash = hash_password(&dto.new_password)?;
        if !store.set_password_hash(user_id, &password_hash).await? {
            return Err(AppError::not_found("User not found"));
        }

        info!("Password changed");
        Ok(())
    }
}
