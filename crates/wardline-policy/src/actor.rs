use wardline_core::Role;
use wardline_models::ids::{DoctorId, HospitalId, UserId};

/// The caller as stated by their access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
    pub hospital_id: Option<HospitalId>,
}

/// An [`Identity`] plus the doctor profile it owns, if any.
///
/// Doctors own records through their profile id, which the token does not
/// carry. It is resolved from the store once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub identity: Identity,
    pub doctor_id: Option<DoctorId>,
}

impl Actor {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            doctor_id: None,
        }
    }

    pub fn with_doctor(mut self, doctor_id: Option<DoctorId>) -> Self {
        self.doctor_id = doctor_id;
        self
    }

    pub fn role(&self) -> Role {
        self.identity.role
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    pub fn hospital_id(&self) -> Option<HospitalId> {
        self.identity.hospital_id
    }

    pub fn is_super_admin(&self) -> bool {
        self.identity.role == Role::SuperAdmin
    }

    pub fn is_doctor(&self) -> bool {
        self.identity.role == Role::Doctor
    }
}
