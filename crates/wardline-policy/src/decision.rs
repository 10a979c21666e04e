use wardline_core::AppError;
use wardline_models::{
    RecordFilter,
    doctors::Doctor,
    hospitals::Hospital,
    ids::{DoctorId, HospitalId},
    patients::PatientEnrollment,
    prescriptions::Prescription,
    users::User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const fn verb(&self) -> &'static str {
        match self {
            Action::List | Action::Read => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Hospital,
    HospitalAdmin,
    Doctor,
    Patient,
    Prescription,
}

impl ResourceKind {
    pub const fn label(&self) -> &'static str {
        match self {
            ResourceKind::Hospital => "hospital",
            ResourceKind::HospitalAdmin => "hospital admin",
            ResourceKind::Doctor => "doctor",
            ResourceKind::Patient => "patient",
            ResourceKind::Prescription => "prescription",
        }
    }

    pub const fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Hospital => "hospitals",
            ResourceKind::HospitalAdmin => "hospital admins",
            ResourceKind::Doctor => "doctors",
            ResourceKind::Patient => "patients",
            ResourceKind::Prescription => "prescriptions",
        }
    }
}

/// The scope columns of a record, existing or about to be created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ownership {
    pub hospital_id: Option<HospitalId>,
    pub doctor_id: Option<DoctorId>,
}

impl Ownership {
    pub fn hospital(hospital_id: HospitalId) -> Self {
        Self {
            hospital_id: Some(hospital_id),
            doctor_id: None,
        }
    }

    pub fn assigned(hospital_id: HospitalId, doctor_id: DoctorId) -> Self {
        Self {
            hospital_id: Some(hospital_id),
            doctor_id: Some(doctor_id),
        }
    }
}

impl From<&Hospital> for Ownership {
    fn from(hospital: &Hospital) -> Self {
        Self::hospital(hospital.id)
    }
}

impl From<&User> for Ownership {
    fn from(user: &User) -> Self {
        Self {
            hospital_id: user.hospital_id,
            doctor_id: None,
        }
    }
}

impl From<&Doctor> for Ownership {
    fn from(doctor: &Doctor) -> Self {
        Self::assigned(doctor.hospital_id, doctor.id)
    }
}

impl From<&PatientEnrollment> for Ownership {
    fn from(patient: &PatientEnrollment) -> Self {
        Self::assigned(patient.hospital_id, patient.doctor_id)
    }
}

impl From<&Prescription> for Ownership {
    fn from(prescription: &Prescription) -> Self {
        Self::assigned(prescription.hospital_id, prescription.doctor_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The role may never perform this action on this kind.
    RoleNotPermitted,
    /// The record belongs to another hospital.
    OutsideHospital,
    /// The record is assigned to another doctor.
    NotOwner,
    /// A hospital-scoped role whose token carries no hospital.
    MissingHospital,
    /// A doctor account without a doctor profile.
    MissingDoctorProfile,
}

/// A refusal, with enough context to phrase it for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    pub reason: DenyReason,
    pub action: Action,
    pub kind: ResourceKind,
}

impl From<Denial> for AppError {
    fn from(denial: Denial) -> Self {
        let Denial {
            reason,
            action,
            kind,
        } = denial;

        match (reason, action) {
            (DenyReason::MissingDoctorProfile, _) => {
                AppError::not_found("Doctor profile not found")
            }
            (DenyReason::MissingHospital, _) => {
                AppError::forbidden("No hospital assigned to this account")
            }
            (DenyReason::OutsideHospital, Action::Create) => match kind {
                ResourceKind::Prescription => AppError::forbidden(
                    "You can only add prescriptions for patients in your hospital",
                ),
                _ => AppError::forbidden(format!(
                    "You can only add {} to your hospital",
                    kind.plural()
                )),
            },
            (DenyReason::NotOwner, Action::Create) => {
                AppError::forbidden(format!("You can only add {} for your patients", kind.plural()))
            }
            (_, Action::List | Action::Create) => {
                AppError::forbidden(format!("Unauthorized to {} {}", action.verb(), kind.plural()))
            }
            _ => AppError::forbidden(format!(
                "Unauthorized to {} this {}",
                action.verb(),
                kind.label()
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
    /// Allowed, restricted to the rows matching the filter.
    Scope(RecordFilter),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Decision::Deny(_))
    }

    pub fn enforce(self) -> Result<(), AppError> {
        match self {
            Decision::Deny(denial) => Err(denial.into()),
            Decision::Allow | Decision::Scope(_) => Ok(()),
        }
    }

    /// The filter a list query must apply. `Allow` means unrestricted.
    pub fn into_scope(self) -> Result<RecordFilter, AppError> {
        match self {
            Decision::Allow => Ok(RecordFilter::default()),
            Decision::Scope(filter) => Ok(filter),
            Decision::Deny(denial) => Err(denial.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deny(reason: DenyReason, action: Action, kind: ResourceKind) -> AppError {
        Decision::Deny(Denial {
            reason,
            action,
            kind,
        })
        .enforce()
        .unwrap_err()
    }

    #[test]
    fn missing_profile_reads_as_not_found() {
        let err = deny(
            DenyReason::MissingDoctorProfile,
            Action::List,
            ResourceKind::Patient,
        );
        assert_eq!(err.status.as_u16(), 404);
        assert_eq!(err.message(), "Doctor profile not found");
    }

    #[test]
    fn messages_follow_action_and_kind() {
        let err = deny(DenyReason::OutsideHospital, Action::Read, ResourceKind::Patient);
        assert_eq!(err.status.as_u16(), 403);
        assert_eq!(err.message(), "Unauthorized to view this patient");

        let err = deny(DenyReason::OutsideHospital, Action::Create, ResourceKind::Doctor);
        assert_eq!(err.message(), "You can only add doctors to your hospital");

        let err = deny(
            DenyReason::OutsideHospital,
            Action::Create,
            ResourceKind::Prescription,
        );
        assert_eq!(
            err.message(),
            "You can only add prescriptions for patients in your hospital"
        );

        let err = deny(DenyReason::NotOwner, Action::Create, ResourceKind::Prescription);
        assert_eq!(err.message(), "You can only add prescriptions for your patients");

        let err = deny(DenyReason::NotOwner, Action::Delete, ResourceKind::Prescription);
        assert_eq!(err.message(), "Unauthorized to delete this prescription");

        let err = deny(DenyReason::RoleNotPermitted, Action::List, ResourceKind::Patient);
        assert_eq!(err.message(), "Unauthorized to view patients");
    }

    #[test]
    fn allow_is_an_unrestricted_scope() {
        assert_eq!(Decision::Allow.into_scope().unwrap(), RecordFilter::default());
        let scoped = RecordFilter::hospital(HospitalId::new());
        assert_eq!(Decision::Scope(scoped).into_scope().unwrap(), scoped);
    }
}
