//! Role-scoped access rules.
//!
//! Two questions are answered separately. First, may this role ever perform
//! this action on this kind of record? Second, does this particular record
//! fall within the actor's scope? Super admins skip the second question.
//! Everyone else is scoped by hospital, except doctors, who are scoped by
//! their own profile for patients and prescriptions.

use wardline_core::{AppError, Role};
use wardline_models::RecordFilter;

use crate::actor::Actor;
use crate::decision::{Action, Decision, Denial, DenyReason, Ownership, ResourceKind};

/// Whether `role` may ever perform `action` on `kind`, before ownership.
fn role_permits(role: Role, action: Action, kind: ResourceKind) -> bool {
    use Action::*;
    use ResourceKind::*;

    let reads = matches!(action, List | Read);
    match role {
        Role::SuperAdmin => true,
        Role::HospitalAdmin => match kind {
            Doctor | Patient | Prescription => true,
            Hospital => reads,
            HospitalAdmin => false,
        },
        Role::Hospital => matches!(kind, Hospital | Doctor) && reads,
        Role::Doctor => matches!(kind, Patient | Prescription),
    }
}

/// Decides whether `actor` may perform `action` on a record of `kind`.
///
/// `resource` is the target's scope columns: the stored record for reads,
/// updates and deletes, the record about to be written for creates. With no
/// resource only the role is checked. For [`Action::List`] the result is a
/// [`Decision::Scope`] carrying the implicit narrowing for the actor.
pub fn can_access(
    actor: &Actor,
    action: Action,
    kind: ResourceKind,
    resource: Option<&Ownership>,
) -> Decision {
    let deny = |reason| {
        Decision::Deny(Denial {
            reason,
            action,
            kind,
        })
    };

    if !role_permits(actor.role(), action, kind) {
        return deny(DenyReason::RoleNotPermitted);
    }
    if actor.is_super_admin() {
        return match action {
            Action::List => Decision::Scope(RecordFilter::default()),
            _ => Decision::Allow,
        };
    }

    if actor.is_doctor() {
        let Some(own_doctor) = actor.doctor_id else {
            return deny(DenyReason::MissingDoctorProfile);
        };
        return match (action, resource) {
            (Action::List, _) => Decision::Scope(RecordFilter::doctor(own_doctor)),
            (_, Some(resource)) if resource.doctor_id != Some(own_doctor) => {
                deny(DenyReason::NotOwner)
            }
            _ => Decision::Allow,
        };
    }

    let Some(own_hospital) = actor.hospital_id() else {
        return deny(DenyReason::MissingHospital);
    };
    match (action, resource) {
        (Action::List, _) => Decision::Scope(RecordFilter::hospital(own_hospital)),
        (_, Some(resource)) if resource.hospital_id != Some(own_hospital) => {
            deny(DenyReason::OutsideHospital)
        }
        _ => Decision::Allow,
    }
}

/// The filter a list of `kind` must apply for `actor`.
///
/// Super admins get exactly the filters they asked for, limited to the
/// columns the kind supports. Every other role gets its implicit scope and
/// the requested filters are dropped, except a prescription `patient_id`,
/// which can only narrow further.
pub fn list_scope(
    actor: &Actor,
    kind: ResourceKind,
    requested: &RecordFilter,
) -> Result<RecordFilter, AppError> {
    let scope = can_access(actor, Action::List, kind, None).into_scope()?;

    let filter = if actor.is_super_admin() {
        match kind {
            ResourceKind::Hospital | ResourceKind::HospitalAdmin | ResourceKind::Doctor => {
                RecordFilter {
                    hospital_id: requested.hospital_id,
                    ..RecordFilter::default()
                }
            }
            ResourceKind::Patient => RecordFilter {
                patient_id: None,
                ..*requested
            },
            ResourceKind::Prescription => *requested,
        }
    } else if kind == ResourceKind::Prescription {
        scope.with_patient(requested.patient_id)
    } else {
        scope
    };

    Ok(filter)
}
