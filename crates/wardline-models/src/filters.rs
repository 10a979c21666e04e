use crate::ids::{DoctorId, HospitalId, PatientId};

/// Query-narrowing predicate for list operations.
///
/// Each populated field is an equality constraint; `None` leaves that column
/// unconstrained. Which columns a field maps to depends on the table:
///
/// | field | doctors | patients | prescriptions |
/// |---|---|---|---|
/// | `hospital_id` | `hospital_id` | `hospital_id` | `hospital_id` |
/// | `doctor_id` | `id` | `doctor_id` | `doctor_id` |
/// | `patient_id` | ignored | `id` | `patient_enrollment_id` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub hospital_id: Option<HospitalId>,
    pub doctor_id: Option<DoctorId>,
    pub patient_id: Option<PatientId>,
}

impl RecordFilter {
    pub fn hospital(hospital_id: HospitalId) -> Self {
        Self {
            hospital_id: Some(hospital_id),
            ..Self::default()
        }
    }

    pub fn doctor(doctor_id: DoctorId) -> Self {
        Self {
            doctor_id: Some(doctor_id),
            ..Self::default()
        }
    }

    pub fn with_patient(mut self, patient_id: Option<PatientId>) -> Self {
        self.patient_id = patient_id;
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.hospital_id.is_none() && self.doctor_id.is_none() && self.patient_id.is_none()
    }

    /// Tests a record's scope columns against this filter.
    pub fn matches(
        &self,
        hospital_id: HospitalId,
        doctor_id: Option<DoctorId>,
        patient_id: Option<PatientId>,
    ) -> bool {
        fn accepts<T: PartialEq>(wanted: Option<T>, actual: Option<T>) -> bool {
            match wanted {
                None => true,
                Some(wanted) => actual == Some(wanted),
            }
        }

        accepts(self.hospital_id, Some(hospital_id))
            && accepts(self.doctor_id, doctor_id)
            && (patient_id.is_none() || accepts(self.patient_id, patient_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unrestricted() {
        let filter = RecordFilter::default();
        assert!(filter.is_unrestricted());
        assert!(filter.matches(HospitalId::new(), Some(DoctorId::new()), None));
    }

    #[test]
    fn hospital_filter_rejects_other_hospitals() {
        let mine = HospitalId::new();
        let filter = RecordFilter::hospital(mine);
        assert!(filter.matches(mine, None, None));
        assert!(!filter.matches(HospitalId::new(), None, None));
    }

    #[test]
    fn doctor_filter_requires_matching_doctor() {
        let me = DoctorId::new();
        let filter = RecordFilter::doctor(me);
        assert!(filter.matches(HospitalId::new(), Some(me), None));
        assert!(!filter.matches(HospitalId::new(), Some(DoctorId::new()), None));
        assert!(!filter.matches(HospitalId::new(), None, None));
    }

    #[test]
    fn patient_filter_applies_only_to_rows_with_a_patient_column() {
        let patient = PatientId::new();
        let filter = RecordFilter::default().with_patient(Some(patient));
        assert!(filter.matches(HospitalId::new(), None, Some(patient)));
        assert!(!filter.matches(HospitalId::new(), None, Some(PatientId::new())));
        assert!(filter.matches(HospitalId::new(), None, None));
    }
}
