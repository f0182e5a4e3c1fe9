use portal_core::model::RegistrationRecord;
use services::VerificationError;

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationVm {
    pub name: String,
    pub photo: Option<String>,
    pub certificate: Option<String>,
    pub details: Vec<(&'static str, String)>,
}

#[must_use]
pub fn map_verification(record: &RegistrationRecord) -> VerificationVm {
    let text = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    VerificationVm {
        name: record.name.clone(),
        photo: record.profile_pic.clone().filter(|url| !url.trim().is_empty()),
        certificate: record
            .has_certificate()
            .then(|| record.certificate_pic.clone())
            .flatten(),
        details: vec![
            ("Registration No", record.registration_no.clone()),
            ("Course", text(&record.course)),
            (
                "Date of Admission",
                record.admission_date().map_or_else(
                    || text(&record.date_of_admission),
                    |date| date.format("%d %b %Y").to_string(),
                ),
            ),
            ("Father's Name", text(&record.father_name)),
            ("Mother's Name", text(&record.mother_name)),
            ("Address", text(&record.address)),
        ],
    }
}

impl From<VerificationError> for ViewError {
    fn from(err: VerificationError) -> Self {
        match err {
            VerificationError::EmptyRegistrationNo | VerificationError::NotFound => {
                ViewError::Message(err.to_string())
            }
            _ => ViewError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certificate_only_when_present() {
        let mut record = RegistrationRecord {
            name: "Asha".into(),
            registration_no: "R1".into(),
            certificate_pic: Some(" ".into()),
            ..RegistrationRecord::default()
        };
        assert_eq!(map_verification(&record).certificate, None);

        record.certificate_pic = Some("https://cdn.example/c.png".into());
        let vm = map_verification(&record);
        assert_eq!(vm.certificate.as_deref(), Some("https://cdn.example/c.png"));
        assert_eq!(vm.details[1], ("Course", "-".to_string()));
    }

    #[test]
    fn not_found_keeps_its_message() {
        let err = ViewError::from(VerificationError::NotFound);
        assert_eq!(
            err.message(),
            "No student available with this registration number"
        );
    }
}
