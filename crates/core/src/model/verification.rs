use serde::{Deserialize, Serialize};

use super::student::parse_api_date;

/// Public registration record returned by a certificate verification lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub name: String,
    pub registration_no: String,
    pub course: Option<String>,
    pub date_of_admission: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub address: Option<String>,
    pub profile_pic: Option<String>,
    #[serde(rename = "certificatepic", alias = "certificatePic")]
    pub certificate_pic: Option<String>,
}

impl RegistrationRecord {
    #[must_use]
    pub fn admission_date(&self) -> Option<chrono::NaiveDate> {
        self.date_of_admission.as_deref().and_then(parse_api_date)
    }

    #[must_use]
    pub fn has_certificate(&self) -> bool {
        self.certificate_pic
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}
