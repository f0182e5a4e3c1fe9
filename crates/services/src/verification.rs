use std::sync::Arc;

use portal_core::model::RegistrationRecord;
use tracing::info;

use crate::api::PortalApi;
use crate::error::VerificationError;

/// Public registration lookup. Needs no login.
#[derive(Clone)]
pub struct VerificationService {
    api: Arc<dyn PortalApi>,
}

impl VerificationService {
    #[must_use]
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self { api }
    }

    /// Look up a student by registration number.
    ///
    /// # Errors
    ///
    /// `EmptyRegistrationNo` for blank input (no request is made), `NotFound`
    /// when the server knows no such student, `Api` for transport failures.
    pub async fn verify(
        &self,
        registration_no: &str,
    ) -> Result<RegistrationRecord, VerificationError> {
        let registration_no = registration_no.trim();
        if registration_no.is_empty() {
            return Err(VerificationError::EmptyRegistrationNo);
        }
        match self.api.verify_registration(registration_no).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => {
                info!(registration_no, "no student registered under this number");
                Err(VerificationError::NotFound)
            }
            Err(err) if err.is_not_found() => Err(VerificationError::NotFound),
            Err(err) => Err(err.into()),
        }
    }
}
