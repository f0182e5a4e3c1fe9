use std::sync::Arc;

use portal_core::Clock;
use portal_core::model::ExamSummary;
use tracing::{info, warn};

use crate::api::PortalApi;
use crate::error::ExamListError;
use crate::session_store::SessionStore;

/// An exam assigned to the student, with whether it has been taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignedExam {
    pub summary: ExamSummary,
    pub attempted: bool,
}

/// Lists the logged-in student's assigned exams.
#[derive(Clone)]
pub struct AssignedExamsService {
    api: Arc<dyn PortalApi>,
    clock: Clock,
}

impl AssignedExamsService {
    #[must_use]
    pub fn new(api: Arc<dyn PortalApi>, clock: Clock) -> Self {
        Self { api, clock }
    }

    /// Fetch the list, marking exams the student has already completed.
    ///
    /// An expired token is refused locally without calling the API.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without student and token, `SessionExpired` when the
    /// token is past its `exp` or the API answers 401, `Api` otherwise.
    pub async fn list(&self, session: &SessionStore) -> Result<Vec<AssignedExam>, ExamListError> {
        let (Some(student), Some(token)) = (session.student(), session.token()) else {
            return Err(ExamListError::NotAuthenticated);
        };
        if session.token_expired(&self.clock) {
            info!("token expired; not fetching assigned exams");
            return Err(ExamListError::SessionExpired);
        }

        let exams = match self.api.assigned_exams(&token).await {
            Ok(exams) => exams,
            Err(err) if err.is_unauthorized() => {
                warn!("assigned exams request was unauthorized");
                return Err(ExamListError::SessionExpired);
            }
            Err(err) => return Err(err.into()),
        };

        Ok(exams
            .into_iter()
            .map(|summary| AssignedExam {
                attempted: student.has_completed(&summary.id),
                summary,
            })
            .collect())
    }
}
