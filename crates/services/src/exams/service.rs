use std::sync::Arc;

use portal_core::model::{AttemptOutcome, Exam, ResultSummary};

use super::controller::{ExamSessionController, LoadTicket, SubmissionTicket};
use crate::api::PortalApi;
use crate::error::{ApiError, ExamSessionError};
use crate::session_store::SessionStore;

/// Drives an [`ExamSessionController`] against the portal API.
#[derive(Clone)]
pub struct ExamSessionService {
    api: Arc<dyn PortalApi>,
}

impl ExamSessionService {
    #[must_use]
    pub fn new(api: Arc<dyn PortalApi>) -> Self {
        Self { api }
    }

    /// Fetch the exam content and unlock the attempt.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a logged-in student, `Unavailable` when the
    /// content cannot be fetched, `InvalidPhase` unless the attempt is `Locked`.
    pub async fn load(
        &self,
        controller: &mut ExamSessionController,
        session: &SessionStore,
    ) -> Result<(), ExamSessionError> {
        let ticket = controller.begin_load(session)?;
        let fetched = self.fetch_exam(&ticket).await;
        controller.finish_load(fetched)
    }

    /// Send the answers once and score the attempt.
    ///
    /// # Errors
    ///
    /// `Submission` with the message to show when the server refuses the
    /// attempt; `InvalidPhase` unless `Running` or `Expired`.
    pub async fn submit(
        &self,
        controller: &mut ExamSessionController,
        session: &SessionStore,
    ) -> Result<ResultSummary, ExamSessionError> {
        let ticket = controller.begin_submit(session)?;
        let outcome = self.send_answers(&ticket).await;
        controller.finish_submit(outcome)
    }

    /// The network half of [`Self::load`], for callers that cannot hold the
    /// controller across an await.
    ///
    /// # Errors
    ///
    /// Propagates the API failure.
    pub async fn fetch_exam(&self, ticket: &LoadTicket) -> Result<Exam, ApiError> {
        self.api.exam_detail(&ticket.token, &ticket.exam_id).await
    }

    /// The network half of [`Self::submit`].
    ///
    /// # Errors
    ///
    /// Propagates the API failure.
    pub async fn send_answers(
        &self,
        ticket: &SubmissionTicket,
    ) -> Result<AttemptOutcome, ApiError> {
        self.api
            .attend_exam(&ticket.token, &ticket.exam_id, &ticket.answers)
            .await
    }
}
