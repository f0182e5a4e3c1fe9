use portal_core::model::{
    AnswerEntry, AnswerSet, AttemptOutcome, Exam, ExamId, QuestionId, ResultSummary,
};
use tokio::sync::watch;
use tracing::{info, warn};

use super::countdown::{Countdown, CountdownHandle, EXAM_DURATION_SECS};
use crate::error::{ApiError, ExamSessionError};
use crate::session_store::SessionStore;

/// Shown when a failed submission carries no usable server message.
pub const UNKNOWN_SUBMIT_ERROR: &str = "An unknown error occurred";

/// Where an exam attempt stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExamPhase {
    /// No exam content yet (or it could not be fetched).
    Locked,
    /// Content loaded; waiting for the student to start.
    Unstarted,
    /// Countdown running, answers editable.
    Running,
    /// Answers sent, waiting for the server. Answers frozen.
    Submitting,
    /// Scored; the result summary is available.
    Done,
    /// Countdown reached zero. Answers frozen, submit still accepted.
    Expired,
}

/// What `begin_load` hands to the caller to perform the fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub exam_id: ExamId,
    pub token: String,
}

/// What `begin_submit` hands to the caller to perform the submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub exam_id: ExamId,
    pub token: String,
    pub answers: Vec<AnswerEntry>,
}

/// State machine for one exam attempt.
///
/// Network calls are split into `begin_*` / `finish_*` pairs so the controller
/// never has to be borrowed across an `.await`; [`super::ExamSessionService`]
/// glues the halves together for callers that can hold it.
///
/// The countdown task lives exactly as long as the attempt is `Running`: it is
/// released on expiry, on submission and when the controller is dropped.
#[derive(Debug)]
pub struct ExamSessionController {
    exam_id: ExamId,
    phase: ExamPhase,
    exam: Option<Exam>,
    answers: AnswerSet,
    remaining_secs: u32,
    countdown: Option<CountdownHandle>,
    resume_phase: ExamPhase,
    last_error: Option<String>,
    result: Option<ResultSummary>,
}

impl ExamSessionController {
    #[must_use]
    pub fn new(exam_id: ExamId) -> Self {
        Self {
            exam_id,
            phase: ExamPhase::Locked,
            exam: None,
            answers: AnswerSet::new(),
            remaining_secs: EXAM_DURATION_SECS,
            countdown: None,
            resume_phase: ExamPhase::Running,
            last_error: None,
            result: None,
        }
    }

    #[must_use]
    pub fn exam_id(&self) -> &ExamId {
        &self.exam_id
    }

    /// Current phase. A `Running` attempt whose countdown has hit zero already
    /// reads as `Expired`, even before the next mutating call records it.
    #[must_use]
    pub fn phase(&self) -> ExamPhase {
        if self.phase == ExamPhase::Running && self.remaining_secs() == 0 {
            return ExamPhase::Expired;
        }
        self.phase
    }

    #[must_use]
    pub fn exam(&self) -> Option<&Exam> {
        self.exam.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    #[must_use]
    pub fn selected(&self, question_id: &QuestionId) -> Option<&str> {
        self.answers.get(question_id)
    }

    #[must_use]
    pub fn remaining_secs(&self) -> u32 {
        self.countdown
            .as_ref()
            .map_or(self.remaining_secs, CountdownHandle::remaining)
    }

    /// Receiver that wakes on each countdown tick while `Running`.
    #[must_use]
    pub fn countdown_updates(&self) -> Option<watch::Receiver<u32>> {
        self.countdown.as_ref().map(CountdownHandle::subscribe)
    }

    #[must_use]
    pub fn is_counting_down(&self) -> bool {
        self.countdown.is_some()
    }

    /// Message of the last failed submission, cleared by the next attempt.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&ResultSummary> {
        self.result.as_ref()
    }

    /// Record an expired countdown as `Expired` and release its task.
    /// Returns the phase after syncing.
    pub fn poll(&mut self) -> ExamPhase {
        if self.phase == ExamPhase::Running && self.remaining_secs() == 0 {
            self.release_countdown();
            self.phase = ExamPhase::Expired;
            info!(exam_id = %self.exam_id, "exam time is up; waiting for manual submission");
        }
        self.phase
    }

    /// First half of `Locked → Unstarted`.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` if the session has no student or token (the caller
    /// should send the student to login); `InvalidPhase` unless `Locked`.
    pub fn begin_load(&mut self, session: &SessionStore) -> Result<LoadTicket, ExamSessionError> {
        self.expect_phase("load the exam", &[ExamPhase::Locked])?;
        let token = authenticated_token(session)?;
        Ok(LoadTicket {
            exam_id: self.exam_id.clone(),
            token,
        })
    }

    /// Second half of `Locked → Unstarted`.
    ///
    /// # Errors
    ///
    /// `Unavailable` if the fetch failed; the controller stays `Locked` and does
    /// not retry. `InvalidPhase` unless `Locked`.
    pub fn finish_load(&mut self, fetched: Result<Exam, ApiError>) -> Result<(), ExamSessionError> {
        self.expect_phase("load the exam", &[ExamPhase::Locked])?;
        match fetched {
            Ok(exam) => {
                info!(exam_id = %self.exam_id, questions = exam.total_questions(), "exam loaded");
                self.exam = Some(exam);
                self.phase = ExamPhase::Unstarted;
                Ok(())
            }
            Err(err) => {
                warn!(exam_id = %self.exam_id, error = %err, "could not fetch exam details");
                Err(ExamSessionError::Unavailable)
            }
        }
    }

    /// `Unstarted → Running`: reset the countdown to the full exam duration and start it.
    ///
    /// # Errors
    ///
    /// `InvalidPhase` unless `Unstarted`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn start(&mut self) -> Result<(), ExamSessionError> {
        self.expect_phase("start the exam", &[ExamPhase::Unstarted])?;
        self.remaining_secs = EXAM_DURATION_SECS;
        self.countdown = Some(CountdownHandle::spawn(Countdown::exam()));
        self.phase = ExamPhase::Running;
        info!(exam_id = %self.exam_id, "exam started");
        Ok(())
    }

    /// Record the chosen option. Last write wins; the option is not checked
    /// against the question's choices.
    ///
    /// # Errors
    ///
    /// `InvalidPhase` unless `Running`.
    pub fn set_answer(
        &mut self,
        question_id: QuestionId,
        option: impl Into<String>,
    ) -> Result<(), ExamSessionError> {
        self.poll();
        self.expect_phase("change answers", &[ExamPhase::Running])?;
        self.answers.set(question_id, option);
        Ok(())
    }

    /// First half of `Running | Expired → Submitting`. Freezes answers and
    /// releases the countdown.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` if the session no longer has a token; `InvalidPhase`
    /// unless `Running` or `Expired`.
    pub fn begin_submit(
        &mut self,
        session: &SessionStore,
    ) -> Result<SubmissionTicket, ExamSessionError> {
        self.poll();
        self.expect_phase("submit", &[ExamPhase::Running, ExamPhase::Expired])?;
        let token = session.token().ok_or(ExamSessionError::NotAuthenticated)?;

        self.resume_phase = self.phase;
        self.release_countdown();
        self.phase = ExamPhase::Submitting;
        self.last_error = None;

        Ok(SubmissionTicket {
            exam_id: self.exam_id.clone(),
            token,
            answers: self.answers.to_entries(),
        })
    }

    /// Second half of the submission.
    ///
    /// On success the attempt is `Done` and the summary is returned. On failure
    /// the most specific server message is kept in [`Self::last_error`] and the
    /// attempt goes back to where it was, the countdown resuming from its
    /// remaining value; nothing is retried.
    ///
    /// # Errors
    ///
    /// `Submission` with the message to show; `InvalidPhase` unless `Submitting`.
    pub fn finish_submit(
        &mut self,
        outcome: Result<AttemptOutcome, ApiError>,
    ) -> Result<ResultSummary, ExamSessionError> {
        self.expect_phase("finish submitting", &[ExamPhase::Submitting])?;
        match outcome {
            Ok(outcome) => {
                let exam_name = self
                    .exam
                    .as_ref()
                    .map(|exam| exam.title.clone())
                    .unwrap_or_default();
                let summary = ResultSummary::from_outcome(exam_name, outcome);
                info!(
                    exam_id = %self.exam_id,
                    correct = outcome.correct_answers,
                    total = outcome.total_questions,
                    "exam submitted"
                );
                self.result = Some(summary.clone());
                self.phase = ExamPhase::Done;
                Ok(summary)
            }
            Err(err) => {
                let message = submission_message(&err);
                warn!(exam_id = %self.exam_id, error = %err, "exam submission failed");
                self.last_error = Some(message.clone());
                self.resume_after_failed_submit();
                Err(ExamSessionError::Submission(message))
            }
        }
    }

    /// Stop the countdown without changing phase. Dropping the controller
    /// does the same.
    pub fn cancel(&mut self) {
        if self.countdown.is_some() {
            self.release_countdown();
            info!(exam_id = %self.exam_id, "exam countdown cancelled");
        }
    }

    fn resume_after_failed_submit(&mut self) {
        if self.resume_phase == ExamPhase::Running && self.remaining_secs > 0 {
            self.countdown = Some(CountdownHandle::spawn(Countdown::new(self.remaining_secs)));
            self.phase = ExamPhase::Running;
        } else {
            self.phase = ExamPhase::Expired;
        }
    }

    fn release_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            self.remaining_secs = handle.cancel();
        }
    }

    fn expect_phase(
        &self,
        action: &'static str,
        allowed: &[ExamPhase],
    ) -> Result<(), ExamSessionError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(ExamSessionError::InvalidPhase {
                action,
                phase: self.phase(),
            })
        }
    }
}

fn authenticated_token(session: &SessionStore) -> Result<String, ExamSessionError> {
    if !session.is_authenticated() {
        return Err(ExamSessionError::NotAuthenticated);
    }
    session.token().ok_or(ExamSessionError::NotAuthenticated)
}

/// `errors[0].msg`, then `message`, then a generic fallback.
#[must_use]
pub fn submission_message(err: &ApiError) -> String {
    err.first_field_error()
        .or_else(|| err.server_message())
        .unwrap_or(UNKNOWN_SUBMIT_ERROR)
        .to_string()
}
