use portal_core::model::{AnswerSet, AttemptOutcome, Exam, ExamId, QuestionId, ResultSummary};
use services::exams::{LoadTicket, SubmissionTicket};
use services::{ApiError, ExamPhase, ExamSessionController, ExamSessionError, SessionStore};
use tokio::sync::watch;

use super::countdown_fmt::format_countdown;
use crate::views::ViewError;

pub const START_INSTRUCTIONS: &str = "Instructions: Please ensure you are ready to start the exam. \
Once you click \"Start Test\", the timer will begin and you should stay on this page until you submit.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionRowVm {
    pub id: QuestionId,
    pub number: usize,
    pub text: String,
    pub options: Vec<OptionVm>,
}

/// One row per question, in exam order, marking the currently selected option.
#[must_use]
pub fn map_question_rows(exam: &Exam, answers: &AnswerSet) -> Vec<QuestionRowVm> {
    exam.questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = answers.get(&question.id);
            QuestionRowVm {
                id: question.id.clone(),
                number: index + 1,
                text: question.question_text.clone(),
                options: question
                    .options
                    .iter()
                    .map(|label| OptionVm {
                        label: label.clone(),
                        selected: selected == Some(label.as_str()),
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Screen state for an exam attempt, wrapping the attempt controller.
///
/// Network work happens outside: the view takes a ticket, awaits the service,
/// then hands the response back, so the signal holding this vm is never
/// borrowed across an await.
#[derive(Debug)]
pub struct ExamVm {
    controller: ExamSessionController,
}

impl ExamVm {
    #[must_use]
    pub fn new(exam_id: ExamId) -> Self {
        Self {
            controller: ExamSessionController::new(exam_id),
        }
    }

    #[must_use]
    pub fn phase(&self) -> ExamPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.controller.exam().map_or("", |exam| exam.title.as_str())
    }

    #[must_use]
    pub fn description(&self) -> &str {
        self.controller
            .exam()
            .map_or("", |exam| exam.description.as_str())
    }

    #[must_use]
    pub fn rows(&self) -> Vec<QuestionRowVm> {
        self.controller
            .exam()
            .map(|exam| map_question_rows(exam, self.controller.answers()))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn countdown_text(&self) -> String {
        format_countdown(self.controller.remaining_secs())
    }

    #[must_use]
    pub fn countdown_updates(&self) -> Option<watch::Receiver<u32>> {
        self.controller.countdown_updates()
    }

    #[must_use]
    pub fn answers_locked(&self) -> bool {
        self.phase() != ExamPhase::Running
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self.phase(), ExamPhase::Running | ExamPhase::Expired)
    }

    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        if self.phase() == ExamPhase::Submitting {
            "Submitting..."
        } else {
            "Submit Exam"
        }
    }

    #[must_use]
    pub fn time_up_notice(&self) -> Option<&'static str> {
        (self.phase() == ExamPhase::Expired)
            .then_some("Time is up. Your answers are locked; submit to record them.")
    }

    /// # Errors
    ///
    /// Returns `ViewError::NotLoggedIn` without a session.
    pub fn begin_load(&mut self, session: &SessionStore) -> Result<LoadTicket, ViewError> {
        self.controller.begin_load(session).map_err(ViewError::from)
    }

    /// # Errors
    ///
    /// Returns `ViewError::ExamUnavailable` if the exam could not be fetched.
    pub fn finish_load(&mut self, fetched: Result<Exam, ApiError>) -> Result<(), ViewError> {
        self.controller.finish_load(fetched).map_err(ViewError::from)
    }

    /// Refresh the phase after a countdown tick.
    pub fn sync(&mut self) -> ExamPhase {
        self.controller.poll()
    }

    /// # Errors
    ///
    /// Returns `ViewError` if the exam cannot be started from its current phase.
    pub fn start(&mut self) -> Result<(), ViewError> {
        self.controller.start().map_err(ViewError::from)
    }

    /// Ignored once answers are frozen.
    pub fn choose(&mut self, question_id: QuestionId, option: String) {
        let _ = self.controller.set_answer(question_id, option);
    }

    /// # Errors
    ///
    /// Returns `ViewError` if the attempt cannot be submitted right now.
    pub fn begin_submit(&mut self, session: &SessionStore) -> Result<SubmissionTicket, ViewError> {
        self.controller.begin_submit(session).map_err(ViewError::from)
    }

    /// # Errors
    ///
    /// Returns `ViewError::Message` carrying the message to show.
    pub fn finish_submit(
        &mut self,
        outcome: Result<AttemptOutcome, ApiError>,
    ) -> Result<ResultSummary, ViewError> {
        self.controller
            .finish_submit(outcome)
            .map_err(ViewError::from)
    }
}

impl From<ExamSessionError> for ViewError {
    fn from(err: ExamSessionError) -> Self {
        match err {
            ExamSessionError::NotAuthenticated => ViewError::NotLoggedIn,
            ExamSessionError::Unavailable => ViewError::ExamUnavailable,
            ExamSessionError::Submission(message) => ViewError::Message(message),
            _ => ViewError::Unknown,
        }
    }
}
