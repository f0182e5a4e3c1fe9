use dioxus::prelude::*;
use services::ExamListError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotLoggedIn,
    SessionExpired,
    ExamUnavailable,
    MissingResult,
    Message(String),
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            ViewError::NotLoggedIn => "You are not logged in. Please log in to continue.",
            ViewError::SessionExpired => "Your session has expired. Please log in again.",
            ViewError::ExamUnavailable => "No exam details available.",
            ViewError::MissingResult => "No result data available.",
            ViewError::Message(message) => message,
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Whether the page should offer a way back to login.
    #[must_use]
    pub fn needs_login(&self) -> bool {
        matches!(self, ViewError::NotLoggedIn | ViewError::SessionExpired)
    }
}

impl From<ExamListError> for ViewError {
    fn from(err: ExamListError) -> Self {
        match err {
            ExamListError::NotAuthenticated => ViewError::NotLoggedIn,
            ExamListError::SessionExpired => ViewError::SessionExpired,
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
