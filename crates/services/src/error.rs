//! Shared error types for the services crate.

use serde::Deserialize;
use thiserror::Error;

use crate::exams::ExamPhase;

/// Error payload the portal API sends with non-success statuses.
///
/// Login failures carry `message`; validation failures carry `errors[].msg`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub msg: Option<String>,
}

/// Errors emitted by the portal API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("request rejected with status {status}")]
    Rejected {
        status: reqwest::StatusCode,
        body: ErrorBody,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    #[must_use]
    pub fn rejected(status: reqwest::StatusCode, body: ErrorBody) -> Self {
        Self::Rejected { status, body }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ApiError::Rejected { status, .. } => *status == reqwest::StatusCode::UNAUTHORIZED,
            ApiError::Http(err) => err.status() == Some(reqwest::StatusCode::UNAUTHORIZED),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::Rejected { status, .. } => *status == reqwest::StatusCode::NOT_FOUND,
            ApiError::Http(err) => err.status() == Some(reqwest::StatusCode::NOT_FOUND),
        }
    }

    /// Top-level `message` from the error body, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { body, .. } => non_blank(body.message.as_deref()),
            ApiError::Http(_) => None,
        }
    }

    /// First `errors[].msg` from the error body, if any.
    #[must_use]
    pub fn first_field_error(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { body, .. } => {
                non_blank(body.errors.first().and_then(|err| err.msg.as_deref()))
            }
            ApiError::Http(_) => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|msg| !msg.trim().is_empty())
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} is not a valid http(s) URL: {value}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a positive number of seconds: {value}")]
    InvalidTimeout { var: &'static str, value: String },
}

/// Errors emitted by the exam session controller and service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamSessionError {
    #[error("not logged in")]
    NotAuthenticated,
    #[error("No exam details available.")]
    Unavailable,
    #[error("cannot {action} while the exam is {phase:?}")]
    InvalidPhase {
        action: &'static str,
        phase: ExamPhase,
    },
    #[error("{0}")]
    Submission(String),
}

/// Errors emitted by `AssignedExamsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamListError {
    #[error("not logged in")]
    NotAuthenticated,
    #[error("session expired")]
    SessionExpired,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted by `VerificationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerificationError {
    #[error("Please enter a valid registration number")]
    EmptyRegistrationNo,
    #[error("No student available with this registration number")]
    NotFound,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Api(#[from] ApiError),
}
