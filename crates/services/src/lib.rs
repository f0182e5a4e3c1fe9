#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod config;
pub mod error;
pub mod exams;
pub mod session_store;
pub mod verification;

pub use portal_core::Clock;
pub use reqwest::StatusCode;

pub use api::{HttpPortalApi, LoginResponse, PortalApi};
pub use app_services::PortalServices;
pub use config::PortalConfig;
pub use error::{
    ApiError, AppServicesError, ConfigError, ErrorBody, ExamListError, ExamSessionError,
    FieldError, VerificationError,
};
pub use exams::{
    AssignedExam, AssignedExamsService, ExamPhase, ExamSessionController, ExamSessionService,
};
pub use session_store::{LOGIN_FAILED, SessionState, SessionStore};
pub use verification::VerificationService;
