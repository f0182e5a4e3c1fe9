//! Exam attempts: the countdown, the attempt state machine and the services
//! that drive it against the API.

pub mod controller;
pub mod countdown;
pub mod listing;
pub mod service;

pub use controller::{
    ExamPhase, ExamSessionController, LoadTicket, SubmissionTicket, UNKNOWN_SUBMIT_ERROR,
    submission_message,
};
pub use countdown::{Countdown, CountdownHandle, EXAM_DURATION_SECS};
pub use listing::{AssignedExam, AssignedExamsService};
pub use service::ExamSessionService;
