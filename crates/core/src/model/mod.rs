mod answers;
mod exam;
mod ids;
mod result;
mod student;
mod verification;

pub use answers::{AnswerEntry, AnswerSet};
pub use exam::{Exam, ExamSummary, Question};
pub use ids::{ExamId, ParseIdError, QuestionId};
pub use result::{AttemptOutcome, ResultParamError, ResultSummary};
pub use student::{CompletedExam, StudentProfile, parse_api_date};
pub use verification::RegistrationRecord;
