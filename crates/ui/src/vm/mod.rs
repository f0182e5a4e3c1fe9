mod countdown_fmt;
mod exam_list_vm;
mod exam_vm;
mod login_vm;
mod profile_vm;
mod result_vm;
mod verification_vm;

pub use countdown_fmt::format_countdown;
pub use exam_list_vm::{ExamListItemVm, map_exam_list};
pub use exam_vm::{ExamVm, OptionVm, QuestionRowVm, START_INSTRUCTIONS, map_question_rows};
pub use login_vm::LoginForm;
pub use profile_vm::{CompletedExamVm, ProfileVm, map_profile};
pub use result_vm::{ResultVm, decode_result};
pub use verification_vm::{VerificationVm, map_verification};
