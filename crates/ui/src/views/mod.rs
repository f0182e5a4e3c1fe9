mod exam_detail;
mod exams;
mod home;
mod login;
mod login_prompt;
mod profile;
mod result;
mod state;
mod verification;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use exam_detail::ExamDetailView;
pub use exams::ExamsView;
pub use home::HomeView;
pub use login::LoginView;
pub use login_prompt::LoginPrompt;
pub use profile::ProfileView;
pub use result::ResultView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use verification::VerificationView;
